//! Analytics page state for the real-time `analytics_update` channel.
//!
//! Updates may arrive at any time; the latest payload is cached and only
//! handed back for drawing while the analytics view is on screen. Showing the
//! view replays the cached payload.

use serde_json::Value;

use crate::models::TopProduct;

#[derive(Debug, Default)]
pub struct AnalyticsView {
    last_payload: Option<Value>,
    visible: bool,
}

impl AnalyticsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn last_payload(&self) -> Option<&Value> {
        self.last_payload.as_ref()
    }

    /// Cache `payload`; returns it if it should be drawn now.
    pub fn on_update(&mut self, payload: Value) -> Option<&Value> {
        tracing::debug!(visible = self.visible, "Analytics update received");
        self.last_payload = Some(payload);
        if self.visible {
            self.last_payload.as_ref()
        } else {
            None
        }
    }

    /// Mark the view visible; returns the cached payload to redraw, if any.
    pub fn show(&mut self) -> Option<&Value> {
        self.visible = true;
        self.last_payload.as_ref()
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Medal for the top three, `#n` after that. `index` is zero-based.
pub fn rank_label(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("#{}", n + 1),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedProduct {
    pub rank: String,
    pub name: String,
    pub used: i64,
}

pub fn rank_top_products(products: &[TopProduct]) -> Vec<RankedProduct> {
    products
        .iter()
        .enumerate()
        .map(|(index, product)| RankedProduct {
            rank: rank_label(index),
            name: product.name.clone(),
            used: product.used.unwrap_or(0),
        })
        .collect()
}
