use serde::{Deserialize, Serialize};

use super::lenient;

/// One inventory line as returned by `GET /api/inventory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub branch: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub reorder_level: Option<i64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
}

impl InventoryItem {
    pub fn quantity_or_zero(&self) -> i64 {
        self.quantity.unwrap_or(0)
    }

    pub fn reorder_level_or_zero(&self) -> i64 {
        self.reorder_level.unwrap_or(0)
    }

    /// At or below the reorder threshold. Absent fields count as zero.
    pub fn is_low_stock(&self) -> bool {
        self.quantity_or_zero() <= self.reorder_level_or_zero()
    }

    /// Distance to the reorder threshold; more negative is more critical.
    /// Saturates at the `i64` bounds.
    pub fn stock_margin(&self) -> i64 {
        self.quantity_or_zero()
            .saturating_sub(self.reorder_level_or_zero())
    }

    pub fn stock_value(&self) -> f64 {
        self.price.unwrap_or(0.0) * self.quantity_or_zero() as f64
    }
}

/// Body of `POST /api/inventory/{name}/adjust`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub branch: String,
    pub delta: i64,
}
