use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::config::BADGE_DISPLAY_CAP;

// ---------------------------------------------------------------------------
// Derived entries
// ---------------------------------------------------------------------------

/// Inventory line at or below its reorder threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockEntry {
    pub name: String,
    pub branch: String,
    pub quantity: i64,
}

/// Batch identity resolved from `id`, then `_id`, then `batch_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum SourceId {
    Resolved(String),
    /// None of the three candidates was present. Never matched by acknowledge.
    Unresolved,
}

impl SourceId {
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Unresolved => None,
        }
    }

    /// Text shown to the presentation layer; `unknown` when unresolved.
    pub fn display(&self) -> &str {
        self.as_resolved().unwrap_or("unknown")
    }
}

/// Batch expiring within the alert window (or already expired).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringEntry {
    pub item_name: String,
    pub branch: String,
    /// Ceiling of whole days until expiry; negative once expired.
    pub days_left: i64,
    pub expires_at: DateTime<Utc>,
    pub source_id: SourceId,
    pub id: Option<String>,
    pub object_id: Option<String>,
    pub batch_number: Option<String>,
}

impl ExpiringEntry {
    pub fn is_expired(&self) -> bool {
        self.days_left < 0
    }

    /// True when any non-empty raw identity field equals `identifier`.
    /// Empty fields are skipped, as in identity resolution.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        [&self.id, &self.object_id, &self.batch_number]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|value| !value.is_empty())
            .any(|value| value == identifier)
    }
}

// ---------------------------------------------------------------------------
// Rendered feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Expiring,
    Expired,
    LowStock,
    System,
}

impl NotificationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expiring => "Expiring",
            Self::Expired => "Expired",
            Self::LowStock => "Low Stock",
            Self::System => "System",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Expiring => "bg-orange-500/20 text-orange-400",
            Self::Expired => "bg-red-500/20 text-red-400",
            Self::LowStock => "bg-rose-500/20 text-rose-400",
            Self::System => "bg-indigo-500/20 text-indigo-400",
        }
    }
}

/// What the row's acknowledge button does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AcknowledgeAction {
    /// Local removal from the low-stock list by item name.
    Stock { name: String },
    /// Local removal from the expiring list. Unresolved ids cannot be acknowledged.
    Expiry { source_id: SourceId },
    /// Backend alert; acknowledgement belongs to the server.
    System { alert_id: String },
}

impl AcknowledgeAction {
    /// Identifier to hand back to `AlertAggregator::acknowledge`, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Stock { name } => Some(name),
            Self::Expiry { source_id } => source_id.as_resolved(),
            Self::System { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRow {
    pub category: NotificationCategory,
    pub category_label: &'static str,
    pub branch_label: String,
    pub item_label: String,
    pub detail_text: String,
    pub color_class: &'static str,
    /// Inventory card to scroll to when the row body is clicked.
    pub highlight_id: String,
    pub acknowledge: AcknowledgeAction,
}

/// Bell badge. `count` is exact; only `label` saturates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub count: usize,
    pub label: String,
    pub visible: bool,
}

impl Badge {
    pub fn from_count(count: usize) -> Self {
        let label = if count > BADGE_DISPLAY_CAP {
            format!("{BADGE_DISPLAY_CAP}+")
        } else {
            count.to_string()
        };
        Self {
            count,
            label,
            visible: count > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationFeed {
    pub rows: Vec<NotificationRow>,
    pub badge: Badge,
    pub all_caught_up: bool,
}

/// Result of a local acknowledge: whether anything was removed, plus the
/// re-rendered feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AckOutcome {
    pub removed: bool,
    pub feed: NotificationFeed,
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub low_stock: usize,
    pub expiring: usize,
    pub system: usize,
}

impl AlertCounts {
    pub fn total(&self) -> usize {
        self.low_stock + self.expiring + self.system
    }
}

// ---------------------------------------------------------------------------
// KPI sink
// ---------------------------------------------------------------------------

/// Receives the expiring-batch count whenever the expiring slice is replaced.
pub trait KpiSink: Send + Sync {
    fn expiring_count_changed(&self, count: usize);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    #[error("Invalid acknowledge kind: {0}")]
    InvalidAckKind(String),
}
