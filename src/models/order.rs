use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::OrderStatus;
use super::lenient;

/// A restock purchase order from `GET /api/orders`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "lenient::opt_string")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub item: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub branch: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
}

impl Order {
    /// Anything that is not explicitly pending renders as received.
    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some(OrderStatus::Pending.as_str())
    }

    /// Short purchase-order label, e.g. `#PO-9f3a`.
    pub fn po_label(&self) -> String {
        let id = self
            .object_id
            .as_deref()
            .or(self.id.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("???");
        let chars: Vec<char> = id.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("#PO-{tail}")
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub item: String,
    pub branch: String,
    pub quantity: u32,
    pub supplier: String,
    pub priority: String,
    pub notes: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
