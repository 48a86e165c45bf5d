use serde::{Deserialize, Serialize};

use super::lenient;

/// `GET /analytics/overview`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    #[serde(default, deserialize_with = "lenient::int")]
    pub new_items: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub batches_7d: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub total_items: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub branches: Option<i64>,
}

/// Row of `GET /analytics/low-stock`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockProduct {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub quantity: Option<i64>,
}

/// Row of `GET /analytics/top-products`; the backend groups by item name
/// into `_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub used: Option<i64>,
}

/// `GET /api/ai/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiDashboard {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub risk_text: Option<String>,
}
