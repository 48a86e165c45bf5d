use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// One row of `GET /api/logs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub action: String,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub timestamp: Option<String>,
}

impl ActivityLog {
    /// Compact JSON of `details`, or `-` when there is nothing to show.
    pub fn details_text(&self) -> String {
        match &self.details {
            None | Some(Value::Null) => "-".to_string(),
            Some(Value::Object(map)) if map.is_empty() => "-".to_string(),
            Some(other) => other.to_string(),
        }
    }
}
