use serde::{Deserialize, Serialize};

use super::enums::SYNTHESIZED_ALERT_TYPES;
use super::lenient;

/// A backend-originated notification from `GET /api/alerts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemAlert {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::opt_string")]
    pub alert_type: Option<String>,
}

impl SystemAlert {
    /// True for alert types the bell already derives from local snapshots.
    pub fn is_synthesized_locally(&self) -> bool {
        self.alert_type
            .as_deref()
            .is_some_and(|t| SYNTHESIZED_ALERT_TYPES.contains(&t))
    }
}
