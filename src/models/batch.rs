use serde::{Deserialize, Serialize};

use super::lenient;

/// One stock batch as returned by `GET /api/batches`.
///
/// The backend has shipped both `exp_date` and `expiration_date`, and identifies
/// batches by `id`, Mongo's `_id` or a human `batch_number` depending on the
/// route that produced the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub item_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub branch: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub exp_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub expiration_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "lenient::opt_string")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub batch_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub quantity: Option<i64>,
}

impl BatchRecord {
    /// Raw expiration text, preferring `exp_date`. Blank values fall through.
    pub fn expiration_raw(&self) -> Option<&str> {
        [&self.exp_date, &self.expiration_date]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|s| !s.trim().is_empty())
    }
}

/// Body of `POST /api/batches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBatch {
    pub item_name: String,
    pub branch: String,
    pub quantity: i64,
    pub exp_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
}
