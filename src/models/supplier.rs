use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub lead_time_days: Option<i64>,
}

impl Supplier {
    /// Avatar letter for the supplier card.
    pub fn initial(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }
}

/// Body of `POST /api/suppliers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_uppercased() {
        let supplier = Supplier {
            name: " acme foods".into(),
            ..Default::default()
        };
        assert_eq!(supplier.initial(), Some('A'));
        assert_eq!(Supplier::default().initial(), None);
    }

    #[test]
    fn lead_time_accepts_string() {
        let supplier: Supplier =
            serde_json::from_str(r#"{"name":"Acme","lead_time_days":"5"}"#).unwrap();
        assert_eq!(supplier.lead_time_days, Some(5));
    }
}
