use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(AckKind {
    Stock => "stock",
    Expiry => "expiry",
});

str_enum!(AlertSource {
    LowStock => "low_stock",
    Expiring => "expiring",
    System => "system",
});

str_enum!(OrderStatus {
    Pending => "pending",
    Received => "received",
});

str_enum!(StockAction {
    In => "in",
    Out => "out",
    Set => "set",
});

/// Backend alert types that the bell synthesizes locally from inventory and
/// batch snapshots. Server copies of these are dropped to avoid double rows.
pub const SYNTHESIZED_ALERT_TYPES: &[&str] = &["low_stock", "expiry_risk"];
