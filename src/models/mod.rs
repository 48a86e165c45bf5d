pub mod activity_log;
pub mod alert;
pub mod analytics;
pub mod batch;
pub mod branch;
pub mod enums;
pub(crate) mod lenient;
pub mod inventory;
pub mod order;
pub mod supplier;

pub use activity_log::*;
pub use alert::*;
pub use analytics::*;
pub use batch::*;
pub use branch::*;
pub use enums::*;
pub use inventory::*;
pub use order::*;
pub use supplier::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
