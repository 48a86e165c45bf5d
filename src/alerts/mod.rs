//! Notification bell: merges low-stock inventory, expiring batches and
//! backend system alerts into one feed with a capped badge.

pub mod detection;
pub mod engine;
pub mod identity;
pub mod render;
pub mod store;
pub mod types;

pub use engine::AlertAggregator;
pub use store::{AlertFeedState, RefreshToken};
pub use types::*;
