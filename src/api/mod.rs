//! REST access to the inventory backend.
//!
//! `ApiClient` wraps every route the dashboard calls. `AlertBackend` is the
//! narrow seam the alert refresh path depends on.

pub mod client;
pub mod error;

pub use client::{AlertBackend, ApiClient};
pub use error::ApiError;
