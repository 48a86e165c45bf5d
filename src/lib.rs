pub mod alerts; // Notification bell: low-stock, expiring and system alerts
pub mod analytics; // Live analytics cache + top-product ranking
pub mod api; // REST client for the inventory backend
pub mod config;
pub mod core_state; // Shared dashboard state
pub mod forms; // Form validation for create/adjust dialogs
pub mod home; // KPIs, critical restock, inventory filters
pub mod models;

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
