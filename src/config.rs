use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "PremierLux";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend the dashboard talks to when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Per-request timeout for backend calls.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Batches expiring within this many days (inclusive) reach the bell.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Badge counts above this render as `"9+"`.
pub const BADGE_DISPLAY_CAP: usize = 9;

/// Rows in the dashboard's critical restock table.
pub const CRITICAL_RESTOCK_LIMIT: usize = 5;

const ENV_API_BASE: &str = "PREMIERLUX_API_BASE";
const ENV_HTTP_TIMEOUT: &str = "PREMIERLUX_HTTP_TIMEOUT_SECS";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "premierlux_lib=info,reqwest=warn"
}

/// Resolved backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Read `PREMIERLUX_API_BASE` / `PREMIERLUX_HTTP_TIMEOUT_SECS`, falling back
    /// to the defaults. A malformed timeout is logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_BASE)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout_secs = match lookup(ENV_HTTP_TIMEOUT) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(var = ENV_HTTP_TIMEOUT, value = %raw, "Invalid timeout, using default");
                DEFAULT_HTTP_TIMEOUT_SECS
            }),
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_API_BASE,
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        )
    }
}
