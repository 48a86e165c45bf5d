//! Shared dashboard state.
//!
//! `DashboardState` owns the alert aggregator behind a `RwLock` plus the
//! backend handle. Fetches never run under the lock: a refresh takes a token,
//! releases the lock, awaits the backend, then re-locks to apply.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::alerts::{AckOutcome, AlertAggregator, AlertCounts, AlertError, KpiSink, NotificationFeed};
use crate::analytics::AnalyticsView;
use crate::api::{AlertBackend, ApiClient, ApiError};
use crate::home::{build_home_data, HomeData};
use crate::models::{AckKind, AlertSource};

/// Expiring-batch KPI, fed by the aggregator on every expiring refresh.
#[derive(Debug, Default)]
pub struct ExpiringKpi(AtomicUsize);

impl ExpiringKpi {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl KpiSink for ExpiringKpi {
    fn expiring_count_changed(&self, count: usize) {
        self.0.store(count, Ordering::Relaxed);
    }
}

/// Outcome of refreshing all three alert sources together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub feed: NotificationFeed,
    /// Sources whose fetch failed; their slices were left as they were.
    pub failed: Vec<AlertSource>,
}

pub struct DashboardState<B = ApiClient> {
    alerts: RwLock<AlertAggregator>,
    backend: B,
    expiring_kpi: Arc<ExpiringKpi>,
    analytics: Mutex<AnalyticsView>,
}

impl<B: AlertBackend> DashboardState<B> {
    pub fn new(backend: B) -> Self {
        let expiring_kpi = Arc::new(ExpiringKpi::default());
        Self {
            alerts: RwLock::new(AlertAggregator::with_kpi_sink(expiring_kpi.clone())),
            backend,
            expiring_kpi,
            analytics: Mutex::new(AnalyticsView::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn read_alerts(&self) -> Result<RwLockReadGuard<'_, AlertAggregator>, CoreError> {
        self.alerts.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_alerts(&self) -> Result<RwLockWriteGuard<'_, AlertAggregator>, CoreError> {
        self.alerts.write().map_err(|_| CoreError::LockPoisoned)
    }

    /// Current bell contents.
    pub fn feed(&self) -> Result<NotificationFeed, CoreError> {
        Ok(self.read_alerts()?.render())
    }

    pub fn counts(&self) -> Result<AlertCounts, CoreError> {
        Ok(self.read_alerts()?.state().counts())
    }

    pub fn expiring_count(&self) -> usize {
        self.expiring_kpi.get()
    }

    // ── Refresh ────────────────────────────────────────────

    /// Fetch inventory and rebuild the low-stock slice. `Ok(None)` means a
    /// newer refresh already landed and this snapshot was dropped.
    pub async fn refresh_low_stock(&self) -> Result<Option<NotificationFeed>, CoreError> {
        let token = self.write_alerts()?.begin_refresh(AlertSource::LowStock);
        let items = self.backend.inventory().await?;
        Ok(self.write_alerts()?.apply_low_stock(token, &items))
    }

    pub async fn refresh_expiring(&self) -> Result<Option<NotificationFeed>, CoreError> {
        let token = self.write_alerts()?.begin_refresh(AlertSource::Expiring);
        let batches = self.backend.batches().await?;
        Ok(self
            .write_alerts()?
            .apply_expiring(token, &batches, Utc::now()))
    }

    pub async fn refresh_system_alerts(&self) -> Result<Option<NotificationFeed>, CoreError> {
        let token = self.write_alerts()?.begin_refresh(AlertSource::System);
        let alerts = self.backend.system_alerts().await?;
        Ok(self.write_alerts()?.apply_system_alerts(token, &alerts))
    }

    /// Refresh all three sources concurrently. A failed fetch is logged and
    /// reported; the other sources still apply.
    pub async fn refresh_all(&self) -> Result<RefreshReport, CoreError> {
        let (low_stock, expiring, system) = tokio::join!(
            self.refresh_low_stock(),
            self.refresh_expiring(),
            self.refresh_system_alerts(),
        );

        let mut failed = Vec::new();
        for (source, result) in [
            (AlertSource::LowStock, low_stock),
            (AlertSource::Expiring, expiring),
            (AlertSource::System, system),
        ] {
            match result {
                Ok(_) => {}
                Err(CoreError::Api(e)) => {
                    tracing::warn!(source = source.as_str(), error = %e, "Alert source refresh failed");
                    failed.push(source);
                }
                Err(e) => return Err(e),
            }
        }

        let feed = self.feed()?;
        tracing::info!(
            rows = feed.rows.len(),
            failed = failed.len(),
            "Notification feed refreshed"
        );
        Ok(RefreshReport { feed, failed })
    }

    // ── Acknowledge ────────────────────────────────────────

    pub fn acknowledge(&self, kind: AckKind, identifier: &str) -> Result<AckOutcome, CoreError> {
        Ok(self.write_alerts()?.acknowledge(kind, identifier))
    }

    pub fn acknowledge_str(&self, kind: &str, identifier: &str) -> Result<AckOutcome, CoreError> {
        Ok(self.write_alerts()?.acknowledge_str(kind, identifier)?)
    }

    // ── Analytics ──────────────────────────────────────────

    /// Cache a live analytics payload. Returns it when the view should redraw.
    pub fn on_analytics_update(&self, payload: Value) -> Result<Option<Value>, CoreError> {
        let mut view = self.analytics.lock().map_err(|_| CoreError::LockPoisoned)?;
        Ok(view.on_update(payload).cloned())
    }

    /// Mark the analytics view visible; returns the cached payload to draw.
    pub fn show_analytics(&self) -> Result<Option<Value>, CoreError> {
        let mut view = self.analytics.lock().map_err(|_| CoreError::LockPoisoned)?;
        Ok(view.show().cloned())
    }

    pub fn hide_analytics(&self) -> Result<(), CoreError> {
        self.analytics
            .lock()
            .map_err(|_| CoreError::LockPoisoned)?
            .hide();
        Ok(())
    }
}

impl DashboardState<ApiClient> {
    /// KPIs, critical restock table and AI summary for the home page.
    /// A failed AI call falls back to placeholder text.
    pub async fn load_home(&self) -> Result<HomeData, CoreError> {
        let (inventory, branches, ai) = tokio::join!(
            self.backend.fetch_inventory(),
            self.backend.fetch_branches(),
            self.backend.fetch_ai_dashboard(),
        );
        let inventory = inventory?;
        let branches = branches?;
        let ai = match ai {
            Ok(ai) => Some(ai),
            Err(e) => {
                tracing::warn!(error = %e, "AI dashboard unavailable");
                None
            }
        };

        Ok(build_home_data(
            &inventory,
            branches.len(),
            self.expiring_count(),
            ai.as_ref(),
            Utc::now(),
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
