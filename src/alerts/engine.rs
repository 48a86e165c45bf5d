use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{AckKind, AlertSource, BatchRecord, InventoryItem, SystemAlert};

use super::detection::{derive_expiring, derive_low_stock, filter_system_alerts};
use super::render::render_feed;
use super::store::{AlertFeedState, RefreshSequencer, RefreshToken};
use super::types::{AckOutcome, AlertError, KpiSink, NotificationFeed};

/// Owns the bell state and every operation on it.
///
/// Each mutation returns the re-rendered feed so the badge is always derived
/// from the lists as they stand after the change. Acknowledge is local-only:
/// the next refresh of the same source re-surfaces anything the backend has
/// not cleared itself.
pub struct AlertAggregator {
    state: AlertFeedState,
    sequencer: RefreshSequencer,
    kpi_sink: Option<Arc<dyn KpiSink>>,
}

impl AlertAggregator {
    pub fn new() -> Self {
        Self {
            state: AlertFeedState::new(),
            sequencer: RefreshSequencer::new(),
            kpi_sink: None,
        }
    }

    pub fn with_kpi_sink(kpi_sink: Arc<dyn KpiSink>) -> Self {
        Self {
            kpi_sink: Some(kpi_sink),
            ..Self::new()
        }
    }

    pub fn state(&self) -> &AlertFeedState {
        &self.state
    }

    pub fn render(&self) -> NotificationFeed {
        render_feed(&self.state)
    }

    // ── Unguarded replace (last writer wins) ───────────────

    pub fn replace_low_stock(&mut self, items: &[InventoryItem]) -> NotificationFeed {
        self.state.low_stock = derive_low_stock(items);
        tracing::debug!(count = self.state.low_stock.len(), "Low-stock slice replaced");
        self.render()
    }

    pub fn replace_expiring(&mut self, batches: &[BatchRecord]) -> NotificationFeed {
        self.replace_expiring_at(batches, Utc::now())
    }

    /// `replace_expiring` against an explicit clock.
    pub fn replace_expiring_at(
        &mut self,
        batches: &[BatchRecord],
        now: DateTime<Utc>,
    ) -> NotificationFeed {
        self.state.expiring = derive_expiring(batches, now);
        let count = self.state.expiring.len();
        tracing::debug!(count, scanned = batches.len(), "Expiring slice replaced");
        if let Some(sink) = &self.kpi_sink {
            sink.expiring_count_changed(count);
        }
        self.render()
    }

    pub fn replace_system_alerts(&mut self, alerts: &[SystemAlert]) -> NotificationFeed {
        self.state.system = filter_system_alerts(alerts);
        tracing::debug!(
            count = self.state.system.len(),
            received = alerts.len(),
            "System alert slice replaced"
        );
        self.render()
    }

    // ── Guarded replace (refresh tokens) ───────────────────

    /// Issue a token before starting a fetch for `source`.
    pub fn begin_refresh(&mut self, source: AlertSource) -> RefreshToken {
        self.sequencer.issue(source)
    }

    fn accept(&mut self, token: RefreshToken, expected: AlertSource) -> bool {
        if token.source != expected {
            tracing::warn!(
                token_source = token.source.as_str(),
                expected = expected.as_str(),
                "Refresh token used for the wrong source, dropping payload"
            );
            return false;
        }
        if !self.sequencer.accept(token) {
            tracing::debug!(
                source = token.source.as_str(),
                sequence = token.sequence,
                "Dropping out-of-order refresh"
            );
            return false;
        }
        true
    }

    /// Apply an inventory snapshot unless a newer one already landed.
    pub fn apply_low_stock(
        &mut self,
        token: RefreshToken,
        items: &[InventoryItem],
    ) -> Option<NotificationFeed> {
        self.accept(token, AlertSource::LowStock)
            .then(|| self.replace_low_stock(items))
    }

    pub fn apply_expiring(
        &mut self,
        token: RefreshToken,
        batches: &[BatchRecord],
        now: DateTime<Utc>,
    ) -> Option<NotificationFeed> {
        self.accept(token, AlertSource::Expiring)
            .then(|| self.replace_expiring_at(batches, now))
    }

    pub fn apply_system_alerts(
        &mut self,
        token: RefreshToken,
        alerts: &[SystemAlert],
    ) -> Option<NotificationFeed> {
        self.accept(token, AlertSource::System)
            .then(|| self.replace_system_alerts(alerts))
    }

    // ── Acknowledge ────────────────────────────────────────

    /// Remove one entry locally. Unknown identifiers are a no-op.
    pub fn acknowledge(&mut self, kind: AckKind, identifier: &str) -> AckOutcome {
        let removed = match kind {
            AckKind::Stock => self.state.remove_low_stock(identifier),
            AckKind::Expiry => self.state.remove_expiring(identifier),
        };

        if removed {
            tracing::info!(kind = kind.as_str(), identifier, "Alert acknowledged locally");
        } else {
            tracing::debug!(kind = kind.as_str(), identifier, "Acknowledge matched nothing");
        }

        AckOutcome {
            removed,
            feed: self.render(),
        }
    }

    /// `acknowledge` with the kind given as presentation-layer text.
    pub fn acknowledge_str(
        &mut self,
        kind: &str,
        identifier: &str,
    ) -> Result<AckOutcome, AlertError> {
        let kind: AckKind = kind
            .parse()
            .map_err(|_| AlertError::InvalidAckKind(kind.to_string()))?;
        Ok(self.acknowledge(kind, identifier))
    }
}

impl Default for AlertAggregator {
    fn default() -> Self {
        Self::new()
    }
}
