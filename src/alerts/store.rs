use serde::Serialize;

use crate::models::{AlertSource, SystemAlert};

use super::types::{AlertCounts, ExpiringEntry, LowStockEntry};

/// The three bell slices. Each slice is replaced wholesale by its source;
/// acknowledge only ever removes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertFeedState {
    pub(crate) low_stock: Vec<LowStockEntry>,
    pub(crate) expiring: Vec<ExpiringEntry>,
    pub(crate) system: Vec<SystemAlert>,
}

impl AlertFeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn low_stock(&self) -> &[LowStockEntry] {
        &self.low_stock
    }

    pub fn expiring(&self) -> &[ExpiringEntry] {
        &self.expiring
    }

    pub fn system(&self) -> &[SystemAlert] {
        &self.system
    }

    pub fn counts(&self) -> AlertCounts {
        AlertCounts {
            low_stock: self.low_stock.len(),
            expiring: self.expiring.len(),
            system: self.system.len(),
        }
    }

    /// Remove the first low-stock entry named `name`.
    pub(crate) fn remove_low_stock(&mut self, name: &str) -> bool {
        match self.low_stock.iter().position(|e| e.name == name) {
            Some(index) => {
                self.low_stock.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the first expiring entry carrying `identifier` in any id field.
    pub(crate) fn remove_expiring(&mut self, identifier: &str) -> bool {
        match self
            .expiring
            .iter()
            .position(|e| e.matches_identifier(identifier))
        {
            Some(index) => {
                self.expiring.remove(index);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Refresh tokens
// ---------------------------------------------------------------------------

/// Ticket handed out when a fetch for one source starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken {
    pub source: AlertSource,
    pub sequence: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct SourceSequence {
    issued: u64,
    applied: u64,
}

/// Per-source monotonic counters. A response is applied only if its token
/// is newer than the last one applied for the same source.
#[derive(Debug, Clone, Default)]
pub struct RefreshSequencer {
    low_stock: SourceSequence,
    expiring: SourceSequence,
    system: SourceSequence,
}

impl RefreshSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, source: AlertSource) -> &mut SourceSequence {
        match source {
            AlertSource::LowStock => &mut self.low_stock,
            AlertSource::Expiring => &mut self.expiring,
            AlertSource::System => &mut self.system,
        }
    }

    pub fn issue(&mut self, source: AlertSource) -> RefreshToken {
        let slot = self.slot(source);
        slot.issued += 1;
        RefreshToken {
            source,
            sequence: slot.issued,
        }
    }

    /// Record `token` as applied. Returns false if a newer one already was.
    pub fn accept(&mut self, token: RefreshToken) -> bool {
        let slot = self.slot(token.source);
        if token.sequence <= slot.applied {
            return false;
        }
        slot.applied = token.sequence;
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::alerts::types::SourceId;

    fn low(name: &str, branch: &str) -> LowStockEntry {
        LowStockEntry {
            name: name.into(),
            branch: branch.into(),
            quantity: 1,
        }
    }

    #[test]
    fn remove_low_stock_takes_only_first_match() {
        let mut state = AlertFeedState::new();
        state.low_stock = vec![low("Widget", "Main"), low("Widget", "North")];
        assert!(state.remove_low_stock("Widget"));
        assert_eq!(state.low_stock, vec![low("Widget", "North")]);
        assert!(!state.remove_low_stock("Gizmo"));
    }

    #[test]
    fn remove_expiring_by_batch_number() {
        let mut state = AlertFeedState::new();
        state.expiring = vec![ExpiringEntry {
            item_name: "Milk".into(),
            branch: "Main".into(),
            days_left: 2,
            expires_at: Utc::now(),
            source_id: SourceId::Resolved("B1".into()),
            id: None,
            object_id: None,
            batch_number: Some("B1".into()),
        }];
        assert!(state.remove_expiring("B1"));
        assert!(state.expiring.is_empty());
    }

    #[test]
    fn tokens_increase_per_source() {
        let mut seq = RefreshSequencer::new();
        let a = seq.issue(AlertSource::LowStock);
        let b = seq.issue(AlertSource::LowStock);
        let c = seq.issue(AlertSource::System);
        assert_eq!(a.sequence, 1);
        assert_eq!(b.sequence, 2);
        assert_eq!(c.sequence, 1);
    }

    #[test]
    fn stale_token_is_rejected() {
        let mut seq = RefreshSequencer::new();
        let older = seq.issue(AlertSource::Expiring);
        let newer = seq.issue(AlertSource::Expiring);
        assert!(seq.accept(newer));
        assert!(!seq.accept(older));
        assert!(!seq.accept(newer), "same token twice");
    }

    #[test]
    fn sources_do_not_interfere() {
        let mut seq = RefreshSequencer::new();
        let stock = seq.issue(AlertSource::LowStock);
        let _ = seq.issue(AlertSource::System);
        let system = seq.issue(AlertSource::System);
        assert!(seq.accept(system));
        assert!(seq.accept(stock));
    }
}
