//! Derivation of the three bell slices from raw snapshots.
//!
//! All functions are pure: they take a snapshot (and `now` where time
//! matters) and return the replacement slice. Malformed records are dropped
//! silently; nothing in here can fail.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::EXPIRY_WINDOW_DAYS;
use crate::models::{BatchRecord, InventoryItem, SystemAlert};

use super::identity::resolve_batch_id;
use super::types::{ExpiringEntry, LowStockEntry};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Naive timestamp layouts accepted after RFC 3339 / RFC 2822. Read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn derive_low_stock(items: &[InventoryItem]) -> Vec<LowStockEntry> {
    items
        .iter()
        .filter(|item| item.is_low_stock())
        .map(|item| LowStockEntry {
            name: item.name.clone(),
            branch: item.branch.clone(),
            quantity: item.quantity_or_zero(),
        })
        .collect()
}

/// Parse an expiration date the way the backend emits them.
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Flask's default JSON encoding: `Tue, 15 Nov 2026 08:12:31 GMT`
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Ceiling of the day difference; negative for past dates.
pub fn days_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = (expires_at - now).num_milliseconds();
    let floor = diff.div_euclid(MILLIS_PER_DAY);
    if diff.rem_euclid(MILLIS_PER_DAY) == 0 {
        floor
    } else {
        floor + 1
    }
}

pub fn derive_expiring(batches: &[BatchRecord], now: DateTime<Utc>) -> Vec<ExpiringEntry> {
    let mut entries = Vec::new();

    for batch in batches {
        let Some(raw) = batch.expiration_raw() else {
            tracing::debug!(item = %batch.item_name, "Batch has no expiration date, skipping");
            continue;
        };
        let Some(expires_at) = parse_expiration(raw) else {
            tracing::debug!(item = %batch.item_name, raw, "Unparseable expiration date, skipping");
            continue;
        };

        let days_left = days_until(expires_at, now);
        if days_left > EXPIRY_WINDOW_DAYS {
            continue;
        }

        entries.push(ExpiringEntry {
            item_name: batch.item_name.clone(),
            branch: batch.branch.clone(),
            days_left,
            expires_at,
            source_id: resolve_batch_id(batch),
            id: batch.id.clone(),
            object_id: batch.object_id.clone(),
            batch_number: batch.batch_number.clone(),
        });
    }

    entries
}

/// Drop backend alerts whose type the bell already derives locally.
pub fn filter_system_alerts(alerts: &[SystemAlert]) -> Vec<SystemAlert> {
    alerts
        .iter()
        .filter(|alert| !alert.is_synthesized_locally())
        .cloned()
        .collect()
}
