//! Batch identity resolution.
//!
//! Batches reach the bell from routes that disagree on the identity field, so
//! the row id is the first present candidate of `id`, `_id`, `batch_number`.
//! Resolution never fails; an empty chain yields `SourceId::Unresolved`
//! rather than a shared placeholder string that would collide across records.

use crate::models::BatchRecord;

use super::types::SourceId;

/// Resolve the first non-empty candidate, in order.
pub fn resolve_first<'a, I>(candidates: I) -> SourceId
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(|value| SourceId::Resolved(value.to_string()))
        .unwrap_or(SourceId::Unresolved)
}

pub fn resolve_batch_id(batch: &BatchRecord) -> SourceId {
    resolve_first([
        batch.id.as_deref(),
        batch.object_id.as_deref(),
        batch.batch_number.as_deref(),
    ])
}
