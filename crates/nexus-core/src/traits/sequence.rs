//! Atomic id sequence trait backing the identity allocator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::IdKind;

/// A per-kind monotonically increasing counter.
///
/// Implementations must be atomic: two concurrent calls for the same kind
/// never observe the same value. The first value handed out for a kind is
/// one greater than the largest id already persisted for it (1 when none
/// exist).
#[async_trait]
pub trait IdSequence: Send + Sync + std::fmt::Debug + 'static {
    /// Advance the sequence for `kind` and return the new value.
    async fn next_value(&self, kind: IdKind) -> AppResult<i64>;

    /// Return the last value handed out for `kind` without advancing it.
    async fn current_value(&self, kind: IdKind) -> AppResult<i64>;
}
