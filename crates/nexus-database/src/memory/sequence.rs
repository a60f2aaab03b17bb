//! Atomic in-memory id sequence.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use nexus_core::result::AppResult;
use nexus_core::traits::IdSequence;
use nexus_core::types::IdKind;

use super::MemoryDatabase;

/// `fetch_add` on one counter per kind.
#[derive(Debug, Clone)]
pub struct MemoryIdSequence {
    db: Arc<MemoryDatabase>,
}

impl MemoryIdSequence {
    /// Create a sequence over the shared tables.
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdSequence for MemoryIdSequence {
    async fn next_value(&self, kind: IdKind) -> AppResult<i64> {
        Ok(self.db.sequence(kind).fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn current_value(&self, kind: IdKind) -> AppResult<i64> {
        Ok(self.db.sequence(kind).load(Ordering::SeqCst))
    }
}
