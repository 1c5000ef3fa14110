//! Load-once retrieval facade over a persisted snapshot.

use std::path::PathBuf;
use tracing::debug;

use ragdb_core::error::Result;
use ragdb_core::traits::SearchEngine;
use ragdb_core::types::{IndexSnapshot, RankedChunk};
use ragdb_store::FsSnapshotStore;

use crate::rank::rank;
use crate::vectorize::vectorize;

/// Holds a validated, immutable snapshot and serves ranked retrieval.
///
/// Open once per process and share by reference: every field is
/// read-only after `open`, so concurrent `retrieve` calls observe the
/// same consistent snapshot without locking.
#[derive(Debug)]
pub struct Retriever {
    snapshot: IndexSnapshot,
}

impl Retriever {
    /// Load and validate the snapshot under `index_dir`. Fails fast
    /// with `IndexUnavailable` when no snapshot was ingested.
    pub fn open(index_dir: PathBuf) -> Result<Self> {
        let snapshot = FsSnapshotStore::new(index_dir).load()?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Wrap an already-loaded snapshot (in-memory pipelines, tests).
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &IndexSnapshot {
        &self.snapshot
    }

    /// Rank chunks for a free-form query. Blank queries short-circuit
    /// before tokenization and return no results.
    pub fn retrieve(&self, query: &str, k: usize, min_score: f32) -> Vec<RankedChunk> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let q = vectorize(query, &self.snapshot.vocabulary, &self.snapshot.idf);
        if q.is_zero() {
            debug!(query, "no vocabulary overlap");
            return Vec::new();
        }
        rank(&q, &self.snapshot.matrix, &self.snapshot.meta, k, min_score)
    }
}

impl SearchEngine for Retriever {
    fn query(&self, query: &str, k: usize, min_score: f32) -> anyhow::Result<Vec<RankedChunk>> {
        Ok(self.retrieve(query, k, min_score))
    }
}
