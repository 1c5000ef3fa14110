use crate::types::{IndexSnapshot, RankedChunk};

/// Read side of the pipeline: rank chunks against a free-form query.
///
/// Implementations hold an immutable snapshot, so `&self` queries may be
/// shared across threads freely.
pub trait SearchEngine: Send + Sync {
    fn query(&self, query: &str, k: usize, min_score: f32) -> anyhow::Result<Vec<RankedChunk>>;
}

/// Persistence seam for the index artifacts. `save` must publish
/// atomically; `load` must validate structural consistency before
/// returning a snapshot.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, snapshot: &IndexSnapshot) -> anyhow::Result<()>;
    fn load(&self) -> anyhow::Result<IndexSnapshot>;
}
