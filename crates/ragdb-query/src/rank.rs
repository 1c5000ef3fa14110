//! Cosine scoring and top-k selection.

use ragdb_core::types::{CsrMatrix, DocumentChunk, RankedChunk};

use crate::vectorize::SparseVector;

/// Score the query vector against every matrix row and return at most
/// `k` results above `min_score`, best first.
///
/// Both sides are L2-normalized, so the sparse dot product is cosine
/// similarity in [0, 1]. Rows at or below `min_score` are dropped
/// before selection; ties break by ascending row index. An empty
/// result is a valid answer, not an error.
pub fn rank(
    query: &SparseVector,
    matrix: &CsrMatrix,
    meta: &[DocumentChunk],
    k: usize,
    min_score: f32,
) -> Vec<RankedChunk> {
    if query.is_zero() {
        return Vec::new();
    }

    let mut candidates: Vec<(usize, f32)> = (0..matrix.rows())
        .map(|r| (r, dot(query, matrix, r)))
        .filter(|&(_, score)| score > min_score)
        .collect();

    // Descending score; equal scores keep ascending row order.
    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    candidates.truncate(k);

    candidates
        .into_iter()
        .map(|(row, score)| {
            let m = &meta[row];
            RankedChunk {
                score,
                source: m.source.clone(),
                chunk_id: m.chunk_id,
                text: m.text.clone(),
            }
        })
        .collect()
}

/// Sparse-sparse dot product of the query vector and row `r`, by
/// two-pointer merge over the sorted column indices.
fn dot(query: &SparseVector, matrix: &CsrMatrix, r: usize) -> f32 {
    let (cols, values) = matrix.row(r);
    let entries = query.entries();
    let mut sum = 0.0f32;
    let (mut i, mut j) = (0usize, 0usize);
    while i < entries.len() && j < cols.len() {
        match entries[i].0.cmp(&cols[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += entries[i].1 * values[j];
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
