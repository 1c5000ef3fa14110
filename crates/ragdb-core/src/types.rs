//! Domain types shared by the index builder, store and query engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// A source document collected from the corpus directory.
///
/// `path` is the stable identity of the document (relative to the corpus
/// root); `text` is the full lossy-decoded UTF-8 content. Documents are
/// transient ingest input and are never persisted themselves.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: String,
    pub text: String,
}

/// One overlapping window of a source document, the unit of indexing
/// and retrieval. `chunk_id` is the window position within the parent
/// document, starting at 0. One chunk = one matrix row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub source: String,
    pub chunk_id: usize,
    pub text: String,
}

/// A ranked retrieval result. `score` is cosine similarity in [0, 1];
/// higher is always better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedChunk {
    pub score: f32,
    pub source: String,
    pub chunk_id: usize,
    pub text: String,
}

/// Term → column index mapping, built once at ingest and read-only
/// afterwards. Indices are unique and contiguous in `[0, len)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    terms: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from an ordered term list; index = position in the list.
    pub fn from_terms(ordered: Vec<String>) -> Self {
        let terms = ordered
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t, i))
            .collect();
        Self { terms }
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when the stored indices are exactly `{0, .., len-1}`: no
    /// duplicates, no gaps, nothing out of range. A deserialized
    /// mapping can violate this even when its length looks right.
    pub fn indices_are_contiguous(&self) -> bool {
        let mut seen = vec![false; self.terms.len()];
        for &i in self.terms.values() {
            if i >= seen.len() || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }
}

/// Row-compressed sparse matrix of non-negative f32 weights.
///
/// `row_ptr` has `rows + 1` entries; row `r` occupies
/// `col_idx[row_ptr[r]..row_ptr[r+1]]` / `values[..]`, column indices
/// strictly increasing within a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f32>,
}

impl CsrMatrix {
    pub fn with_cols(cols: usize) -> Self {
        Self { rows: 0, cols, row_ptr: vec![0], col_idx: Vec::new(), values: Vec::new() }
    }

    /// Append a row given its non-zero entries, sorted by column index.
    pub fn push_row(&mut self, entries: &[(usize, f32)]) {
        for &(col, value) in entries {
            debug_assert!(col < self.cols);
            self.col_idx.push(col);
            self.values.push(value);
        }
        self.rows += 1;
        self.row_ptr.push(self.col_idx.len());
    }

    /// Non-zero entries of row `r` as parallel (columns, values) slices.
    pub fn row(&self, r: usize) -> (&[usize], &[f32]) {
        let lo = self.row_ptr[r];
        let hi = self.row_ptr[r + 1];
        (&self.col_idx[lo..hi], &self.values[lo..hi])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Internal shape consistency, checked when a snapshot is loaded.
    /// Column indices must be strictly increasing within each row;
    /// scoring merges rows against the query by sorted order and would
    /// silently drop matches otherwise.
    pub fn shape_is_consistent(&self) -> bool {
        self.row_ptr.len() == self.rows + 1
            && self.row_ptr.first() == Some(&0)
            && self.row_ptr.last() == Some(&self.values.len())
            && self.col_idx.len() == self.values.len()
            && self.row_ptr.windows(2).all(|w| w[0] <= w[1])
            && self.col_idx.iter().all(|&c| c < self.cols)
            && (0..self.rows).all(|r| {
                self.col_idx[self.row_ptr[r]..self.row_ptr[r + 1]]
                    .windows(2)
                    .all(|w| w[0] < w[1])
            })
    }
}

/// Structural fingerprint of a snapshot, written at ingest and checked
/// against the other artifacts on every load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexParams {
    pub kind: String,
    pub rows: usize,
    pub cols: usize,
}

impl IndexParams {
    pub const KIND_TFIDF: &'static str = "tfidf";
}

/// The four coupled index artifacts plus their fingerprint, constructed
/// together at ingest and loaded read-only for every query.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    pub params: IndexParams,
    pub vocabulary: Vocabulary,
    pub idf: Vec<f32>,
    pub matrix: CsrMatrix,
    pub meta: Vec<DocumentChunk>,
}

impl IndexSnapshot {
    /// Cross-artifact structural invariants. The artifacts are only
    /// meaningful together; any mismatch means the snapshot is corrupt.
    pub fn validate(&self) -> Result<()> {
        if self.params.kind != IndexParams::KIND_TFIDF {
            return Err(Error::CorruptSnapshot(format!(
                "unsupported index kind '{}'",
                self.params.kind
            )));
        }
        if !self.matrix.shape_is_consistent() {
            return Err(Error::CorruptSnapshot(
                "matrix row pointers do not match stored entries".to_string(),
            ));
        }
        if !self.vocabulary.indices_are_contiguous() {
            return Err(Error::CorruptSnapshot(format!(
                "vocabulary indices are not unique and contiguous in [0, {})",
                self.vocabulary.len()
            )));
        }
        if self.params.cols != self.vocabulary.len()
            || self.params.cols != self.idf.len()
            || self.params.cols != self.matrix.cols()
        {
            return Err(Error::CorruptSnapshot(format!(
                "column count mismatch: params={}, vocabulary={}, idf={}, matrix={}",
                self.params.cols,
                self.vocabulary.len(),
                self.idf.len(),
                self.matrix.cols()
            )));
        }
        if self.params.rows != self.meta.len() || self.params.rows != self.matrix.rows() {
            return Err(Error::CorruptSnapshot(format!(
                "row count mismatch: params={}, meta={}, matrix={}",
                self.params.rows,
                self.meta.len(),
                self.matrix.rows()
            )));
        }
        Ok(())
    }
}
