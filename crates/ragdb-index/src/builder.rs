//! TF-IDF index construction.

use std::collections::{HashMap, HashSet};
use tracing::info;

use ragdb_core::types::{CsrMatrix, DocumentChunk, IndexParams, IndexSnapshot, Vocabulary};

use crate::tokenize;

/// Builds the full index snapshot from an ordered chunk sequence.
/// Chunk order is preserved: chunk `r` becomes matrix row `r` and
/// metadata record `r`.
#[derive(Debug, Clone, Copy)]
pub struct IndexBuilder {
    max_vocab_size: usize,
}

impl IndexBuilder {
    pub fn new(max_vocab_size: usize) -> Self {
        Self { max_vocab_size }
    }

    pub fn build(&self, chunks: &[DocumentChunk]) -> IndexSnapshot {
        let chunk_terms: Vec<Vec<String>> =
            chunks.iter().map(|c| tokenize::terms(&c.text)).collect();

        let vocabulary = self.select_vocabulary(&chunk_terms);
        let idf = compute_idf(&chunk_terms, &vocabulary, chunks.len());
        let matrix = weigh_and_normalize(&chunk_terms, &vocabulary, &idf);

        info!(
            rows = matrix.rows(),
            terms = vocabulary.len(),
            "built tfidf index"
        );

        IndexSnapshot {
            params: IndexParams {
                kind: IndexParams::KIND_TFIDF.to_string(),
                rows: matrix.rows(),
                cols: vocabulary.len(),
            },
            vocabulary,
            idf,
            matrix,
            meta: chunks.to_vec(),
        }
    }

    /// Top `max_vocab_size` terms by global frequency, ties broken by
    /// lexicographic term order; column indices follow selection order.
    fn select_vocabulary(&self, chunk_terms: &[Vec<String>]) -> Vocabulary {
        let mut global_tf: HashMap<&str, u64> = HashMap::new();
        for terms in chunk_terms {
            for term in terms {
                *global_tf.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(&str, u64)> = global_tf.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_vocab_size);
        Vocabulary::from_terms(ranked.into_iter().map(|(t, _)| t.to_string()).collect())
    }
}

/// Smoothed idf: `ln((1 + rows) / (1 + df)) + 1`, strictly positive for
/// every term, including one present in every chunk.
fn compute_idf(chunk_terms: &[Vec<String>], vocabulary: &Vocabulary, rows: usize) -> Vec<f32> {
    let mut df = vec![0usize; vocabulary.len()];
    for terms in chunk_terms {
        let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
        for term in unique {
            if let Some(col) = vocabulary.index_of(term) {
                df[col] += 1;
            }
        }
    }
    df.into_iter()
        .map(|df| ((1 + rows) as f32 / (1 + df) as f32).ln() + 1.0)
        .collect()
}

fn weigh_and_normalize(
    chunk_terms: &[Vec<String>],
    vocabulary: &Vocabulary,
    idf: &[f32],
) -> CsrMatrix {
    let mut matrix = CsrMatrix::with_cols(vocabulary.len());
    for terms in chunk_terms {
        matrix.push_row(&tfidf_row(terms, vocabulary, idf));
    }
    matrix
}

/// One L2-normalized TF-IDF row: in-vocabulary term counts × idf,
/// divided by the Euclidean norm. A row with no vocabulary terms stays
/// all-zero (nothing to normalize). The query vectorizer applies the
/// same weighting to query text.
pub fn tfidf_row(
    terms: &[String],
    vocabulary: &Vocabulary,
    idf: &[f32],
) -> Vec<(usize, f32)> {
    let mut counts: HashMap<usize, f32> = HashMap::new();
    for term in terms {
        if let Some(col) = vocabulary.index_of(term) {
            *counts.entry(col).or_insert(0.0) += 1.0;
        }
    }
    let mut entries: Vec<(usize, f32)> =
        counts.into_iter().map(|(col, tf)| (col, tf * idf[col])).collect();
    entries.sort_unstable_by_key(|&(col, _)| col);

    let norm = entries.iter().map(|&(_, v)| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, v) in &mut entries {
            *v /= norm;
        }
    }
    entries
}
