//! Query vectorization against a fixed vocabulary.

use ragdb_core::types::Vocabulary;
use ragdb_index::builder::tfidf_row;
use ragdb_index::tokenize;

/// Transient sparse query vector, entries sorted by column index.
/// Built per query, never persisted.
#[derive(Debug, Clone)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    /// True when no query term hit the vocabulary; such a vector scores
    /// zero everywhere and ranking can short-circuit.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map a query string into the snapshot's vector space: same
/// tokenization rule as ingest, out-of-vocabulary terms dropped, counts
/// weighted by idf and L2-normalized. No relearning happens here; the
/// vocabulary and idf come from the snapshot as-is.
pub fn vectorize(query: &str, vocabulary: &Vocabulary, idf: &[f32]) -> SparseVector {
    SparseVector { entries: tfidf_row(&tokenize::terms(query), vocabulary, idf) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_vocab() -> (Vocabulary, Vec<f32>) {
        let vocab = Vocabulary::from_terms(vec![
            "cat".to_string(),
            "dog".to_string(),
            "cat dog".to_string(),
        ]);
        (vocab, vec![1.5, 1.5, 2.0])
    }

    #[test]
    fn query_vector_is_l2_normalized() {
        let (vocab, idf) = small_vocab();
        let v = vectorize("cat dog", &vocab, &idf);
        let norm: f32 = v.entries().iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_vocabulary_terms_are_dropped() {
        let (vocab, idf) = small_vocab();
        let v = vectorize("cat spaceship", &vocab, &idf);
        assert_eq!(v.entries().len(), 1);
        assert_eq!(v.entries()[0].0, 0);
    }

    #[test]
    fn zero_overlap_query_yields_zero_vector() {
        let (vocab, idf) = small_vocab();
        assert!(vectorize("quantum entanglement", &vocab, &idf).is_zero());
    }
}
