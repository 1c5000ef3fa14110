//! The fixed tokenization rule shared by ingest and query.
//!
//! Lowercase; word tokens are maximal alphanumeric runs of at least two
//! characters; terms are the unigrams plus adjacent-pair bigrams joined
//! by a single space. Changing this rule invalidates every persisted
//! snapshot, so both pipelines must call into this module.

/// Lowercased word tokens of `text`, in order of appearance.
/// Single-character runs are dropped.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Unigram and bigram terms of `text`, unigrams first.
pub fn terms(text: &str) -> Vec<String> {
    let words = word_tokens(text);
    let mut terms = Vec::with_capacity(words.len().saturating_mul(2));
    terms.extend(words.iter().cloned());
    for pair in words.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}
