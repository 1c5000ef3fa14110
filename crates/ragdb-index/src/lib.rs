//! ragdb-index
//!
//! Tokenization and TF-IDF index construction: vocabulary selection,
//! inverse-document-frequency weights and the row-normalized sparse
//! matrix. The tokenization rule here is the one the query side must
//! reuse; it is part of the snapshot contract.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod builder;
pub mod tokenize;

pub use builder::IndexBuilder;
