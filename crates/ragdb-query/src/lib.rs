//! ragdb-query
//!
//! Read side of the pipeline: vectorize a query string against the
//! fixed vocabulary and idf of a loaded snapshot, score it against
//! every matrix row, and return the top-k chunks. Nothing here mutates
//! the snapshot; a `Retriever` is load-once, serve-many.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod rank;
pub mod retriever;
pub mod vectorize;

pub use retriever::Retriever;
pub use vectorize::SparseVector;
