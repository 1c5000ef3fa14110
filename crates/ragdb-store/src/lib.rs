//! ragdb-store
//!
//! Filesystem persistence for the index snapshot: five coupled JSON
//! artifacts written together under one directory and validated as a
//! unit on load. Publication is atomic (stage into a temp directory,
//! rename into place) so readers never observe a half-written snapshot.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod snapshot;

pub use snapshot::FsSnapshotStore;
