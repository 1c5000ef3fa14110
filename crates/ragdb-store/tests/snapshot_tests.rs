use std::fs;
use tempfile::TempDir;

use ragdb_core::error::Error;
use ragdb_core::types::{DocumentChunk, IndexSnapshot};
use ragdb_index::IndexBuilder;
use ragdb_store::FsSnapshotStore;

fn build_snapshot(texts: &[&str]) -> IndexSnapshot {
    let chunks: Vec<DocumentChunk> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| DocumentChunk {
            source: format!("doc{i}.txt"),
            chunk_id: 0,
            text: (*t).to_string(),
        })
        .collect();
    IndexBuilder::new(30_000).build(&chunks)
}

#[test]
fn save_then_load_preserves_structure() {
    let tmp = TempDir::new().expect("tempdir");
    let store = FsSnapshotStore::new(tmp.path().join("index"));
    let snapshot = build_snapshot(&["the cat sat", "the dog ran"]);
    store.save(&snapshot).expect("save");

    let loaded = store.load().expect("load");
    assert_eq!(loaded.params.kind, "tfidf");
    assert_eq!(loaded.matrix.cols(), loaded.vocabulary.len());
    assert_eq!(loaded.matrix.cols(), loaded.idf.len());
    assert_eq!(loaded.matrix.rows(), loaded.meta.len());
    assert_eq!(loaded.meta.len(), 2);
    assert_eq!(loaded.meta[0].source, "doc0.txt");
    assert_eq!(
        loaded.vocabulary.index_of("cat"),
        snapshot.vocabulary.index_of("cat")
    );
}

#[test]
fn load_without_snapshot_is_index_unavailable() {
    let tmp = TempDir::new().expect("tempdir");
    let store = FsSnapshotStore::new(tmp.path().join("index"));
    assert!(!store.exists());
    let err = store.load().expect_err("no snapshot");
    assert!(matches!(err, Error::IndexUnavailable(_)));
    assert!(err.to_string().contains("ingest"), "error tells the caller to ingest");
}

#[test]
fn partially_deleted_snapshot_is_index_unavailable() {
    let tmp = TempDir::new().expect("tempdir");
    let index_dir = tmp.path().join("index");
    let store = FsSnapshotStore::new(index_dir.clone());
    store.save(&build_snapshot(&["some text here"])).expect("save");

    fs::remove_file(index_dir.join("idf.json")).expect("remove artifact");
    let err = store.load().expect_err("incomplete snapshot");
    assert!(matches!(err, Error::IndexUnavailable(_)));
}

#[test]
fn mismatched_params_are_a_structural_error() {
    let tmp = TempDir::new().expect("tempdir");
    let index_dir = tmp.path().join("index");
    let store = FsSnapshotStore::new(index_dir.clone());
    store.save(&build_snapshot(&["the cat sat", "the dog ran"])).expect("save");

    // Tamper with the fingerprint: claim one row too many.
    let params_path = index_dir.join("index_params.json");
    let params = fs::read_to_string(&params_path).expect("read params");
    let tampered = params.replace("\"rows\":2", "\"rows\":3");
    assert_ne!(params, tampered, "tamper must hit");
    fs::write(&params_path, tampered).expect("write params");

    let err = store.load().expect_err("tampered snapshot");
    assert!(matches!(err, Error::CorruptSnapshot(_)));
}

#[test]
fn out_of_range_vocabulary_index_fails_at_load() {
    let tmp = TempDir::new().expect("tempdir");
    let index_dir = tmp.path().join("index");
    let store = FsSnapshotStore::new(index_dir.clone());
    store.save(&build_snapshot(&["the cat sat", "the dog ran"])).expect("save");

    // Point "cat" far outside [0, cols) without changing the term count.
    let vocab_path = index_dir.join("vocab.json");
    let mut vocab: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&vocab_path).expect("read vocab"))
            .expect("parse vocab");
    vocab["cat"] = serde_json::json!(999_999);
    fs::write(&vocab_path, vocab.to_string()).expect("write vocab");

    // Must be rejected here, not as an out-of-bounds panic at query time.
    let err = store.load().expect_err("out-of-range index");
    assert!(matches!(err, Error::CorruptSnapshot(_)));
}

#[test]
fn duplicate_vocabulary_indices_fail_at_load() {
    let tmp = TempDir::new().expect("tempdir");
    let index_dir = tmp.path().join("index");
    let store = FsSnapshotStore::new(index_dir.clone());
    store.save(&build_snapshot(&["the cat sat", "the dog ran"])).expect("save");

    let vocab_path = index_dir.join("vocab.json");
    let mut vocab: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&vocab_path).expect("read vocab"))
            .expect("parse vocab");
    let dog_idx = vocab["dog"].clone();
    vocab["cat"] = dog_idx;
    fs::write(&vocab_path, vocab.to_string()).expect("write vocab");

    let err = store.load().expect_err("duplicate indices");
    assert!(matches!(err, Error::CorruptSnapshot(_)));
}

#[test]
fn new_ingest_replaces_previous_snapshot() {
    let tmp = TempDir::new().expect("tempdir");
    let store = FsSnapshotStore::new(tmp.path().join("index"));

    store.save(&build_snapshot(&["first corpus run"])).expect("first save");
    store
        .save(&build_snapshot(&["second corpus", "with two chunks"]))
        .expect("second save");

    let loaded = store.load().expect("load");
    assert_eq!(loaded.meta.len(), 2);
    assert!(loaded.vocabulary.index_of("first").is_none());
    assert!(loaded.vocabulary.index_of("second").is_some());
}
