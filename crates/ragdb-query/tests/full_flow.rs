//! End-to-end: corpus on disk → chunk → build → save → open → query.

use std::fs;
use tempfile::TempDir;

use ragdb_core::chunker::{Chunker, ChunkingConfig};
use ragdb_core::corpus::CorpusProcessor;
use ragdb_core::error::Error;
use ragdb_index::IndexBuilder;
use ragdb_query::Retriever;
use ragdb_store::FsSnapshotStore;

#[test]
fn two_document_corpus_ranks_the_right_source() {
    let tmp = TempDir::new().expect("tempdir");
    let docs_dir = tmp.path().join("docs");
    let index_dir = tmp.path().join("index");
    fs::create_dir_all(&docs_dir).expect("mkdir");
    fs::write(docs_dir.join("a.txt"), "the cat sat").expect("write");
    fs::write(docs_dir.join("b.txt"), "the dog ran").expect("write");

    // chunk_size 100, overlap 0: one chunk per document.
    let chunker = Chunker::new(ChunkingConfig::new(100, 0).expect("config"));
    let chunks = CorpusProcessor::new(chunker).process_directory(&docs_dir).expect("chunks");
    assert_eq!(chunks.len(), 2);

    let snapshot = IndexBuilder::new(30_000).build(&chunks);
    FsSnapshotStore::new(index_dir.clone()).save(&snapshot).expect("save");

    let retriever = Retriever::open(index_dir).expect("open");
    let hits = retriever.retrieve("cat", 4, 1e-9);

    // b.txt has no overlap with the query: scored 0 and filtered out.
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].source, "a.txt");
    assert_eq!(hits[0].chunk_id, 0);
    assert!(hits[0].score > 0.0);
    assert_eq!(hits[0].text, "the cat sat");
}

#[test]
fn structural_invariants_hold_after_load() {
    let tmp = TempDir::new().expect("tempdir");
    let docs_dir = tmp.path().join("docs");
    let index_dir = tmp.path().join("index");
    fs::create_dir_all(&docs_dir).expect("mkdir");
    let body: String = "wild salmon run upstream every autumn season ".repeat(40);
    fs::write(docs_dir.join("salmon.md"), &body).expect("write");
    fs::write(docs_dir.join("bees.txt"), "honey bees pollinate orchards").expect("write");

    let chunks = CorpusProcessor::default().process_directory(&docs_dir).expect("chunks");
    let snapshot = IndexBuilder::new(30_000).build(&chunks);
    FsSnapshotStore::new(index_dir.clone()).save(&snapshot).expect("save");

    let loaded = FsSnapshotStore::new(index_dir).load().expect("load");
    assert_eq!(loaded.matrix.cols(), loaded.vocabulary.len());
    assert_eq!(loaded.matrix.cols(), loaded.idf.len());
    assert_eq!(loaded.matrix.rows(), loaded.meta.len());
    assert!(loaded.matrix.rows() > 1, "long document produced several rows");
}

#[test]
fn query_before_ingest_fails_fast() {
    let tmp = TempDir::new().expect("tempdir");
    let err = Retriever::open(tmp.path().join("never-built")).expect_err("unbuilt index");
    assert!(matches!(err, Error::IndexUnavailable(_)));
}

#[test]
fn querying_a_chunks_own_text_finds_it_first() {
    let tmp = TempDir::new().expect("tempdir");
    let docs_dir = tmp.path().join("docs");
    fs::create_dir_all(&docs_dir).expect("mkdir");
    fs::write(
        docs_dir.join("guide.txt"),
        "Start seedlings indoors six weeks before the last frost date.",
    )
    .expect("write");
    fs::write(
        docs_dir.join("other.txt"),
        "Sharpen chisels at a twenty five degree bevel angle.",
    )
    .expect("write");

    let chunks = CorpusProcessor::default().process_directory(&docs_dir).expect("chunks");
    let own_text = chunks[0].text.clone();
    let retriever = Retriever::from_snapshot(IndexBuilder::new(30_000).build(&chunks));

    let hits = retriever.retrieve(&own_text, 1, 1e-9);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].score - 1.0).abs() < 1e-6);
}
