//! Corpus collection: recursive document discovery and chunking.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::chunker::Chunker;
use crate::error::{Error, Result};
use crate::types::{Document, DocumentChunk};

const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

/// Turns a directory tree of text files into chunk records ready for
/// indexing. Traversal is deterministic (sorted paths) so repeated
/// ingest runs over the same corpus produce identical row order.
#[derive(Debug, Default)]
pub struct CorpusProcessor {
    chunker: Chunker,
}

impl CorpusProcessor {
    pub fn new(chunker: Chunker) -> Self {
        Self { chunker }
    }

    /// Collect every `.txt`/`.md` file under `docs_dir`, lossy-decoded.
    /// Documents whose trimmed text is empty are skipped. Document ids
    /// are paths relative to `docs_dir`.
    pub fn read_all(&self, docs_dir: &Path) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for path in list_text_files(docs_dir) {
            let bytes = fs::read(&path)?;
            let text = String::from_utf8_lossy(&bytes);
            let text = text.trim();
            if text.is_empty() {
                debug!(path = %path.display(), "skipping empty document");
                continue;
            }
            let rel = path.strip_prefix(docs_dir).unwrap_or(&path);
            docs.push(Document {
                path: rel.to_string_lossy().to_string(),
                text: text.to_string(),
            });
        }
        Ok(docs)
    }

    /// Read the corpus and chunk every document. `chunk_id` counts
    /// windows within each document from 0. Fails with `NoDocuments`
    /// when the directory holds no usable text files; ingest never
    /// silently builds an empty index.
    pub fn process_directory(&self, docs_dir: &Path) -> Result<Vec<DocumentChunk>> {
        let docs = self.read_all(docs_dir)?;
        if docs.is_empty() {
            return Err(Error::NoDocuments(docs_dir.display().to_string()));
        }
        let mut chunks = Vec::new();
        for doc in &docs {
            for (chunk_id, text) in self.chunker.chunk(&doc.text).into_iter().enumerate() {
                chunks.push(DocumentChunk { source: doc.path.clone(), chunk_id, text });
            }
        }
        debug!(documents = docs.len(), chunks = chunks.len(), "corpus processed");
        Ok(chunks)
    }
}

fn list_text_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    files.sort();
    files
}
