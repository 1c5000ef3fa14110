use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No documents found under {0}. Put some .txt/.md files there.")]
    NoDocuments(String),

    #[error("Index not found at {0}. Run `ragdb ingest` first.")]
    IndexUnavailable(String),

    #[error("Corrupt index snapshot: {0}")]
    CorruptSnapshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
