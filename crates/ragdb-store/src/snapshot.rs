use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use ragdb_core::error::{Error, Result};
use ragdb_core::traits::SnapshotStore;
use ragdb_core::types::IndexSnapshot;

const VOCAB_FILE: &str = "vocab.json";
const IDF_FILE: &str = "idf.json";
const MATRIX_FILE: &str = "matrix.json";
const META_FILE: &str = "meta.json";
const PARAMS_FILE: &str = "index_params.json";

const ARTIFACTS: &[&str] = &[VOCAB_FILE, IDF_FILE, MATRIX_FILE, META_FILE, PARAMS_FILE];

/// Snapshot directory layout:
///
/// ```text
/// <index_dir>/vocab.json          term -> column index
/// <index_dir>/idf.json            f32 array aligned to the vocabulary
/// <index_dir>/matrix.json         row-compressed sparse matrix
/// <index_dir>/meta.json           {source, chunk_id, text} per row
/// <index_dir>/index_params.json   {kind, rows, cols} fingerprint
/// ```
///
/// A new ingest run replaces the directory wholesale; there is no
/// incremental merge.
pub struct FsSnapshotStore {
    index_dir: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(index_dir: PathBuf) -> Self {
        Self { index_dir }
    }

    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }

    /// Whether a complete snapshot is present on disk.
    pub fn exists(&self) -> bool {
        ARTIFACTS.iter().all(|f| self.index_dir.join(f).is_file())
    }

    /// Write all artifacts into a staging directory next to the target,
    /// then rename it into place. The rename is the publish step; a
    /// crash before it leaves any previous snapshot untouched.
    pub fn save(&self, snapshot: &IndexSnapshot) -> Result<()> {
        snapshot.validate()?;

        let parent = self.index_dir.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;
        let staging = tempfile::Builder::new()
            .prefix(".ragdb-staging-")
            .tempdir_in(parent)?;

        write_json(&staging.path().join(VOCAB_FILE), &snapshot.vocabulary)?;
        write_json(&staging.path().join(IDF_FILE), &snapshot.idf)?;
        write_json(&staging.path().join(MATRIX_FILE), &snapshot.matrix)?;
        write_json(&staging.path().join(META_FILE), &snapshot.meta)?;
        write_json(&staging.path().join(PARAMS_FILE), &snapshot.params)?;

        if self.index_dir.exists() {
            debug!(dir = %self.index_dir.display(), "removing previous snapshot");
            fs::remove_dir_all(&self.index_dir)?;
        }
        fs::rename(staging.keep(), &self.index_dir)?;

        info!(
            dir = %self.index_dir.display(),
            rows = snapshot.params.rows,
            cols = snapshot.params.cols,
            "snapshot published"
        );
        Ok(())
    }

    /// Load and validate the snapshot. Missing artifacts mean the index
    /// was never built (or was partially deleted) and map to
    /// `IndexUnavailable`; shape mismatches map to `CorruptSnapshot`.
    pub fn load(&self) -> Result<IndexSnapshot> {
        if !self.exists() {
            return Err(Error::IndexUnavailable(self.index_dir.display().to_string()));
        }

        let snapshot = IndexSnapshot {
            vocabulary: read_json(&self.index_dir.join(VOCAB_FILE))?,
            idf: read_json(&self.index_dir.join(IDF_FILE))?,
            matrix: read_json(&self.index_dir.join(MATRIX_FILE))?,
            meta: read_json(&self.index_dir.join(META_FILE))?,
            params: read_json(&self.index_dir.join(PARAMS_FILE))?,
        };
        snapshot.validate()?;

        debug!(
            dir = %self.index_dir.display(),
            rows = snapshot.params.rows,
            cols = snapshot.params.cols,
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn save(&self, snapshot: &IndexSnapshot) -> anyhow::Result<()> {
        Self::save(self, snapshot).map_err(Into::into)
    }

    fn load(&self) -> anyhow::Result<IndexSnapshot> {
        Self::load(self).map_err(Into::into)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
