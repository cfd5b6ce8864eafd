//! On-disk snapshot cache for vector tables.
//!
//! The first run parses a word-vector text file and writes a `bincode` image
//! named after the dataset. Later runs memory-map that image read-only and
//! decode it, skipping the text parse.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use tracing::info;

use quartet_core::{QuartetError, Result};

use crate::vectors::VectorTable;

/// Snapshot file extension.
pub const SNAPSHOT_EXTENSION: &str = "qvec";

const SNAPSHOT_MAGIC: [u8; 4] = *b"QVEC";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotImageRef<'a> {
    magic: [u8; 4],
    version: u32,
    dimensions: usize,
    words: &'a [String],
    vectors: &'a [f32],
}

#[derive(Deserialize)]
struct SnapshotImage {
    magic: [u8; 4],
    version: u32,
    dimensions: usize,
    words: Vec<String>,
    vectors: Vec<f32>,
}

impl VectorTable {
    /// Writes this table as a snapshot at `path`, creating parent directories.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let image = SnapshotImageRef {
            magic: SNAPSHOT_MAGIC,
            version: SNAPSHOT_VERSION,
            dimensions: self.dimensions(),
            words: self.words(),
            vectors: self.raw_vectors(),
        };
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, &image)
            .map_err(|e| QuartetError::Snapshot(format!("{}: {}", path.display(), e)))
    }

    /// Opens a snapshot written by [`save_snapshot`](Self::save_snapshot).
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::Snapshot`] if the file is not a snapshot of a
    /// supported version or is truncated.
    pub fn open_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        // SAFETY: the map is read-only and dropped before returning; snapshot
        // files are written once and never modified in place.
        let mmap = unsafe { Mmap::map(&file)? };

        let image: SnapshotImage = bincode::deserialize(&mmap)
            .map_err(|e| QuartetError::Snapshot(format!("{}: {}", path.display(), e)))?;
        if image.magic != SNAPSHOT_MAGIC {
            return Err(QuartetError::Snapshot(format!(
                "{}: not a quartet snapshot",
                path.display()
            )));
        }
        if image.version != SNAPSHOT_VERSION {
            return Err(QuartetError::Snapshot(format!(
                "{}: unsupported snapshot version {}",
                path.display(),
                image.version
            )));
        }

        VectorTable::from_parts(image.dimensions, image.words, image.vectors)
    }
}

/// Locates and populates the snapshot for one dataset.
///
/// # Examples
///
/// ```
/// use quartet_scoring::SnapshotStore;
///
/// let store = SnapshotStore::new("data", "glove-wiki-50");
/// assert_eq!(store.path(), std::path::Path::new("data/glove-wiki-50.qvec"));
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
    dataset: String,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>, dataset: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            dataset: dataset.into(),
        }
    }

    /// Path of the snapshot file for this dataset.
    pub fn path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", self.dataset, SNAPSHOT_EXTENSION))
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Opens the snapshot, building it from `vectors_text` on first use.
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::Snapshot`] when no snapshot exists and no
    /// vector text file was given, or when either file is malformed.
    pub fn load_or_build(&self, vectors_text: Option<&Path>) -> Result<VectorTable> {
        let path = self.path();
        if path.is_file() {
            let table = VectorTable::open_snapshot(&path)?;
            info!(
                event = "snapshot_loaded",
                dataset = self.dataset.as_str(),
                words = table.len() as u64,
                dimensions = table.dimensions() as u64,
            );
            return Ok(table);
        }

        let source = vectors_text.ok_or_else(|| {
            QuartetError::Snapshot(format!(
                "no snapshot at {} and no vector file configured for dataset '{}'",
                path.display(),
                self.dataset
            ))
        })?;

        let table = VectorTable::from_text(BufReader::new(File::open(source)?))?;
        table.save_snapshot(&path)?;
        info!(
            event = "snapshot_written",
            dataset = self.dataset.as_str(),
            words = table.len() as u64,
            dimensions = table.dimensions() as u64,
        );
        Ok(table)
    }
}
