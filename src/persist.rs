//! Persistence gateway - durable delimited-text files, one per collection.
//!
//! Loads collections at startup and rewrites a collection's file in full
//! after every mutation. A missing file is created holding only the header
//! line, so a first run starts from empty collections with well-formed
//! stores on disk. The gateway is the sole writer; there is no file locking
//! (no external writer is expected).

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::Error;
use crate::record::Record;

/// File-backed durable storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a gateway rooted at `dir`. The directory itself must exist or
    /// be creatable; files are created lazily per collection.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The durable file backing collection `R`.
    pub fn path_for<R: Record>(&self) -> PathBuf {
        self.dir.join(format!("{}.csv", R::COLLECTION))
    }

    /// Read and decode the collection's file. If the file does not exist,
    /// create it with header-only content and return an empty collection.
    pub fn load<R: Record>(&self) -> Result<Vec<R>, Error> {
        let path = self.path_for::<R>();
        if path.exists() {
            let text = fs::read_to_string(&path)?;
            Ok(codec::decode(&text))
        } else {
            ensure_parent(&path)?;
            fs::write(&path, codec::encode::<R>(&[]))?;
            Ok(Vec::new())
        }
    }

    /// Overwrite the collection's file with the full current encoding.
    /// Every flush rewrites from scratch; nothing is appended.
    pub fn flush<R: Record>(&self, records: &[R]) -> Result<(), Error> {
        let path = self.path_for::<R>();
        ensure_parent(&path)?;
        fs::write(&path, codec::encode(records))?;
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
