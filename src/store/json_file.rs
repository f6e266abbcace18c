//! # JSON File Store
//!
//! Whole-file read/modify/write persistence of the animal collection as a
//! single JSON array. This is the simplest correct strategy for a small,
//! single-process, low-concurrency dataset: every load re-reads the file,
//! every save rewrites it in full.
//!
//! A missing or malformed file is recovered as an empty collection (logged,
//! never fatal). Write failures surface to the caller so the triggering
//! mutation can report the failure.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::observability::Logger;
use crate::registry::Animal;

use super::backend::RecordStore;
use super::errors::{StoreError, StoreResult};

/// File-backed record store holding a JSON array of animals.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is not touched until the first `load` or `save`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<Animal>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // No file yet: fresh store, empty collection.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };

        match serde_json::from_str(&content) {
            Ok(animals) => Ok(animals),
            Err(e) => {
                // Malformed content is recovered as empty rather than
                // crashing the request that triggered the read.
                Logger::warn(
                    "STORE_RECOVERED_EMPTY",
                    &[
                        ("path", &self.path.display().to_string()),
                        ("reason", &e.to_string()),
                    ],
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, animals: &[Animal]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(animals)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
            }
        }

        // Write to a sibling temp file, fsync, then rename over the target.
        // Two racing writers may still lose an update (last save wins) but
        // neither can leave a truncated file behind.
        let tmp = self.tmp_path();
        let result = (|| {
            let mut file = File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        result.map_err(|e| {
            Logger::error(
                "STORE_SAVE_FAILED",
                &[
                    ("path", &self.path.display().to_string()),
                    ("reason", &e.to_string()),
                ],
            );
            let _ = fs::remove_file(&tmp);
            StoreError::WriteFailed(e.to_string())
        })
    }
}
