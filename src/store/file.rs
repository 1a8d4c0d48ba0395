/*!
 * File Store
 * Host-side persistence of the kernel memory document as JSON
 */

use super::types::KernelMemory;
use crate::core::errors::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A JSON file holding `KernelMemory` between host invocations
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file yields a fresh store.
    pub fn load(&self) -> Result<KernelMemory, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let mem = serde_json::from_slice(&bytes)?;
                debug!(path = %self.path.display(), bytes = bytes.len(), "Store loaded");
                Ok(mem)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No store found, starting fresh");
                Ok(KernelMemory::new())
            }
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the document atomically: temp file in the same directory, then rename
    pub fn save(&self, mem: &KernelMemory) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(mem)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Store saved");
        Ok(())
    }
}
