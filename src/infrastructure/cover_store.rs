// SPDX-License-Identifier: MPL-2.0
//! Custom cover persisted as a single file in the data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::application::port::CoverStore;
use crate::config::paths;
use crate::domain::cover::validate_cover;
use crate::domain::error::CoverError;

const COVER_FILE: &str = "custom-cover.img";

#[derive(Debug, Clone)]
pub struct FileCoverStore {
    path: PathBuf,
}

impl FileCoverStore {
    /// Store rooted at `dir`; the directory is created on first write.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(COVER_FILE),
        }
    }

    /// Store in the resolved application data directory, if there is one.
    #[must_use]
    pub fn in_data_dir() -> Option<Self> {
        paths::get_app_data_dir().map(|dir| Self::in_dir(&dir))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CoverStore for FileCoverStore {
    fn store(&mut self, bytes: &[u8]) -> Result<(), CoverError> {
        validate_cover(bytes)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CoverError::Storage(e.to_string()))?;
        }
        fs::write(&self.path, bytes).map_err(|e| CoverError::Storage(e.to_string()))?;
        log::info!("Stored custom cover at {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Option<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) if validate_cover(&bytes).is_ok() => Some(bytes),
            Ok(_) => {
                log::warn!("Ignoring invalid cover at {}", self.path.display());
                None
            }
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("Could not read cover {}: {err}", self.path.display());
                None
            }
        }
    }

    fn clear(&mut self) -> Result<(), CoverError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CoverError::Storage(err.to_string())),
        }
    }
}
