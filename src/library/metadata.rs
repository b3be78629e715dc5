//! Duration lookup for audio files.
//!
//! The loader only needs one number per file, so the seam is a single-method
//! trait. `LoftyReader` reads the container properties; failures are reported
//! as `MetadataError` and the loader turns them into a duration of `0`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lofty::prelude::AudioFile;
use thiserror::Error;

/// Durations (whole seconds) keyed by absolute track path.
pub type DurationCache = HashMap<PathBuf, u64>;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("no duration reported for {0:?}")]
    MissingDuration(PathBuf),
}

/// Reads track durations.
pub trait MetadataReader: Send + Sync {
    fn read_duration(&self, path: &Path) -> Result<u64, MetadataError>;
}

/// `MetadataReader` backed by `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl MetadataReader for LoftyReader {
    fn read_duration(&self, path: &Path) -> Result<u64, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|e| MetadataError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let duration = tagged.properties().duration();
        if duration.is_zero() {
            return Err(MetadataError::MissingDuration(path.to_path_buf()));
        }
        Ok(duration.as_secs())
    }
}
