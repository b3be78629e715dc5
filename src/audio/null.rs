use std::path::Path;

use super::types::{AudioOutput, DeviceError};

/// Output for deployments without a sound device.
///
/// Every call succeeds and nothing is played; callers drive real playback
/// elsewhere using the track path. `elapsed_seconds` is `None`, so the engine
/// keeps its own position and never auto-advances.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn load_and_play(&mut self, path: &Path, looping: bool) -> Result<(), DeviceError> {
        tracing::debug!(path = %path.display(), looping, "headless play");
        Ok(())
    }

    fn stop(&mut self) {}

    fn seek(&mut self, seconds: u64) -> Result<(), DeviceError> {
        tracing::debug!(seconds, "headless seek");
        Ok(())
    }

    fn set_looping(&mut self, _looping: bool) {}

    fn elapsed_seconds(&self) -> Option<u64> {
        None
    }

    fn is_busy(&self) -> bool {
        false
    }
}
