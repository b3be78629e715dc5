use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::library::Library;

use super::controller::{PlayTarget, PlaybackEngine};
use super::error::EngineError;
use super::snapshot::{Snapshot, Status, TrackSnapshot};

/// Shared access to one [`PlaybackEngine`].
///
/// Clones refer to the same engine. Every call holds a single engine-wide
/// lock for its whole duration, so operations that read and write several
/// cursor fields are atomic with respect to other callers.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Arc<Mutex<PlaybackEngine>>,
}

impl EngineHandle {
    pub fn new(engine: PlaybackEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackEngine> {
        // Engine operations leave no partial state; poison carries no meaning.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run several operations under one lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackEngine) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn load(&self, root: impl Into<PathBuf>) {
        self.lock().load(root)
    }

    pub fn reset_playlist(&self) {
        self.lock().reset_playlist()
    }

    pub fn play(&self, target: PlayTarget) -> Result<TrackSnapshot, EngineError> {
        self.lock().play(target)
    }

    pub fn next(&self) -> Result<TrackSnapshot, EngineError> {
        self.lock().next()
    }

    pub fn previous(&self) -> Result<TrackSnapshot, EngineError> {
        self.lock().previous()
    }

    pub fn stop(&self) {
        self.lock().stop()
    }

    pub fn seek(&self, seconds: i64) -> Result<(), EngineError> {
        self.lock().seek(seconds)
    }

    pub fn toggle_shuffle(&self) -> bool {
        self.lock().toggle_shuffle()
    }

    pub fn toggle_loop(&self) -> bool {
        self.lock().toggle_loop()
    }

    pub fn select_genre(&self, name: &str) -> Result<(), EngineError> {
        self.lock().select_genre(name)
    }

    /// See [`PlaybackEngine::info`]; may auto-advance.
    pub fn info(&self) -> Snapshot {
        self.lock().info()
    }

    pub fn poll(&self) -> bool {
        self.lock().poll()
    }

    pub fn status(&self) -> Status {
        self.lock().status()
    }

    pub fn list_genres(&self) -> Vec<String> {
        self.lock().list_genres()
    }

    pub fn list_tracks(&self) -> Vec<String> {
        self.lock().list_tracks()
    }

    /// Current library snapshot. The returned `Arc` stays valid after a
    /// reload replaces the engine's copy.
    pub fn library(&self) -> Arc<Library> {
        self.lock().library()
    }
}
