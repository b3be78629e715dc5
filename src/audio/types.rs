//! Audio-related small types: the output trait, its error type and the clock
//! used to report elapsed playback time.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no audio output device: {0}")]
    Unavailable(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("no track is loaded")]
    NothingLoaded,

    #[error("audio thread is not running")]
    Disconnected,
}

/// The playback device as seen by the engine.
///
/// Calls are expected to return promptly; failures are reported once and
/// never retried here.
pub trait AudioOutput: Send {
    /// Load `path` and start playing it from the beginning. With `looping`
    /// the device restarts the track by itself when it ends.
    fn load_and_play(&mut self, path: &Path, looping: bool) -> Result<(), DeviceError>;

    /// Stop playback and unload the current track.
    fn stop(&mut self);

    /// Restart the loaded track at `seconds`, keeping its looping flag.
    fn seek(&mut self, seconds: u64) -> Result<(), DeviceError>;

    /// Change whether the loaded track (and later loads through `seek`)
    /// restarts by itself when it ends.
    fn set_looping(&mut self, looping: bool);

    /// Elapsed seconds since the last load (or seek offset). `None` when the
    /// output cannot observe playback at all.
    fn elapsed_seconds(&self) -> Option<u64>;

    /// Whether a track is currently producing sound.
    fn is_busy(&self) -> bool;
}

/// Wall-clock based playback position.
///
/// `start` anchors the clock at a seek offset, `finish` freezes it when the
/// sink drains, `clear` resets it after a stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackClock {
    started_at: Option<Instant>,
    offset: Duration,
    finished_at: Option<Instant>,
}

impl PlaybackClock {
    pub fn start(&mut self, offset: Duration, now: Instant) {
        self.started_at = Some(now);
        self.offset = offset;
        self.finished_at = None;
    }

    pub fn finish(&mut self, now: Instant) {
        if self.started_at.is_some() && self.finished_at.is_none() {
            self.finished_at = Some(now);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.finished_at.is_none()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => {
                let end = self.finished_at.unwrap_or(now);
                self.offset + end.saturating_duration_since(start)
            }
            None => Duration::ZERO,
        }
    }
}

/// State published by the audio thread.
#[derive(Debug, Default)]
pub(super) struct DeviceStatus {
    pub clock: PlaybackClock,
}

pub(super) type StatusHandle = Arc<Mutex<DeviceStatus>>;

/// Commands understood by the audio thread.
#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current sink with `path`, skipping `start_at` into it.
    Load {
        path: PathBuf,
        looping: bool,
        start_at: Duration,
        reply: std::sync::mpsc::Sender<Result<(), DeviceError>>,
    },
    /// Update the looping flag of the current track.
    SetLooping(bool),
    /// Stop playback immediately.
    Stop,
    /// Stop and leave the thread.
    Quit,
}
