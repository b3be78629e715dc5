use thiserror::Error;

use crate::audio::DeviceError;

/// Failures surfaced by engine operations. None of them leave the cursor
/// half-updated.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the playlist is empty")]
    EmptyPlaylist,

    #[error("index {index} is out of range for {len} tracks")]
    OutOfRange { index: i64, len: usize },

    #[error("no track matches {0:?}")]
    NotFound(String),

    #[error("genre {0:?} not found")]
    GenreNotFound(String),

    #[error("nothing is playing")]
    NotPlaying,

    #[error("time cannot be negative ({0}s)")]
    NegativeTime(i64),

    #[error("{requested}s exceeds the track duration ({duration}s)")]
    OutOfDuration { requested: u64, duration: u64 },

    #[error("audio device error: {0}")]
    Device(#[from] DeviceError),
}
