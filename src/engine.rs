//! The playback engine: active playlist, cursor and transport state machine.
//!
//! [`PlaybackEngine`] owns one loaded [`Library`](crate::library::Library),
//! the active playlist (the whole library or one genre) and the cursor. It is
//! single-threaded; share it between callers through [`EngineHandle`], which
//! serializes every operation behind one lock.

mod controller;
mod cursor;
mod error;
mod filter;
mod handle;
mod shuffle;
mod snapshot;

pub use controller::{PlayTarget, PlaybackEngine};
pub use cursor::{Cursor, PlaybackState};
pub use error::EngineError;
pub use handle::EngineHandle;
pub use shuffle::ShuffleSelector;
pub use snapshot::{Snapshot, Status, TrackSnapshot, UNKNOWN_GENRE};
