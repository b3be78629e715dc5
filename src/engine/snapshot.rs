use std::path::PathBuf;

use super::cursor::PlaybackState;

/// Genre reported when a track cannot be found in the genre index.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// What `info()` returns while a track is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSnapshot {
    /// Offset in the active playlist.
    pub index: usize,
    /// File name of the track.
    pub current_song: String,
    /// Elapsed seconds.
    pub time_played: u64,
    /// Cached duration in seconds; `0` when unknown.
    pub duration: u64,
    pub genre: String,
    /// Root-relative path, `/`-separated.
    pub rel_path: String,
    /// Absolute path on disk.
    pub full_path: PathBuf,
    pub playing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Nothing is selected.
    Idle,
    Track(TrackSnapshot),
}

impl Snapshot {
    pub fn track(&self) -> Option<&TrackSnapshot> {
        match self {
            Snapshot::Idle => None,
            Snapshot::Track(t) => Some(t),
        }
    }
}

/// Mode flags and cursor summary, without touching the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub state: PlaybackState,
    pub current: Option<usize>,
    pub shuffle: bool,
    pub looping: bool,
    pub position_secs: u64,
    /// Genre the playlist is filtered to, if any.
    pub genre_filter: Option<String>,
    pub playlist_len: usize,
    pub library_len: usize,
}
