use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::AudioOutput;
use crate::config::LibrarySettings;
use crate::library::{self, DurationCache, Library, MetadataReader, Track};

use super::cursor::Cursor;
use super::error::EngineError;
use super::shuffle::ShuffleSelector;
use super::snapshot::{Snapshot, Status, TrackSnapshot, UNKNOWN_GENRE};

/// What `play` should select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayTarget {
    /// Playlist offset. Any negative value selects the last track.
    Index(i64),
    /// Case-insensitive substring of the track path; `-` and `_` match spaces.
    Query(String),
    /// Next track: random under shuffle, otherwise the following one.
    Advance,
}

/// The playback state machine for one library root.
pub struct PlaybackEngine {
    root: PathBuf,
    settings: LibrarySettings,
    library: Arc<Library>,
    /// Active playlist as indices into `library.tracks()`.
    playlist: Vec<usize>,
    genre_filter: Option<String>,
    pub(super) cursor: Cursor,
    pub(super) shuffle: ShuffleSelector,
    durations: DurationCache,
    output: Box<dyn AudioOutput>,
    reader: Box<dyn MetadataReader>,
    rng: StdRng,
}

impl PlaybackEngine {
    /// Build an engine and load `root` right away.
    pub fn new(
        root: impl Into<PathBuf>,
        settings: LibrarySettings,
        output: Box<dyn AudioOutput>,
        reader: Box<dyn MetadataReader>,
    ) -> Self {
        let mut engine = Self {
            root: root.into(),
            settings,
            library: Arc::new(Library::default()),
            playlist: Vec::new(),
            genre_filter: None,
            cursor: Cursor::default(),
            shuffle: ShuffleSelector::new(),
            durations: DurationCache::new(),
            output,
            reader,
            rng: StdRng::from_entropy(),
        };
        engine.reload();
        engine
    }

    /// Replace the random source used for shuffle picks.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.cursor.shuffle = on;
    }

    pub fn set_loop(&mut self, on: bool) {
        self.cursor.looping = on;
        self.output.set_looping(on);
    }

    /// Point the engine at `root` and rebuild everything from it.
    pub fn load(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
        self.reload();
    }

    /// Rebuild the library from the current root, restoring the full
    /// playlist.
    pub fn reset_playlist(&mut self) {
        self.reload();
    }

    fn reload(&mut self) {
        let library = library::load(
            &self.root,
            &self.settings,
            self.reader.as_ref(),
            &mut self.durations,
        );
        self.library = Arc::new(library);
        let all = (0..self.library.len()).collect();
        self.replace_playlist(all, None);
    }

    /// Swap the active playlist and drop everything tied to the old one.
    pub(super) fn replace_playlist(&mut self, playlist: Vec<usize>, genre_filter: Option<String>) {
        if self.cursor.playing {
            self.output.stop();
        }
        self.playlist = playlist;
        self.genre_filter = genre_filter;
        self.cursor.reset();
        self.shuffle.clear();
    }

    pub fn play(&mut self, target: PlayTarget) -> Result<TrackSnapshot, EngineError> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(EngineError::EmptyPlaylist);
        }

        let index = match target {
            PlayTarget::Index(i) => resolve_index(i, len)?,
            PlayTarget::Query(q) => self.find(&q)?,
            PlayTarget::Advance => self.advance_from(self.cursor.current),
        };
        self.start(index)
    }

    /// Same as `play(PlayTarget::Advance)`: honours shuffle, wraps at the end.
    pub fn next(&mut self) -> Result<TrackSnapshot, EngineError> {
        self.play(PlayTarget::Advance)
    }

    /// Step back one track, wrapping from the first to the last. From idle
    /// this selects the last track.
    pub fn previous(&mut self) -> Result<TrackSnapshot, EngineError> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(EngineError::EmptyPlaylist);
        }
        let index = self.cursor.current.map_or(len - 1, |i| (i + len - 1) % len);
        self.start(index)
    }

    /// Stop the device. The selection is kept so `next`/`previous`/`info`
    /// keep working; the position goes back to zero.
    pub fn stop(&mut self) {
        self.output.stop();
        self.cursor.playing = false;
        self.cursor.position_secs = 0;
        tracing::info!("playback stopped");
    }

    pub fn seek(&mut self, seconds: i64) -> Result<(), EngineError> {
        let index = match self.cursor.current {
            Some(i) if self.cursor.playing => i,
            _ => return Err(EngineError::NotPlaying),
        };
        if seconds < 0 {
            return Err(EngineError::NegativeTime(seconds));
        }

        let requested = seconds as u64;
        let duration = self.duration_at(index);
        if requested > duration {
            return Err(EngineError::OutOfDuration {
                requested,
                duration,
            });
        }

        if let Err(e) = self.output.seek(requested) {
            tracing::warn!("seek failed: {e}");
            self.cursor.playing = false;
            return Err(e.into());
        }
        self.cursor.position_secs = requested;
        Ok(())
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.cursor.shuffle = !self.cursor.shuffle;
        self.cursor.shuffle
    }

    /// Flip repeat. The device hears about it right away, so a track that is
    /// already playing stops (or starts) repeating when it ends.
    pub fn toggle_loop(&mut self) -> bool {
        self.set_loop(!self.cursor.looping);
        self.cursor.looping
    }

    /// Reconcile with the device and return the current track.
    ///
    /// This is not a pure read: it runs [`poll`](Self::poll) first, so a
    /// finished track is auto-advanced by the call.
    pub fn info(&mut self) -> Snapshot {
        self.poll();
        match self.cursor.current {
            None => Snapshot::Idle,
            Some(index) => Snapshot::Track(self.snapshot_of(index)),
        }
    }

    /// Sync the position from the device and auto-advance a finished track:
    /// repeat it under loop, pick randomly under shuffle, otherwise move to
    /// the next one. Returns `true` when it advanced.
    ///
    /// Devices that cannot observe playback never trigger an advance.
    pub fn poll(&mut self) -> bool {
        let Some(index) = self.cursor.current else {
            return false;
        };
        if !self.cursor.playing {
            return false;
        }
        let Some(elapsed) = self.output.elapsed_seconds() else {
            return false;
        };

        let duration = self.duration_at(index);
        self.cursor.position_secs = if duration > 0 {
            elapsed.min(duration)
        } else {
            elapsed
        };

        if self.output.is_busy() || elapsed < duration {
            return false;
        }

        let next = if self.cursor.looping {
            index
        } else {
            self.advance_from(Some(index))
        };
        tracing::debug!(from = index, to = next, "track finished, advancing");
        if let Err(e) = self.start(next) {
            tracing::warn!("auto-advance failed: {e}");
        }
        true
    }

    /// Mode flags and cursor summary.
    pub fn status(&self) -> Status {
        Status {
            state: self.cursor.state(),
            current: self.cursor.current,
            shuffle: self.cursor.shuffle,
            looping: self.cursor.looping,
            position_secs: self.cursor.position_secs,
            genre_filter: self.genre_filter.clone(),
            playlist_len: self.playlist.len(),
            library_len: self.library.len(),
        }
    }

    /// Display paths of the active playlist, in order.
    pub fn list_tracks(&self) -> Vec<String> {
        self.playlist
            .iter()
            .filter_map(|&i| self.library.track(i))
            .map(Track::display_path)
            .collect()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The loaded library. It is replaced, never mutated, on reload.
    pub fn library(&self) -> Arc<Library> {
        Arc::clone(&self.library)
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn advance_from(&mut self, current: Option<usize>) -> usize {
        let len = self.playlist.len();
        if self.cursor.shuffle {
            self.shuffle.pick_next(len, &mut self.rng).unwrap_or(0)
        } else {
            current.map_or(0, |i| (i + 1) % len)
        }
    }

    fn find(&self, query: &str) -> Result<usize, EngineError> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Err(EngineError::NotFound(query.to_string()));
        }
        self.playlist
            .iter()
            .position(|&i| {
                self.library
                    .track(i)
                    .is_some_and(|t| normalize(&t.display_path()).contains(&needle))
            })
            .ok_or_else(|| EngineError::NotFound(query.to_string()))
    }

    fn track_at(&self, index: usize) -> Option<&Track> {
        self.playlist
            .get(index)
            .and_then(|&i| self.library.track(i))
    }

    fn duration_at(&self, index: usize) -> u64 {
        self.track_at(index).map_or(0, |t| t.duration_secs)
    }

    /// Select `index` and hand its track to the device. A device failure
    /// keeps the selection but leaves `playing` false.
    fn start(&mut self, index: usize) -> Result<TrackSnapshot, EngineError> {
        let library = Arc::clone(&self.library);
        let Some(track) = self.playlist.get(index).and_then(|&i| library.track(i)) else {
            return Err(EngineError::OutOfRange {
                index: index as i64,
                len: self.playlist.len(),
            });
        };

        self.cursor.current = Some(index);
        self.cursor.position_secs = 0;

        match self.output.load_and_play(&track.path, self.cursor.looping) {
            Ok(()) => {
                self.cursor.playing = true;
                tracing::info!(
                    index,
                    track = %track.display_path(),
                    looping = self.cursor.looping,
                    shuffle = self.cursor.shuffle,
                    "playing"
                );
                Ok(self.snapshot_of(index))
            }
            Err(e) => {
                self.cursor.playing = false;
                tracing::warn!(index, track = %track.display_path(), "cannot play: {e}");
                Err(e.into())
            }
        }
    }

    fn snapshot_of(&self, index: usize) -> TrackSnapshot {
        let library_index = self.playlist.get(index).copied();
        let track = library_index.and_then(|i| self.library.track(i));
        let genre = library_index
            .and_then(|i| self.library.genre_of(i))
            .unwrap_or(UNKNOWN_GENRE)
            .to_string();

        TrackSnapshot {
            index,
            current_song: track.map(Track::display_name).unwrap_or_default(),
            time_played: self.cursor.position_secs,
            duration: track.map_or(0, |t| t.duration_secs),
            genre,
            rel_path: track.map(Track::display_path).unwrap_or_default(),
            full_path: track.map(|t| t.path.clone()).unwrap_or_default(),
            playing: self.cursor.playing,
        }
    }
}

/// Map a playlist offset to a valid one. Any negative offset selects the
/// last track.
pub(super) fn resolve_index(index: i64, len: usize) -> Result<usize, EngineError> {
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(i),
        Ok(_) => Err(EngineError::OutOfRange { index, len }),
        Err(_) => len.checked_sub(1).ok_or(EngineError::EmptyPlaylist),
    }
}

/// Lower-case, treat `-`/`_` as spaces, trim.
pub(super) fn normalize(s: &str) -> String {
    s.to_lowercase().replace(['-', '_'], " ").trim().to_string()
}
