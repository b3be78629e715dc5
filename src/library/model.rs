use std::path::{Path, PathBuf};

/// One playable audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Path relative to the library root; this is the track's identity.
    pub rel_path: PathBuf,
    /// Absolute (root-joined) path handed to the audio device.
    pub path: PathBuf,
    /// Cached duration in whole seconds; `0` means unknown.
    pub duration_secs: u64,
}

impl Track {
    /// File name shown as "current song".
    pub fn display_name(&self) -> String {
        self.rel_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display_path())
    }

    /// Root-relative path with `/` separators.
    pub fn display_path(&self) -> String {
        self.rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A genre bucket: its name and the indices of its tracks in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub name: String,
    pub tracks: Vec<usize>,
}

/// Flat track list plus genre index for one library root.
#[derive(Debug, Clone, Default)]
pub struct Library {
    root: PathBuf,
    tracks: Vec<Track>,
    genres: Vec<Genre>,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tracks: Vec::new(),
            genres: Vec::new(),
        }
    }

    /// Append `track` to the flat list and to the bucket named `genre`.
    pub fn push(&mut self, track: Track, genre: &str) {
        let index = self.tracks.len();
        self.tracks.push(track);

        match self.genres.iter_mut().find(|g| g.name == genre) {
            Some(bucket) => bucket.tracks.push(index),
            None => self.genres.push(Genre {
                name: genre.to_string(),
                tracks: vec![index],
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Genres in first-discovery order.
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Look up a genre by exact (case-sensitive) name.
    pub fn genre(&self, name: &str) -> Option<&Genre> {
        self.genres.iter().find(|g| g.name == name)
    }

    /// Reverse lookup: the genre that lists track `index`.
    pub fn genre_of(&self, index: usize) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.tracks.contains(&index))
            .map(|g| g.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
