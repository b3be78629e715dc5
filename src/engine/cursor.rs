/// Coarse transport state derived from the cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A track is selected but not loaded into the device.
    Selected,
    /// A track is loaded and playing.
    Playing,
}

/// Playback position and mode.
///
/// `current` is an offset into the active playlist; it is always in range
/// when set. `playing` implies `current.is_some()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub current: Option<usize>,
    pub playing: bool,
    pub looping: bool,
    pub shuffle: bool,
    pub position_secs: u64,
}

impl Cursor {
    pub fn state(&self) -> PlaybackState {
        match (self.current, self.playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Selected,
            (Some(_), true) => PlaybackState::Playing,
        }
    }

    /// Back to idle; the mode flags survive.
    pub(super) fn reset(&mut self) {
        self.current = None;
        self.playing = false;
        self.position_secs = 0;
    }
}
