//! Shuffle without repeat.
//!
//! Every index of the playlist is handed out once, in random order, before
//! any index repeats.

use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShuffleSelector {
    played: Vec<usize>,
}

impl ShuffleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the next index for a playlist of `len` tracks, or `None` when it
    /// is empty.
    ///
    /// The history is cleared as soon as it covers the whole playlist, so it
    /// never equals the full index range between calls.
    pub fn pick_next<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> Option<usize> {
        if len == 0 {
            return None;
        }

        // Indices from a longer, previous playlist are meaningless now.
        self.played.retain(|&i| i < len);

        let mut remaining: Vec<usize> = (0..len).filter(|i| !self.played.contains(i)).collect();
        if remaining.is_empty() {
            self.played.clear();
            remaining = (0..len).collect();
        }

        let pick = *remaining.choose(rng)?;
        self.played.push(pick);
        if self.played.len() == len {
            self.played.clear();
        }
        Some(pick)
    }

    /// Indices handed out since the last full cycle, in pick order.
    pub fn history(&self) -> &[usize] {
        &self.played
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }
}
