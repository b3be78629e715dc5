//! Genre filtering of the active playlist.

use super::controller::PlaybackEngine;
use super::error::EngineError;

impl PlaybackEngine {
    /// Narrow the active playlist to one genre. The cursor goes back to idle;
    /// an unknown genre leaves everything as it was.
    pub fn select_genre(&mut self, name: &str) -> Result<(), EngineError> {
        let library = self.library();
        let Some(genre) = library.genre(name) else {
            return Err(EngineError::GenreNotFound(name.to_string()));
        };

        self.replace_playlist(genre.tracks.clone(), Some(genre.name.clone()));
        tracing::info!(genre = name, tracks = genre.tracks.len(), "genre selected");
        Ok(())
    }

    /// Genre names in discovery order.
    pub fn list_genres(&self) -> Vec<String> {
        self.library()
            .genres()
            .iter()
            .map(|g| g.name.clone())
            .collect()
    }
}
