//! Playback engine for a folder-per-genre music library.
//!
//! [`library`] scans a root into tracks and genres, [`engine`] holds the
//! playlist and transport state machine, [`audio`] is the device seam and
//! [`config`] the layered settings shared with the `allegro` binary.

pub mod audio;
pub mod config;
pub mod engine;
pub mod library;
