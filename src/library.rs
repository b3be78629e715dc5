//! Library loading: discovers audio files under a root, classifies them by
//! genre directory and caches their durations.
//!
//! The flat track list and the genre index live together in [`Library`],
//! which is rebuilt wholesale on every load and never mutated in place.

mod metadata;
mod model;
mod scan;

pub use metadata::{DurationCache, LoftyReader, MetadataError, MetadataReader};
pub use model::{Genre, Library, Track};
pub use scan::load;
