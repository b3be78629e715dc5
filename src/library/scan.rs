use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::metadata::{DurationCache, MetadataReader};
use super::model::{Library, Track};

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Genre of a root-relative path: its first directory, or `loose` for files
/// sitting directly in the root.
pub(super) fn genre_for(rel_path: &Path, loose: &str) -> String {
    let mut components = rel_path.components();
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first.as_os_str().to_string_lossy().into_owned(),
        _ => loose.to_string(),
    }
}

/// Walk `root` and return `(relative path, genre)` for every audio file.
///
/// Entries are visited in file-name order so repeated loads of the same tree
/// produce the same playlist.
pub(super) fn discover(root: &Path, settings: &LibrarySettings) -> Vec<(PathBuf, String)> {
    let exts = normalized_extensions(settings);
    let mut found = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() || !is_audio_file(entry.path(), &exts) {
            continue;
        }
        let Ok(rel_path) = entry.path().strip_prefix(root) else {
            continue;
        };
        let genre = genre_for(rel_path, &settings.loose_genre);
        found.push((rel_path.to_path_buf(), genre));
    }

    found
}

/// Build a fresh [`Library`] for `root`.
///
/// A missing root is created. Durations already in `cache` are reused; new
/// tracks are read through `reader`, and unreadable ones get `0`. On return
/// `cache` holds exactly the tracks of the new library.
pub fn load(
    root: &Path,
    settings: &LibrarySettings,
    reader: &dyn MetadataReader,
    cache: &mut DurationCache,
) -> Library {
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!(root = %root.display(), "cannot create library root: {e}");
    }

    let discovered = discover(root, settings);

    let mut fresh = DurationCache::with_capacity(discovered.len());
    let mut library = Library::new(root);
    let mut unreadable = 0usize;

    for (rel_path, genre) in discovered {
        let path = root.join(&rel_path);
        let duration_secs = match cache.get(&path) {
            Some(&secs) => secs,
            None => reader.read_duration(&path).unwrap_or_else(|e| {
                tracing::debug!("duration unavailable, caching 0: {e}");
                unreadable += 1;
                0
            }),
        };
        fresh.insert(path.clone(), duration_secs);

        library.push(
            Track {
                rel_path,
                path,
                duration_secs,
            },
            &genre,
        );
    }

    *cache = fresh;

    tracing::info!(
        root = %root.display(),
        tracks = library.len(),
        genres = library.genres().len(),
        unreadable,
        "library loaded"
    );
    library
}
