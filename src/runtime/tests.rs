use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use clap::Parser;
use tempfile::{TempDir, tempdir};

use allegro::audio::NullOutput;
use allegro::config::{AudioBackend, LibrarySettings, Settings};
use allegro::engine::{EngineHandle, PlayTarget, PlaybackEngine, PlaybackState};
use allegro::library::{MetadataError, MetadataReader};

use super::cli::Args;
use super::menu::{Choice, format_time, parse_play_target, run_menu};

struct ThreeMinutes;

impl MetadataReader for ThreeMinutes {
    fn read_duration(&self, _path: &std::path::Path) -> Result<u64, MetadataError> {
        Ok(180)
    }
}

fn fixture() -> (TempDir, EngineHandle) {
    let dir = tempdir().unwrap();
    for rel in ["rock/a.mp3", "rock/b.mp3", "jazz/c.mp3"] {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }
    let engine = PlaybackEngine::new(
        dir.path(),
        LibrarySettings::default(),
        Box::new(NullOutput),
        Box::new(ThreeMinutes),
    );
    (dir, EngineHandle::new(engine))
}

fn drive(handle: &EngineHandle, script: &str) -> String {
    let mut out = Vec::new();
    run_menu(handle, Cursor::new(script.as_bytes().to_vec()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn choice_parsing() {
    assert_eq!(Choice::parse("1"), Some(Choice::Play));
    assert_eq!(Choice::parse(" 10 "), Some(Choice::Reset));
    assert_eq!(Choice::parse("12"), Some(Choice::Quit));
    assert_eq!(Choice::parse("q"), Some(Choice::Quit));
    assert_eq!(Choice::parse("13"), None);
    assert_eq!(Choice::parse("play"), None);
}

#[test]
fn play_prompt_numbers_are_one_based() {
    assert_eq!(parse_play_target("1"), PlayTarget::Index(0));
    assert_eq!(parse_play_target(" 3 "), PlayTarget::Index(2));
    assert_eq!(parse_play_target("0"), PlayTarget::Index(-1));
    assert_eq!(parse_play_target(""), PlayTarget::Advance);
    assert_eq!(
        parse_play_target("so what"),
        PlayTarget::Query("so what".to_string())
    );
    assert_eq!(parse_play_target("-2"), PlayTarget::Query("-2".to_string()));
}

#[test]
fn time_formatting() {
    assert_eq!(format_time(0), "0:00");
    assert_eq!(format_time(65), "1:05");
    assert_eq!(format_time(3600), "60:00");
}

#[test]
fn play_then_info_prints_song_and_genre() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "1\nc.mp3\n7\nq\n");

    assert!(out.contains("Playing: c.mp3 [jazz]"), "{out}");
    assert!(out.contains("Genre:  jazz"), "{out}");
    assert!(out.contains("Time:   0:00 / 3:00 (playing)"), "{out}");
    assert!(out.contains("Bye."));
    // Quitting stops playback but keeps the selection.
    assert_eq!(handle.status().state, PlaybackState::Selected);
}

#[test]
fn play_by_number_and_navigate() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "1\n2\n3\n4\n4\n");

    // Library order is jazz/c, rock/a, rock/b.
    assert!(out.contains("Playing: a.mp3 [rock]"), "{out}");
    assert!(out.contains("Next: b.mp3"), "{out}");
    assert!(out.contains("Previous: a.mp3"), "{out}");
    assert!(out.contains("Previous: c.mp3"), "{out}");
    assert_eq!(handle.status().current, Some(0));
}

#[test]
fn engine_errors_are_reported_and_loop_continues() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "1\n9\n11\n5\n1\nnothing\n99\n");

    assert!(out.contains("Error: index 8 is out of range for 3 tracks"), "{out}");
    assert!(out.contains("Error: nothing is playing"), "{out}");
    assert!(out.contains("Error: no track matches \"nothing\""), "{out}");
    assert!(out.contains("Invalid option"), "{out}");
    assert_eq!(handle.status().state, PlaybackState::Idle);
}

#[test]
fn seek_prompt_validates_input() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "1\n1\n11\n90\n11\nabc\n11\n-5\n11\n999\n");

    assert!(out.contains("Position: 1:30"), "{out}");
    assert!(out.contains("Not a number: abc"), "{out}");
    assert!(out.contains("Error: time cannot be negative (-5s)"), "{out}");
    assert!(out.contains("exceeds the track duration"), "{out}");
    assert_eq!(handle.status().position_secs, 90);
}

#[test]
fn toggles_report_state() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "5\n6\n5\n");

    assert!(out.contains("Shuffle on."));
    assert!(out.contains("Repeat on."));
    assert!(out.contains("Shuffle off."));
    let status = handle.status();
    assert!(!status.shuffle);
    assert!(status.looping);
}

#[test]
fn genre_selection_by_number_and_reset() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "9\n2\n8\n10\n");

    assert!(out.contains("1. jazz\n2. rock"), "{out}");
    assert!(out.contains("Genre selected: rock (2 tracks)"), "{out}");
    assert!(out.contains("Playlist (rock):\n  1. rock/a.mp3\n  2. rock/b.mp3"), "{out}");
    assert!(out.contains("Playlist restored (3 tracks)."), "{out}");
    assert_eq!(handle.status().genre_filter, None);
}

#[test]
fn genre_selection_by_name_and_unknown() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "9\njazz\n1\n\n9\nmetal\n");

    assert!(out.contains("Genre selected: jazz (1 tracks)"), "{out}");
    assert!(out.contains("Playing: c.mp3 [jazz]"), "{out}");
    assert!(out.contains("Error: genre \"metal\" not found"), "{out}");
    assert_eq!(handle.status().genre_filter.as_deref(), Some("jazz"));
}

#[test]
fn playlist_marks_current_track() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "1\n3\n8\n");
    assert!(out.contains("> 3. rock/b.mp3"), "{out}");
    assert!(out.contains("  1. jazz/c.mp3"), "{out}");
}

#[test]
fn info_while_idle() {
    let (_dir, handle) = fixture();
    let out = drive(&handle, "7\n");
    assert!(out.contains("Nothing is selected."));
}

#[test]
fn cli_overrides_settings() {
    let args = Args::try_parse_from(["allegro", "/music", "--headless", "--config", "/tmp/x.toml"])
        .unwrap();
    assert_eq!(args.config, Some(PathBuf::from("/tmp/x.toml")));

    let mut settings = Settings::default();
    args.apply(&mut settings);
    assert_eq!(settings.library.root, PathBuf::from("/music"));
    assert_eq!(settings.audio.backend, AudioBackend::Null);

    let mut untouched = Settings::default();
    Args::try_parse_from(["allegro"]).unwrap().apply(&mut untouched);
    assert_eq!(untouched.library.root, PathBuf::from("songs"));
    assert_eq!(untouched.audio.backend, AudioBackend::Rodio);
}

#[test]
fn headless_startup_builds_working_engine() {
    let (dir, _) = fixture();
    let mut settings = Settings::default();
    settings.library.root = dir.path().to_path_buf();
    settings.audio.backend = AudioBackend::Null;
    settings.playback.shuffle = true;

    let handle = super::startup::build_engine(&settings);
    let status = handle.status();
    assert_eq!(status.library_len, 3);
    assert!(status.shuffle);
    assert!(!status.looping);
}
