//! Line-oriented interactive menu.
//!
//! Reads one choice per line from `input` and writes everything user-facing to
//! `out`, so the whole loop can be driven from tests.

use std::io::{self, BufRead, Write};

use allegro::engine::{EngineError, EngineHandle, PlayTarget, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Play,
    Stop,
    Next,
    Previous,
    Shuffle,
    Repeat,
    Info,
    Playlist,
    Genre,
    Reset,
    Seek,
    Quit,
}

impl Choice {
    pub fn parse(s: &str) -> Option<Self> {
        let c = match s.trim() {
            "1" => Self::Play,
            "2" => Self::Stop,
            "3" => Self::Next,
            "4" => Self::Previous,
            "5" => Self::Shuffle,
            "6" => Self::Repeat,
            "7" => Self::Info,
            "8" => Self::Playlist,
            "9" => Self::Genre,
            "10" => Self::Reset,
            "11" => Self::Seek,
            "12" | "q" | "Q" => Self::Quit,
            _ => return None,
        };
        Some(c)
    }
}

const MENU: &str = "\
== allegro ==
[1]  Play track
[2]  Stop
[3]  Next track
[4]  Previous track
[5]  Toggle shuffle
[6]  Toggle repeat
[7]  Current track info
[8]  Show playlist
[9]  Select genre
[10] Reset playlist
[11] Seek
[12] Quit";

const PLAY_PROMPT: &str = "Track number or part of the name (empty for next): ";

/// What the user typed at the play prompt: a 1-based number, a name
/// fragment, or nothing to advance.
pub fn parse_play_target(input: &str) -> PlayTarget {
    let input = input.trim();
    if input.is_empty() {
        return PlayTarget::Advance;
    }
    if input.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = input.parse::<i64>() {
            return PlayTarget::Index(n - 1);
        }
    }
    PlayTarget::Query(input.to_string())
}

pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn run_menu<R: BufRead, W: Write>(
    handle: &EngineHandle,
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out, "{MENU}")?;
        let Some(line) = prompt(&mut input, out, "Choose an option: ")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(choice) = Choice::parse(&line) else {
            writeln!(out, "Invalid option, try again.")?;
            continue;
        };
        if choice == Choice::Quit {
            handle.stop();
            writeln!(out, "Bye.")?;
            break;
        }

        if let Err(e) = dispatch(handle, choice, &mut input, out)? {
            writeln!(out, "Error: {e}")?;
        }
    }
    Ok(())
}

/// Outer `Result` is terminal I/O; inner is the engine's answer.
fn dispatch<R: BufRead, W: Write>(
    handle: &EngineHandle,
    choice: Choice,
    input: &mut R,
    out: &mut W,
) -> io::Result<Result<(), EngineError>> {
    let outcome = match choice {
        Choice::Play => {
            let Some(line) = prompt(input, out, PLAY_PROMPT)? else {
                return Ok(Ok(()));
            };
            handle
                .play(parse_play_target(&line))
                .map(|t| writeln!(out, "Playing: {} [{}]", t.current_song, t.genre))
        }
        Choice::Stop => {
            handle.stop();
            Ok(writeln!(out, "Stopped."))
        }
        Choice::Next => handle.next().map(|t| writeln!(out, "Next: {}", t.current_song)),
        Choice::Previous => handle
            .previous()
            .map(|t| writeln!(out, "Previous: {}", t.current_song)),
        Choice::Shuffle => {
            let on = handle.toggle_shuffle();
            Ok(writeln!(out, "Shuffle {}.", on_off(on)))
        }
        Choice::Repeat => {
            let on = handle.toggle_loop();
            Ok(writeln!(out, "Repeat {}.", on_off(on)))
        }
        Choice::Info => Ok(write_info(out, &handle.info())),
        Choice::Playlist => Ok(write_playlist(handle, out)),
        Choice::Genre => return select_genre(handle, input, out),
        Choice::Reset => {
            handle.reset_playlist();
            let count = handle.status().playlist_len;
            Ok(writeln!(out, "Playlist restored ({count} tracks)."))
        }
        Choice::Seek => {
            let Some(line) = prompt(input, out, "Seconds: ")? else {
                return Ok(Ok(()));
            };
            match line.trim().parse::<i64>() {
                Ok(secs) => handle
                    .seek(secs)
                    .map(|()| writeln!(out, "Position: {}", format_time(secs.unsigned_abs()))),
                Err(_) => Ok(writeln!(out, "Not a number: {}", line.trim())),
            }
        }
        Choice::Quit => Ok(Ok(())),
    };

    match outcome {
        Ok(written) => written.map(Ok),
        Err(e) => Ok(Err(e)),
    }
}

fn select_genre<R: BufRead, W: Write>(
    handle: &EngineHandle,
    input: &mut R,
    out: &mut W,
) -> io::Result<Result<(), EngineError>> {
    let genres = handle.list_genres();
    if genres.is_empty() {
        writeln!(out, "No genres found.")?;
        return Ok(Ok(()));
    }
    writeln!(out, "Genres:")?;
    for (i, name) in genres.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, name)?;
    }

    let Some(line) = prompt(input, out, "Genre number or name: ")? else {
        return Ok(Ok(()));
    };
    let answer = line.trim();
    let name = match answer.parse::<usize>() {
        Ok(n) if (1..=genres.len()).contains(&n) => genres[n - 1].as_str(),
        _ => answer,
    };

    match handle.select_genre(name) {
        Ok(()) => {
            let count = handle.status().playlist_len;
            writeln!(out, "Genre selected: {name} ({count} tracks)")?;
            Ok(Ok(()))
        }
        Err(e) => Ok(Err(e)),
    }
}

fn write_info<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    let Some(t) = snapshot.track() else {
        return writeln!(out, "Nothing is selected.");
    };
    writeln!(out, "Song:   {}", t.current_song)?;
    writeln!(out, "Genre:  {}", t.genre)?;
    writeln!(out, "Path:   {}", t.rel_path)?;
    let duration = if t.duration > 0 {
        format_time(t.duration)
    } else {
        "?".to_string()
    };
    writeln!(
        out,
        "Time:   {} / {} ({})",
        format_time(t.time_played),
        duration,
        if t.playing { "playing" } else { "stopped" }
    )
}

fn write_playlist<W: Write>(handle: &EngineHandle, out: &mut W) -> io::Result<()> {
    let tracks = handle.list_tracks();
    let status = handle.status();
    match &status.genre_filter {
        Some(g) => writeln!(out, "Playlist ({g}):")?,
        None => writeln!(out, "Playlist:")?,
    }
    if tracks.is_empty() {
        return writeln!(out, "  (empty)");
    }
    for (i, path) in tracks.iter().enumerate() {
        let marker = if status.current == Some(i) { '>' } else { ' ' };
        writeln!(out, "{marker} {}. {path}", i + 1)?;
    }
    Ok(())
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

/// Print `label`, read one line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
