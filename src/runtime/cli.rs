//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use allegro::config::{AudioBackend, Settings};

/// allegro - play a genre-organised music folder from the terminal.
#[derive(Parser, Debug)]
#[command(name = "allegro")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Library root; each first-level folder is a genre.
    pub root: Option<PathBuf>,

    /// Do not open an audio device; transport only moves the cursor.
    #[arg(long)]
    pub headless: bool,

    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Arguments win over config file and environment.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(root) = &self.root {
            settings.library.root = root.clone();
        }
        if self.headless {
            settings.audio.backend = AudioBackend::Null;
        }
    }
}
