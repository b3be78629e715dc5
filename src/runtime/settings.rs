use std::path::Path;

use allegro::config::Settings;

/// Load settings, falling back to defaults. A config problem never stops
/// startup; it is returned so it can be logged once logging is up.
pub fn load_settings(explicit: Option<&Path>) -> (Settings, Option<String>) {
    let loaded = match explicit {
        Some(path) => Settings::load_from(Some(path)),
        None => Settings::load(),
    };

    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        Err(e) => (
            Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
