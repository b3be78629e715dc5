use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use allegro::config::LoggingSettings;

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured filter. Output goes to stderr; stdout belongs to the menu.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new(LoggingSettings::default().filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
