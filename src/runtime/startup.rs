use allegro::audio::{AudioOutput, NullOutput, RodioOutput};
use allegro::config::{AudioBackend, Settings};
use allegro::engine::{EngineHandle, PlaybackEngine};
use allegro::library::LoftyReader;

/// Open the configured output. A device that cannot be opened degrades to
/// headless playback instead of aborting.
pub fn open_output(backend: AudioBackend) -> Box<dyn AudioOutput> {
    match backend {
        AudioBackend::Null => {
            tracing::info!("running headless");
            Box::new(NullOutput)
        }
        AudioBackend::Rodio => match RodioOutput::open() {
            Ok(out) => Box::new(out),
            Err(e) => {
                tracing::warn!("audio device unavailable, running headless: {e}");
                Box::new(NullOutput)
            }
        },
    }
}

pub fn build_engine(settings: &Settings) -> EngineHandle {
    let output = open_output(settings.audio.backend);
    let mut engine = PlaybackEngine::new(
        settings.library.root.clone(),
        settings.library.clone(),
        output,
        Box::new(LoftyReader),
    );

    // Playback defaults
    engine.set_shuffle(settings.playback.shuffle);
    engine.set_loop(settings.playback.looping);

    EngineHandle::new(engine)
}
