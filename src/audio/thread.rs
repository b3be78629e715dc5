use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{AudioCmd, DeviceError, StatusHandle};

/// How often the thread checks whether the current sink has drained.
const TICK: Duration = Duration::from_millis(200);

/// The track currently owned by the audio thread.
struct Loaded {
    path: PathBuf,
    looping: bool,
    sink: Sink,
}

/// Spawn the thread that owns the output stream.
///
/// The stream is opened on the new thread; `ready` receives the outcome
/// before any command is processed.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    status: StatusHandle,
    ready: SyncSender<Result<(), DeviceError>>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("allegro-audio".to_string())
        .spawn(move || {
            let mut stream = match OutputStreamBuilder::open_default_stream() {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = ready.send(Err(DeviceError::Unavailable(e.to_string())));
                    return;
                }
            };
            // rodio logs to stderr when OutputStream is dropped, which would
            // garble the menu.
            stream.log_on_drop(false);
            let _ = ready.send(Ok(()));

            run(&stream, &rx, &status);
        })
}

fn run(stream: &OutputStream, rx: &Receiver<AudioCmd>, status: &StatusHandle) {
    let mut current: Option<Loaded> = None;

    loop {
        match rx.recv_timeout(TICK) {
            Ok(AudioCmd::Load {
                path,
                looping,
                start_at,
                reply,
            }) => {
                let result = load(stream, &mut current, status, path, looping, start_at);
                let _ = reply.send(result);
            }
            Ok(AudioCmd::SetLooping(on)) => {
                if let Some(loaded) = current.as_mut() {
                    loaded.looping = on;
                }
            }
            Ok(AudioCmd::Stop) => stop(&mut current, status),
            Ok(AudioCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                stop(&mut current, status);
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                let drained = current.as_ref().is_some_and(|l| l.sink.empty());
                if !drained {
                    continue;
                }

                let restart = current
                    .as_ref()
                    .filter(|l| l.looping)
                    .map(|l| l.path.clone());
                match restart {
                    Some(path) => {
                        tracing::debug!(path = %path.display(), "looping track");
                        let restarted =
                            load(stream, &mut current, status, path, true, Duration::ZERO);
                        if let Err(e) = restarted {
                            tracing::warn!("loop restart failed: {e}");
                        }
                    }
                    None => {
                        if let Ok(mut s) = status.lock() {
                            s.clock.finish(Instant::now());
                        }
                    }
                }
            }
        }
    }
}

fn load(
    stream: &OutputStream,
    current: &mut Option<Loaded>,
    status: &StatusHandle,
    path: PathBuf,
    looping: bool,
    start_at: Duration,
) -> Result<(), DeviceError> {
    if let Some(old) = current.take() {
        old.sink.stop();
    }

    match create_sink_at(stream, &path, start_at) {
        Ok(sink) => {
            sink.play();
            *current = Some(Loaded {
                path,
                looping,
                sink,
            });
            if let Ok(mut s) = status.lock() {
                s.clock.start(start_at, Instant::now());
            }
            Ok(())
        }
        Err(e) => {
            if let Ok(mut s) = status.lock() {
                s.clock.clear();
            }
            Err(e)
        }
    }
}

fn stop(current: &mut Option<Loaded>, status: &StatusHandle) {
    if let Some(old) = current.take() {
        old.sink.stop();
    }
    if let Ok(mut s) = status.lock() {
        s.clock.clear();
    }
}
