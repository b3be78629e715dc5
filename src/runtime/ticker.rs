use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use allegro::engine::EngineHandle;

/// Background thread that polls the engine so finished tracks advance while
/// the menu waits for input.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(handle: EngineHandle, every: Duration) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let join = thread::Builder::new()
            .name("allegro-ticker".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Relaxed) {
                    thread::sleep(every);
                    if handle.poll() {
                        tracing::debug!("ticker advanced playback");
                    }
                }
            })?;

        Ok(Self {
            stop,
            join: Some(join),
        })
    }

    /// Stop the thread and wait for it; at most one interval.
    pub fn shutdown(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.halt();
    }
}
