use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioOutput, DeviceError, DeviceStatus, StatusHandle};

/// `AudioOutput` backed by the default rodio output device.
///
/// The stream lives on a dedicated thread; this handle talks to it over a
/// channel and waits for a reply on every load so decode errors reach the
/// engine.
pub struct RodioOutput {
    tx: Sender<AudioCmd>,
    status: StatusHandle,
    loaded: Option<(PathBuf, bool)>,
    join: Option<JoinHandle<()>>,
}

impl RodioOutput {
    /// Open the default output device.
    pub fn open() -> Result<Self, DeviceError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let status: StatusHandle = Arc::new(Mutex::new(DeviceStatus::default()));

        let join = spawn_audio_thread(rx, status.clone(), ready_tx)
            .map_err(|e| DeviceError::Unavailable(e.to_string()))?;
        ready_rx.recv().map_err(|_| DeviceError::Disconnected)??;

        tracing::info!("audio output opened");
        Ok(Self {
            tx,
            status,
            loaded: None,
            join: Some(join),
        })
    }

    fn request(&self, path: &Path, looping: bool, start_at: Duration) -> Result<(), DeviceError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(AudioCmd::Load {
                path: path.to_path_buf(),
                looping,
                start_at,
                reply: reply_tx,
            })
            .map_err(|_| DeviceError::Disconnected)?;
        reply_rx.recv().map_err(|_| DeviceError::Disconnected)?
    }
}

impl AudioOutput for RodioOutput {
    fn load_and_play(&mut self, path: &Path, looping: bool) -> Result<(), DeviceError> {
        self.loaded = None;
        self.request(path, looping, Duration::ZERO)?;
        self.loaded = Some((path.to_path_buf(), looping));
        Ok(())
    }

    fn stop(&mut self) {
        self.loaded = None;
        let _ = self.tx.send(AudioCmd::Stop);
    }

    fn seek(&mut self, seconds: u64) -> Result<(), DeviceError> {
        let (path, looping) = self.loaded.clone().ok_or(DeviceError::NothingLoaded)?;
        let result = self.request(&path, looping, Duration::from_secs(seconds));
        if result.is_err() {
            self.loaded = None;
        }
        result
    }

    fn set_looping(&mut self, looping: bool) {
        if let Some((_, flag)) = self.loaded.as_mut() {
            *flag = looping;
        }
        let _ = self.tx.send(AudioCmd::SetLooping(looping));
    }

    fn elapsed_seconds(&self) -> Option<u64> {
        let elapsed = self
            .status
            .lock()
            .map(|s| s.clock.elapsed(Instant::now()))
            .unwrap_or_default();
        Some(elapsed.as_secs())
    }

    fn is_busy(&self) -> bool {
        self.status
            .lock()
            .map(|s| s.clock.is_running())
            .unwrap_or(false)
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}
