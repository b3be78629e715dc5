//! Audio output seam.
//!
//! The engine drives playback through the [`AudioOutput`] trait. Two
//! implementations exist: [`RodioOutput`], which owns a dedicated audio thread
//! holding the rodio output stream, and [`NullOutput`] for headless
//! deployments where transport calls only move the cursor.

mod null;
mod player;
mod sink;
mod thread;
mod types;

pub use null::NullOutput;
pub use player::RodioOutput;
pub use types::{AudioOutput, DeviceError, PlaybackClock};
