//! Local audio playback.
//!
//! `play` starts the device and then blocks, polling at a fixed interval
//! until the device reports not-busy. The call never returns before the
//! audio has finished; there is no cancellation.

use crate::error::Result;
use std::cell::Cell;
use std::thread;
use std::time::Duration;

/// Trait for a local audio output facility.
///
/// This trait allows swapping implementations (real output device vs mock).
pub trait PlaybackDevice {
    /// Begin playing the given encoded audio. Returns once playback has
    /// started, not once it has finished.
    fn start(&mut self, audio: &[u8]) -> Result<()>;

    /// Whether the device is still playing.
    fn is_busy(&self) -> bool;
}

/// Play audio to completion: start the device, then poll until not-busy.
pub fn play(device: &mut dyn PlaybackDevice, audio: &[u8], poll_interval: Duration) -> Result<()> {
    device.start(audio)?;
    // wait for the audio to finish playing
    while device.is_busy() {
        thread::sleep(poll_interval);
    }
    Ok(())
}

/// Mock playback device for testing
#[derive(Debug)]
pub struct MockPlaybackDevice {
    busy_cycles: Cell<u32>,
    polls: Cell<u32>,
    starts: Cell<u32>,
    should_fail: bool,
}

impl MockPlaybackDevice {
    /// Create a mock that reports busy for the given number of polling
    /// cycles after start
    pub fn new(busy_cycles: u32) -> Self {
        Self {
            busy_cycles: Cell::new(busy_cycles),
            polls: Cell::new(0),
            starts: Cell::new(0),
            should_fail: false,
        }
    }

    /// Configure the mock to fail on start
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of times is_busy was polled
    pub fn polls(&self) -> u32 {
        self.polls.get()
    }

    /// Number of times start was invoked
    pub fn starts(&self) -> u32 {
        self.starts.get()
    }
}

impl PlaybackDevice for MockPlaybackDevice {
    fn start(&mut self, _audio: &[u8]) -> Result<()> {
        self.starts.set(self.starts.get() + 1);
        if self.should_fail {
            return Err(crate::error::TiresiasError::Playback {
                message: "mock playback failure".to_string(),
            });
        }
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        let remaining = self.busy_cycles.get();
        if remaining > 0 {
            self.busy_cycles.set(remaining - 1);
            true
        } else {
            false
        }
    }
}

#[cfg(feature = "playback")]
pub use rodio_device::RodioPlaybackDevice;

#[cfg(feature = "playback")]
mod rodio_device {
    use super::PlaybackDevice;
    use crate::error::{Result, TiresiasError};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::io::Cursor;

    /// Playback through the default system output device via rodio.
    pub struct RodioPlaybackDevice {
        // Dropping the stream stops playback, keep it alive for the
        // lifetime of the device.
        _stream: OutputStream,
        _handle: OutputStreamHandle,
        sink: Sink,
    }

    impl RodioPlaybackDevice {
        /// Open the default output device.
        pub fn try_default() -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| TiresiasError::Playback {
                    message: format!("failed to open default output device: {e}"),
                })?;
            let sink = Sink::try_new(&handle).map_err(|e| TiresiasError::Playback {
                message: format!("failed to create sink: {e}"),
            })?;
            Ok(Self {
                _stream: stream,
                _handle: handle,
                sink,
            })
        }
    }

    impl PlaybackDevice for RodioPlaybackDevice {
        fn start(&mut self, audio: &[u8]) -> Result<()> {
            let source =
                Decoder::new(Cursor::new(audio.to_vec())).map_err(|e| TiresiasError::Playback {
                    message: format!("failed to decode audio: {e}"),
                })?;
            self.sink.append(source);
            Ok(())
        }

        fn is_busy(&self) -> bool {
            !self.sink.empty()
        }
    }
}
