//! tiresias - Ask a spoken question about an image, hear the answer
//!
//! One invocation runs one pass: transcribe the recorded question, ask a
//! vision-capable model about the image, synthesize the answer to speech,
//! write it out and play it.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod playback;
pub mod stt;
pub mod tts;
pub mod vision;

// Core adapter traits (one per external capability)
pub use playback::PlaybackDevice;
pub use stt::Transcriber;
pub use tts::Synthesizer;
pub use vision::VisualReasoner;

// Pipeline
pub use pipeline::{NullReporter, Pipeline, RunOutcome, Stage, StageReporter};

// Error handling
pub use error::{Result, TiresiasError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
