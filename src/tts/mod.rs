//! Text-to-speech: synthesize the answer as audio.

pub mod google;
pub mod synthesizer;

pub use google::GoogleSynthesizer;
pub use synthesizer::{MockSynthesizer, Synthesizer};
