//! Default configuration constants for tiresias.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Default run number used to derive input/output file names.
///
/// With run number N the pipeline reads `input_<N>.mp3` and `input_<N>.png`
/// and writes `output_<N>.mp3`. Override individual paths with
/// `--audio`, `--image` and `--output`.
pub const RUN_NUMBER: u32 = 1;

/// Default transcription model identifier.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Default transcription endpoint (OpenAI audio transcriptions API).
pub const TRANSCRIPTION_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Default vision-capable reasoning model identifier.
pub const REASONING_MODEL: &str = "gpt-4-vision-preview";

/// Default reasoning endpoint (OpenAI chat completions API).
pub const REASONING_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Maximum number of generation tokens requested from the reasoning model.
///
/// A brevity hint for the answer, not a locally enforced character limit.
pub const REASONING_MAX_TOKENS: u32 = 200;

/// Instruction appended to the transcribed question before it is sent to
/// the reasoning model. Keeps spoken answers short.
pub const STYLE_HINT: &str = ". Be concise, use as few sentences as possible.";

/// Default speech synthesis endpoint (Google Cloud Text-to-Speech REST API).
pub const SYNTHESIS_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";

/// Default synthesis language code.
pub const SYNTHESIS_LANGUAGE: &str = "en-US";

/// Default synthesis voice name (standard US English female voice).
pub const SYNTHESIS_VOICE: &str = "en-US-Standard-C";

/// Default synthesis audio encoding. The output file is raw MP3 bytes.
pub const SYNTHESIS_ENCODING: &str = "MP3";

/// Default playback poll interval in milliseconds.
///
/// `play` checks the output device at this resolution until it reports
/// not-busy. 1 second matches the reference behavior.
pub const PLAYBACK_POLL_MS: u64 = 1000;

/// Default per-request timeout in seconds, applied to every provider call.
///
/// There is still no retry: a timed-out call fails the run.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the OpenAI API key
/// (transcription and visual reasoning).
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the Google Cloud Text-to-Speech API key.
pub const GOOGLE_KEY_VAR: &str = "GOOGLE_TTS_API_KEY";

/// Derive the default audio input path for a run number.
pub fn default_audio_path(run: u32) -> String {
    format!("input_{run}.mp3")
}

/// Derive the default image input path for a run number.
pub fn default_image_path(run: u32) -> String {
    format!("input_{run}.png")
}

/// Derive the default audio output path for a run number.
pub fn default_output_path(run: u32) -> String {
    format!("output_{run}.mp3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_follow_numbering_convention() {
        assert_eq!(default_audio_path(1), "input_1.mp3");
        assert_eq!(default_image_path(1), "input_1.png");
        assert_eq!(default_output_path(1), "output_1.mp3");
    }

    #[test]
    fn default_paths_use_given_run_number() {
        assert_eq!(default_audio_path(7), "input_7.mp3");
        assert_eq!(default_image_path(42), "input_42.png");
        assert_eq!(default_output_path(42), "output_42.mp3");
    }

    #[test]
    fn style_hint_starts_with_sentence_separator() {
        // The hint is appended directly to the transcribed question.
        assert!(STYLE_HINT.starts_with('.'));
    }
}
