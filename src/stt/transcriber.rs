use crate::error::{Result, TiresiasError};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real provider vs mock).
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe raw encoded audio bytes to text.
    ///
    /// # Arguments
    /// * `audio` - Raw encoded audio (MP3 or equivalent)
    /// * `filename` - Original file name, forwarded so the provider can
    ///   infer the container format
    ///
    /// # Returns
    /// The plain-text transcription, no diarization or timestamps
    async fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String>;
}

/// Implement Transcriber for Arc<T> to allow sharing a single provider
/// handle across the process.
#[async_trait]
impl<T: Transcriber> Transcriber for Arc<T> {
    async fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String> {
        (**self).transcribe(audio, filename).await
    }
}

/// Mock transcriber for testing
#[derive(Debug)]
pub struct MockTranscriber {
    response: String,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new() -> Self {
        Self {
            response: "mock transcription".to_string(),
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Configure the mock to return a specific response
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of times transcribe was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &[u8], _filename: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            Err(TiresiasError::Transcription {
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transcriber_returns_response() {
        let transcriber = MockTranscriber::new().with_response("Hello, this is a test");

        let result = transcriber.transcribe(b"audio", "q.mp3").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Hello, this is a test");
    }

    #[tokio::test]
    async fn test_mock_transcriber_returns_error_when_configured() {
        let transcriber = MockTranscriber::new().with_failure();

        let result = transcriber.transcribe(b"audio", "q.mp3").await;

        match result {
            Err(TiresiasError::Transcription { message }) => {
                assert_eq!(message, "mock transcription failure");
            }
            other => panic!("Expected Transcription error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_transcriber_counts_calls() {
        let transcriber = MockTranscriber::new();
        assert_eq!(transcriber.calls(), 0);

        transcriber.transcribe(b"a", "a.mp3").await.unwrap();
        transcriber.transcribe(b"b", "b.mp3").await.unwrap();
        assert_eq!(transcriber.calls(), 2);
    }

    #[tokio::test]
    async fn test_transcriber_works_through_arc() {
        let transcriber = Arc::new(MockTranscriber::new().with_response("shared"));
        let result = transcriber.transcribe(b"audio", "q.mp3").await.unwrap();
        assert_eq!(result, "shared");
        assert_eq!(transcriber.calls(), 1);
    }

    #[tokio::test]
    async fn test_transcriber_trait_is_object_safe() {
        let transcriber: Box<dyn Transcriber> =
            Box::new(MockTranscriber::new().with_response("boxed test"));

        let result = transcriber.transcribe(b"audio", "q.mp3").await;
        assert_eq!(result.unwrap(), "boxed test");
    }

    #[tokio::test]
    async fn test_mock_transcriber_empty_audio() {
        let transcriber = MockTranscriber::new();
        let result = transcriber.transcribe(&[], "empty.mp3").await;
        assert!(result.is_ok());
    }
}
