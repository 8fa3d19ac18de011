use crate::error::{Result, TiresiasError};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for speech synthesis.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize speech for the given text.
    ///
    /// # Returns
    /// Raw encoded audio bytes (MP3 with the default configuration)
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Synthesizer> Synthesizer for Arc<T> {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        (**self).synthesize(text).await
    }
}

/// Mock synthesizer for testing
#[derive(Debug)]
pub struct MockSynthesizer {
    audio: Vec<u8>,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer with default settings
    pub fn new() -> Self {
        Self {
            audio: vec![0xFF, 0xFB, 0x90, 0x00],
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Configure the mock to return specific audio bytes
    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = audio;
        self
    }

    /// Configure the mock to fail on synthesize
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of times synthesize was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            Err(TiresiasError::Synthesis {
                message: "mock synthesis failure".to_string(),
            })
        } else {
            Ok(self.audio.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_synthesizer_returns_audio() {
        let synthesizer = MockSynthesizer::new().with_audio(vec![1, 2, 3]);
        let audio = synthesizer.synthesize("hello").await.unwrap();
        assert_eq!(audio, vec![1, 2, 3]);
        assert_eq!(synthesizer.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_synthesizer_default_audio_is_nonempty() {
        let synthesizer = MockSynthesizer::new();
        let audio = synthesizer.synthesize("hello").await.unwrap();
        assert!(!audio.is_empty());
    }

    #[tokio::test]
    async fn test_mock_synthesizer_returns_error_when_configured() {
        let synthesizer = MockSynthesizer::new().with_failure();
        let result = synthesizer.synthesize("hello").await;
        assert!(matches!(result, Err(TiresiasError::Synthesis { .. })));
    }

    #[tokio::test]
    async fn test_synthesizer_trait_is_object_safe() {
        let synthesizer: Box<dyn Synthesizer> =
            Box::new(MockSynthesizer::new().with_audio(vec![9]));
        assert_eq!(synthesizer.synthesize("x").await.unwrap(), vec![9]);
    }
}
