use crate::error::{Result, TiresiasError};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for answering a text question conditioned on an image.
#[async_trait]
pub trait VisualReasoner: Send + Sync {
    /// Ask a single-turn question about a base64-encoded image.
    ///
    /// # Arguments
    /// * `question` - The transcribed question text
    /// * `image_b64` - Base64 encoding of the raw image bytes
    ///
    /// # Returns
    /// The answer text from the model's first completion
    async fn ask(&self, question: &str, image_b64: &str) -> Result<String>;
}

#[async_trait]
impl<T: VisualReasoner> VisualReasoner for Arc<T> {
    async fn ask(&self, question: &str, image_b64: &str) -> Result<String> {
        (**self).ask(question, image_b64).await
    }
}

/// Mock reasoner for testing
#[derive(Debug)]
pub struct MockReasoner {
    response: String,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockReasoner {
    /// Create a new mock reasoner with default settings
    pub fn new() -> Self {
        Self {
            response: "mock answer".to_string(),
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Configure the mock to return a specific answer
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on ask
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of times ask was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockReasoner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisualReasoner for MockReasoner {
    async fn ask(&self, _question: &str, _image_b64: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            Err(TiresiasError::Reasoning {
                message: "mock reasoning failure".to_string(),
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
    async fn test_mock_reasoner_returns_response() {
        let reasoner = MockReasoner::new().with_response("A red circle.");
        let answer = reasoner.ask("What is this?", "aW1n").await.unwrap();
        assert_eq!(answer, "A red circle.");
        assert_eq!(reasoner.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_reasoner_returns_error_when_configured() {
        let reasoner = MockReasoner::new().with_failure();
        let result = reasoner.ask("What is this?", "aW1n").await;
        assert!(matches!(result, Err(TiresiasError::Reasoning { .. })));
        assert_eq!(reasoner.calls(), 1);
    }

    #[tokio::test]
    async fn test_reasoner_trait_is_object_safe() {
        let reasoner: Box<dyn VisualReasoner> =
            Box::new(MockReasoner::new().with_response("boxed"));
        assert_eq!(reasoner.ask("q", "b64").await.unwrap(), "boxed");
    }

    #[tokio::test]
    async fn test_reasoner_works_through_arc() {
        let reasoner = Arc::new(MockReasoner::new());
        reasoner.ask("q", "b64").await.unwrap();
        assert_eq!(reasoner.calls(), 1);
    }
}
