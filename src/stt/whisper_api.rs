//! OpenAI audio transcription backend.
//!
//! Posts the raw audio as a multipart upload and asks for a plain-text
//! response. One network call per transcription; a provider failure aborts
//! the run — no retry.

use crate::config::TranscriptionConfig;
use crate::defaults;
use crate::error::{Result, TiresiasError};
use crate::stt::transcriber::Transcriber;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

/// Transcriber backed by the OpenAI audio transcriptions endpoint.
pub struct WhisperApiTranscriber {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl WhisperApiTranscriber {
    /// Build a transcriber around a shared HTTP client.
    ///
    /// Reads the API key from `OPENAI_API_KEY` once, at construction.
    pub fn new(client: reqwest::Client, config: &TranscriptionConfig) -> Result<Self> {
        let api_key = std::env::var(defaults::OPENAI_KEY_VAR).map_err(|_| {
            TiresiasError::MissingCredential {
                variable: defaults::OPENAI_KEY_VAR.to_string(),
            }
        })?;
        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    async fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String> {
        let file = Part::bytes(audio.to_vec()).file_name(filename.to_string());
        let form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "text");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TiresiasError::Transcription {
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TiresiasError::Transcription {
                message: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            return Err(TiresiasError::Transcription {
                message: format!("provider returned {status}: {body}"),
            });
        }

        Ok(body.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> reqwest::Client {
        reqwest::Client::new()
    }

    #[test]
    fn construction_fails_without_api_key() {
        // Serialize env access against the success-path test below
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var(defaults::OPENAI_KEY_VAR);
        }

        let result = WhisperApiTranscriber::new(test_client(), &TranscriptionConfig::default());
        assert!(matches!(
            result,
            Err(TiresiasError::MissingCredential { variable }) if variable == "OPENAI_API_KEY"
        ));
    }

    #[test]
    fn construction_captures_config_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(defaults::OPENAI_KEY_VAR, "sk-test");
        }

        let config = TranscriptionConfig {
            model: "whisper-1".to_string(),
            endpoint: "https://example.test/v1/audio/transcriptions".to_string(),
        };
        let transcriber = WhisperApiTranscriber::new(test_client(), &config).unwrap();
        assert_eq!(transcriber.model, "whisper-1");
        assert_eq!(
            transcriber.endpoint,
            "https://example.test/v1/audio/transcriptions"
        );

        unsafe {
            std::env::remove_var(defaults::OPENAI_KEY_VAR);
        }
    }

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
}
