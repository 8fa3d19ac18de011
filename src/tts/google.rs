//! Google Cloud Text-to-Speech backend.
//!
//! Posts the answer text to the `text:synthesize` REST endpoint and decodes
//! the base64 `audioContent` field of the response into raw audio bytes.
//! Voice, language and encoding come from configuration; the defaults match
//! the reference behavior (en-US, en-US-Standard-C, FEMALE, MP3).

use crate::config::SynthesisConfig;
use crate::defaults;
use crate::error::{Result, TiresiasError};
use crate::tts::synthesizer::Synthesizer;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Synthesizer backed by the Google Cloud Text-to-Speech REST API.
pub struct GoogleSynthesizer {
    client: reqwest::Client,
    api_key: String,
    config: SynthesisConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    name: String,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

impl GoogleSynthesizer {
    /// Build a synthesizer around a shared HTTP client.
    ///
    /// Reads the API key from `GOOGLE_TTS_API_KEY` once, at construction.
    pub fn new(client: reqwest::Client, config: &SynthesisConfig) -> Result<Self> {
        let api_key = std::env::var(defaults::GOOGLE_KEY_VAR).map_err(|_| {
            TiresiasError::MissingCredential {
                variable: defaults::GOOGLE_KEY_VAR.to_string(),
            }
        })?;
        Ok(Self {
            client,
            api_key,
            config: config.clone(),
        })
    }

    fn build_request(&self, text: &str) -> SynthesizeRequest {
        SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelection {
                language_code: self.config.language_code.clone(),
                name: self.config.voice.clone(),
                ssml_gender: "FEMALE",
            },
            audio_config: AudioConfig {
                audio_encoding: self.config.encoding.clone(),
            },
        }
    }
}

#[async_trait]
impl Synthesizer for GoogleSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let request = self.build_request(text);

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| TiresiasError::Synthesis {
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TiresiasError::Synthesis {
                message: format!("provider returned {status}: {body}"),
            });
        }

        let parsed: SynthesizeResponse =
            response
                .json()
                .await
                .map_err(|e| TiresiasError::Synthesis {
                    message: format!("failed to parse response: {e}"),
                })?;

        STANDARD
            .decode(&parsed.audio_content)
            .map_err(|e| TiresiasError::Synthesis {
                message: format!("invalid audio content encoding: {e}"),
            })
    }
}
