//! OpenAI chat-completions backend for visual reasoning.
//!
//! Composes one user turn: the question (with the concise-style hint
//! appended) plus the image as an inline JPEG-style data URI, capped at a
//! configured number of generation tokens. Returns the first choice's
//! message content.

use crate::config::ReasoningConfig;
use crate::defaults;
use crate::error::{Result, TiresiasError};
use crate::vision::reasoner::VisualReasoner;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Visual reasoner backed by the OpenAI chat completions endpoint.
pub struct OpenAiReasoner {
    client: reqwest::Client,
    api_key: String,
    config: ReasoningConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiReasoner {
    /// Build a reasoner around a shared HTTP client.
    ///
    /// Reads the API key from `OPENAI_API_KEY` once, at construction.
    pub fn new(client: reqwest::Client, config: &ReasoningConfig) -> Result<Self> {
        let api_key = std::env::var(defaults::OPENAI_KEY_VAR).map_err(|_| {
            TiresiasError::MissingCredential {
                variable: defaults::OPENAI_KEY_VAR.to_string(),
            }
        })?;
        Ok(Self {
            client,
            api_key,
            config: config.clone(),
        })
    }

    fn build_request(&self, question: &str, image_b64: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: format!("{question}{}", self.config.style_hint),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{image_b64}"),
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl VisualReasoner for OpenAiReasoner {
    async fn ask(&self, question: &str, image_b64: &str) -> Result<String> {
        let request = self.build_request(question, image_b64);

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TiresiasError::Reasoning {
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TiresiasError::Reasoning {
                message: format!("provider returned {status}: {body}"),
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| TiresiasError::Reasoning {
                    message: format!("failed to parse response: {e}"),
                })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TiresiasError::Reasoning {
                message: "response contained no completion".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reasoner_with(config: ReasoningConfig) -> OpenAiReasoner {
        OpenAiReasoner {
            client: reqwest::Client::new(),
            api_key: "sk-test".to_string(),
            config,
        }
    }

    #[test]
    fn request_appends_style_hint_to_question() {
        let reasoner = reasoner_with(ReasoningConfig::default());
        let request = reasoner.build_request("What is this?", "aW1n");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["messages"][0]["content"][0]["text"],
            "What is this?. Be concise, use as few sentences as possible."
        );
    }

    #[test]
    fn request_embeds_data_uri_image() {
        let reasoner = reasoner_with(ReasoningConfig::default());
        let request = reasoner.build_request("q", "QUJD");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,QUJD"
        );
    }

    #[test]
    fn request_carries_model_and_token_cap() {
        let config = ReasoningConfig {
            max_tokens: 150,
            ..ReasoningConfig::default()
        };
        let reasoner = reasoner_with(config);
        let request = reasoner.build_request("q", "b64");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4-vision-preview");
        assert_eq!(json["max_tokens"], 150);
    }

    #[test]
    fn response_parses_first_choice_content() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "A red circle."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(answer, "A red circle.");
    }

    #[test]
    fn response_without_choices_parses_to_empty() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
