//! OpenAiClient - Direct REST API implementation for the assessment model.
//!
//! This client calls the OpenAI Chat Completions API directly.
//! Configuration priority: ~/.config/mend/secret.json > environment variables

use crate::prompt;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use mend_core::assessment::{AssessmentRequest, WoundImage};
use mend_core::client::AssessmentClient;
use mend_core::config::{SecretConfig, load_secret_config};
use mend_core::error::{MendError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_MODEL: &str = "gpt-4.1";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Response cap for the structured assessment request. Follow-up answers
/// are capped by instruction only, matching the original contract.
const ASSESSMENT_MAX_TOKENS: u32 = 1000;

/// Client that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Loads configuration from ~/.config/mend/secret.json or environment
    /// variables.
    ///
    /// Priority:
    /// 1. ~/.config/mend/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// Model name defaults to `gpt-4.1` if not specified. A missing
    /// credential is a fatal startup condition for the application.
    pub fn try_from_env() -> Result<Self> {
        if let Ok(secret_config) = load_secret_config() {
            if let Some(client) = Self::from_secret_config(&secret_config) {
                return Ok(client);
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            MendError::config(
                "No OpenAI API key found. Add an \"openai\" entry to \
                 ~/.config/mend/secret.json or set OPENAI_API_KEY in the environment.",
            )
        })?;

        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Builds a client from an already-loaded secret configuration.
    pub fn from_secret_config(config: &SecretConfig) -> Option<Self> {
        let openai = config.openai.as_ref()?;
        let model = openai
            .model_name
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        Some(Self::new(openai.api_key.clone(), model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn image_to_content(image: &WoundImage) -> ContentPart {
        // OpenAI expects data URLs for inline base64 images
        let data_url = format!(
            "data:{};base64,{}",
            image.mime_type(),
            BASE64_STANDARD.encode(image.bytes())
        );

        ContentPart::ImageUrl {
            image_url: ImageUrl { url: data_url },
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| MendError::api(format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| MendError::api(format!("Failed to parse OpenAI response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait::async_trait]
impl AssessmentClient for OpenAiClient {
    async fn request_assessment(&self, request: &AssessmentRequest) -> Result<String> {
        let image = request
            .image
            .as_ref()
            .ok_or_else(|| MendError::internal("Assessment request reached client without image"))?;

        let instruction = prompt::assessment_prompt(request)?;
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text { text: instruction },
                    Self::image_to_content(image),
                ],
            }],
            max_tokens: Some(ASSESSMENT_MAX_TOKENS),
        };

        tracing::debug!(model = %self.model, image_bytes = image.len(), "Requesting assessment");
        self.send_request(&body).await
    }

    async fn request_follow_up(&self, context: &str, question: &str) -> Result<String> {
        let instruction = prompt::follow_up_prompt(context, question)?;
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![ContentPart::Text { text: instruction }],
            }],
            max_tokens: None,
        };

        tracing::debug!(model = %self.model, "Requesting follow-up answer");
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

// Custom serialization for the tagged content parts
impl Serialize for ContentPart {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;

        match self {
            ContentPart::Text { text } => {
                map.serialize_entry("type", "text")?;
                map.serialize_entry("text", text)?;
            }
            ContentPart::ImageUrl { image_url } => {
                map.serialize_entry("type", "image_url")?;
                map.serialize_entry("image_url", image_url)?;
            }
        }

        map.end()
    }
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| MendError::api("OpenAI API returned no content in the response"))
}

fn map_http_error(status: StatusCode, body: String) -> MendError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    MendError::api_status(status.as_u16(), message)
}
