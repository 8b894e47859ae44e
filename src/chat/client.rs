// src/chat/client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ChatError;
use super::prompt::{build_prompt, extract_reply, PERSONA};
use crate::config::{InferenceConfig, InferenceMode};
use crate::types::ChatMessage;

const MAX_NEW_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
struct TextGenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    repetition_penalty: f32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

/// OppGenie's connection to the hosted language model.
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: String,
    mode: InferenceMode,
    api_token: Option<String>,
}

impl ChatClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
            model: config.model.clone(),
            mode: config.mode,
            api_token: config.api_token.clone(),
        })
    }

    /// Reply to the conversation, or a canned fallback string when the endpoint fails.
    /// Only a missing token is returned as an error.
    pub async fn generate_response(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        match self.complete(messages).await {
            Ok(reply) => Ok(reply),
            Err(e) if e.is_configuration() => Err(e),
            Err(e) => {
                warn!("Error generating response: {}", e);
                Ok(e.fallback_message().to_string())
            }
        }
    }

    /// Single request with the failure left classified
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let token = self
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ChatError::MissingToken)?;

        info!(
            "Sending {} message(s) to inference endpoint: {}",
            messages.len(),
            self.endpoint
        );

        match self.mode {
            InferenceMode::TextGeneration => self.text_generation(token, messages).await,
            InferenceMode::ChatCompletion => self.chat_completion(token, messages).await,
        }
    }

    async fn text_generation(&self, token: &str, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let prompt = build_prompt(messages);
        let request = TextGenerationRequest {
            inputs: &prompt,
            parameters: TextGenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                top_p: 0.95,
                repetition_penalty: 1.15,
                do_sample: true,
            },
        };

        let body = self.post(token, &request).await?;
        let generated: Vec<GeneratedText> = serde_json::from_str(&body)
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;
        let text = generated
            .first()
            .map(|g| g.generated_text.as_str())
            .ok_or_else(|| ChatError::InvalidResponse("no generated_text".to_string()))?;

        extract_reply(text).ok_or(ChatError::EmptyReply)
    }

    async fn chat_completion(&self, token: &str, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let wire: Vec<WireMessage> = std::iter::once(WireMessage {
            role: "system",
            content: PERSONA,
        })
        .chain(messages.iter().map(|m| WireMessage {
            role: m.role.as_str(),
            content: &m.content,
        }))
        .collect();

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: wire,
            max_tokens: MAX_NEW_TOKENS,
            temperature: TEMPERATURE,
        };

        let body = self.post(token, &request).await?;
        let response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ChatError::EmptyReply)
    }

    async fn post<T: Serialize>(&self, token: &str, payload: &T) -> Result<String, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            warn!("Inference API error {}: {}", status, text);
            Err(ChatError::from_status(status, text))
        }
    }
}
