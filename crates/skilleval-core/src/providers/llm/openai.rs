use super::LlmClient;
use crate::errors::ModelUnavailable;
use crate::model::{ChatMessage, GenerationResult, StopReason, Usage};
use async_trait::async_trait;
use serde_json::json;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIClient {
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(model: String, api_key: String, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model,
            api_key,
            temperature,
            max_tokens,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point at an OpenAI-compatible endpoint (proxy, gateway, local server).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn unavailable(&self, detail: impl Into<String>) -> ModelUnavailable {
        ModelUnavailable::new("openai", self.model.clone(), detail)
    }

    pub(crate) fn build_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }
}

/// Parse `choices[*].message.content`, `finish_reason` and `usage`.
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<GenerationResult, String> {
    let choices = json
        .get("choices")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "OpenAI API response missing choices".to_string())?;

    let mut candidates = Vec::with_capacity(choices.len());
    let mut stop_reasons = Vec::with_capacity(choices.len());
    for choice in choices {
        let text = choice
            .pointer("/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| "OpenAI API response missing content".to_string())?;
        candidates.push(text.to_string());
        if let Some(reason) = choice.get("finish_reason").and_then(|v| v.as_str()) {
            stop_reasons.push(StopReason::parse(reason));
        }
    }

    let usage = json.get("usage").map(|u| Usage {
        prompt_tokens: u.get("prompt_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
        completion_tokens: u
            .get("completion_tokens")
            .and_then(|v| v.as_u64())
            .unwrap_or(0),
    });

    Ok(GenerationResult {
        candidates,
        usage,
        stop_reasons,
    })
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, ModelUnavailable> {
        super::ensure_messages(self, messages)?;
        if self.api_key.is_empty() {
            return Err(self.unavailable(format!("{} is not set", API_KEY_ENV)));
        }

        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_body(messages);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.unavailable(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            return Err(self.unavailable(format!(
                "OpenAI chat API error (status {}): {}",
                status, error_text
            )));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| self.unavailable(format!("invalid response body: {}", e)))?;

        parse_response(&json).map_err(|detail| self.unavailable(detail))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
