use super::LlmClient;
use crate::errors::ModelUnavailable;
use crate::model::{ChatMessage, GenerationResult, StopReason, Usage};
use async_trait::async_trait;
use futures::future::join_all;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_NUM_CTX: u32 = 48_000;

/// Self-hosted model served by an Ollama daemon.
pub struct OllamaClient {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub num_ctx: u32,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(model: String, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model,
            temperature,
            max_tokens,
            num_ctx: DEFAULT_NUM_CTX,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_num_ctx(mut self, num_ctx: u32) -> Self {
        self.num_ctx = num_ctx;
        self
    }

    fn unavailable(&self, detail: impl Into<String>) -> ModelUnavailable {
        ModelUnavailable::new("ollama", self.model.clone(), detail)
    }

    pub(crate) fn build_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "options": {
                "temperature": self.temperature,
                "num_predict": self.max_tokens,
                "num_ctx": self.num_ctx,
            }
        })
    }

    async fn chat_once(&self, messages: &[ChatMessage]) -> Result<GenerationResult, ModelUnavailable> {
        let url = format!("{}/api/chat", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&self.build_body(messages))
            .send()
            .await
            .map_err(|e| self.unavailable(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            return Err(self.unavailable(format!(
                "Ollama chat API error (status {}): {}",
                status, error_text
            )));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| self.unavailable(format!("invalid response body: {}", e)))?;
        parse_response(&json).map_err(|detail| self.unavailable(detail))
    }

    /// Send every message as its own single-turn conversation, concurrently.
    ///
    /// Candidates and stop reasons come back in input order; usage is the total
    /// over all requests. Any failed request fails the whole batch.
    pub async fn generate_each(
        &self,
        messages: &[ChatMessage],
    ) -> Result<GenerationResult, ModelUnavailable> {
        super::ensure_messages(self, messages)?;
        let results = join_all(
            messages
                .iter()
                .map(|m| self.chat_once(std::slice::from_ref(m))),
        )
        .await;

        let mut merged = GenerationResult {
            candidates: Vec::with_capacity(results.len()),
            usage: Some(Usage::default()),
            stop_reasons: Vec::with_capacity(results.len()),
        };
        for res in results {
            let res = res?;
            merged.candidates.extend(res.candidates);
            merged.stop_reasons.extend(res.stop_reasons);
            if let (Some(total), Some(u)) = (merged.usage.as_mut(), res.usage) {
                *total += u;
            }
        }
        Ok(merged)
    }
}

pub(crate) fn parse_response(json: &serde_json::Value) -> Result<GenerationResult, String> {
    let text = json
        .pointer("/message/content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Ollama API response missing message content".to_string())?;

    let usage = Usage {
        prompt_tokens: json
            .get("prompt_eval_count")
            .and_then(|v| v.as_u64())
            .unwrap_or(0),
        completion_tokens: json.get("eval_count").and_then(|v| v.as_u64()).unwrap_or(0),
    };

    let stop_reasons = json
        .get("done_reason")
        .and_then(|v| v.as_str())
        .map(|r| vec![StopReason::parse(r)])
        .unwrap_or_default();

    Ok(GenerationResult {
        candidates: vec![text.to_string()],
        usage: Some(usage),
        stop_reasons,
    })
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, ModelUnavailable> {
        super::ensure_messages(self, messages)?;
        self.chat_once(messages).await
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
