pub mod deadline;
pub mod fake;
pub mod ollama;
pub mod openai;

use crate::config::ModelSpec;
use crate::errors::{EvalError, ModelUnavailable};
use crate::model::{ChatMessage, GenerationResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A chat-capable model endpoint.
///
/// Implementations keep no conversation state between calls; callers pass the
/// full history in `messages` every time. No retry is promised: a failed call
/// may or may not have reached the provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, ModelUnavailable>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Rejects an empty conversation before any network traffic.
pub(crate) fn ensure_messages(
    client: &dyn LlmClient,
    messages: &[ChatMessage],
) -> Result<(), ModelUnavailable> {
    if messages.is_empty() {
        return Err(ModelUnavailable::new(
            client.provider_name(),
            client.model_name(),
            "refusing to send an empty conversation",
        ));
    }
    Ok(())
}

/// Build the gateway for one configured model.
///
/// This is the only place provider tags are looked at; everything downstream
/// holds an `Arc<dyn LlmClient>`.
pub fn build_client(
    spec: &ModelSpec,
    timeout: Option<Duration>,
) -> Result<Arc<dyn LlmClient>, EvalError> {
    let client: Arc<dyn LlmClient> = match spec.provider.trim().to_ascii_lowercase().as_str() {
        "openai" => {
            let key_var = spec.api_key_env.as_deref().unwrap_or(openai::API_KEY_ENV);
            // A missing key surfaces as ModelUnavailable on first call, not at startup.
            let api_key = std::env::var(key_var).unwrap_or_default();
            let mut client = openai::OpenAIClient::new(
                spec.model.clone(),
                api_key,
                spec.temperature,
                spec.max_tokens,
            );
            if let Some(url) = &spec.base_url {
                client = client.with_base_url(url.clone());
            }
            Arc::new(client)
        }
        "ollama" => {
            let mut client =
                ollama::OllamaClient::new(spec.model.clone(), spec.temperature, spec.max_tokens);
            if let Some(url) = &spec.base_url {
                client = client.with_base_url(url.clone());
            }
            if let Some(num_ctx) = spec.num_ctx {
                client = client.with_num_ctx(num_ctx);
            }
            Arc::new(client)
        }
        "fake" => {
            let mut client = fake::FakeClient::new(spec.model.clone());
            if let Some(text) = &spec.response {
                client = client.with_response(text.clone());
            }
            Arc::new(client)
        }
        _ => {
            return Err(EvalError::unsupported_model_type(
                spec.name.clone(),
                spec.provider.clone(),
            ))
        }
    };

    tracing::info!(
        name = %spec.name,
        provider = client.provider_name(),
        model = %spec.model,
        "initialized model client"
    );

    Ok(match timeout {
        Some(limit) => Arc::new(deadline::DeadlineLlmClient::new(client, limit)),
        None => client,
    })
}
