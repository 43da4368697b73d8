use super::LlmClient;
use crate::errors::ModelUnavailable;
use crate::model::{ChatMessage, GenerationResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Puts an upper bound on every call of the wrapped client.
///
/// An elapsed deadline is reported as `ModelUnavailable`, so callers handle
/// it exactly like a transport failure.
pub struct DeadlineLlmClient {
    inner: Arc<dyn LlmClient>,
    limit: Duration,
}

impl DeadlineLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl LlmClient for DeadlineLlmClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, ModelUnavailable> {
        match tokio::time::timeout(self.limit, self.inner.generate(messages)).await {
            Ok(res) => res,
            Err(_) => Err(ModelUnavailable::new(
                self.inner.provider_name(),
                self.inner.model_name(),
                format!("deadline of {:?} exceeded", self.limit),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::fake::FakeClient;

    struct HangingClient;

    #[async_trait]
    impl LlmClient for HangingClient {
        async fn generate(
            &self,
            _messages: &[ChatMessage],
        ) -> Result<GenerationResult, ModelUnavailable> {
            std::future::pending::<Result<GenerationResult, ModelUnavailable>>().await
        }

        fn provider_name(&self) -> &'static str {
            "hang"
        }

        fn model_name(&self) -> &str {
            "forever"
        }
    }

    #[tokio::test]
    async fn elapsed_deadline_is_unavailable() {
        let client = DeadlineLlmClient::new(Arc::new(HangingClient), Duration::from_millis(20));
        let err = client
            .generate(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert_eq!(err.provider, "hang");
        assert!(err.detail.contains("deadline"));
    }

    #[tokio::test]
    async fn fast_reply_passes_through() {
        let inner = FakeClient::new("f").with_response("6");
        let client = DeadlineLlmClient::new(Arc::new(inner), Duration::from_secs(5));
        let res = client.generate(&[ChatMessage::user("hi")]).await.unwrap();
        assert_eq!(res.first_text(), "6");
        assert_eq!(client.model_name(), "f");
    }
}
