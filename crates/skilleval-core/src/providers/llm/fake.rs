use super::LlmClient;
use crate::errors::ModelUnavailable;
use crate::model::{ChatMessage, GenerationResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Offline client for dry runs and tests.
///
/// Replies come from the script first (in order), then from the fixed
/// response. Every conversation it receives is recorded.
#[derive(Debug, Clone)]
pub struct FakeClient {
    model: String,
    fixed_response: Option<String>,
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FakeClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fixed_response: None,
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Queue one successful reply.
    pub fn push_reply(&self, text: impl Into<String>) -> &Self {
        lock(&self.script).push_back(Ok(text.into()));
        self
    }

    /// Queue one failing call.
    pub fn push_failure(&self, detail: impl Into<String>) -> &Self {
        lock(&self.script).push_back(Err(detail.into()));
        self
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<GenerationResult, ModelUnavailable> {
        super::ensure_messages(self, messages)?;
        lock(&self.calls).push(messages.to_vec());

        let scripted = lock(&self.script).pop_front();
        match scripted {
            Some(Ok(text)) => Ok(GenerationResult::text(text)),
            Some(Err(detail)) => Err(ModelUnavailable::new("fake", self.model.clone(), detail)),
            None => Ok(GenerationResult::text(
                self.fixed_response.clone().unwrap_or_default(),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
