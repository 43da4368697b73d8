use crate::model::{ChatMessage, SkillTest};
use crate::providers::llm::LlmClient;
use crate::skills::prompts::{local_skill_prompt, SYSTEM_TEST_LOCAL_MODEL_SKILL};
use std::sync::Arc;

/// A model under evaluation.
#[derive(Clone)]
pub struct LocalModel {
    pub name: String,
    pub client: Arc<dyn LlmClient>,
}

impl std::fmt::Debug for LocalModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalModel")
            .field("name", &self.name)
            .field("provider", &self.client.provider_name())
            .field("model", &self.client.model_name())
            .finish()
    }
}

impl LocalModel {
    pub fn new(name: impl Into<String>, client: Arc<dyn LlmClient>) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }

    pub fn candidate_messages(test: &SkillTest) -> [ChatMessage; 2] {
        [
            ChatMessage::system(SYSTEM_TEST_LOCAL_MODEL_SKILL),
            ChatMessage::user(local_skill_prompt(test)),
        ]
    }

    /// Produce a candidate answer for `test`, without any history.
    ///
    /// A gateway failure or an empty reply yields "" (logged); it never
    /// aborts the run.
    pub async fn answer(&self, test: &SkillTest) -> String {
        let messages = Self::candidate_messages(test);
        match self.client.generate(&messages).await {
            Ok(reply) => {
                if reply.candidates.is_empty() {
                    tracing::warn!(model = %self.name, skill = %test.skill, "local model returned no candidates");
                }
                reply.first_text().trim().to_string()
            }
            Err(e) => {
                tracing::warn!(model = %self.name, skill = %test.skill, error = %e, "local model call failed, using empty answer");
                String::new()
            }
        }
    }
}
