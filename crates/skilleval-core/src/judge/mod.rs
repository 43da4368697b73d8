mod judge_internal;

pub use judge_internal::parse::{parse_grade, GradeSource, ParsedGrade, DEFAULT_SCORE};
pub use judge_internal::prompt::{build_grading_turn, SYSTEM_GRADE_ANSWER_PROMPT};

use crate::errors::ModelUnavailable;
use crate::model::{ChatMessage, SkillTest};
use crate::providers::llm::LlmClient;
use std::sync::Arc;

/// Accumulating grading history for one local model.
///
/// Seeded with the grading instructions, then one user turn per graded test.
/// Append-only; the grader's replies are never stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingConversation {
    messages: Vec<ChatMessage>,
}

impl GradingConversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::system(SYSTEM_GRADE_ANSWER_PROMPT)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn push_user(&mut self, content: String) {
        self.messages.push(ChatMessage::user(content));
    }
}

impl Default for GradingConversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Grades candidate answers with the remote model.
#[derive(Clone)]
pub struct Grader {
    client: Arc<dyn LlmClient>,
}

impl Grader {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Append the grading turn for `test` to `conversation`, ask the remote
    /// model with the whole history, and parse its reply into a score.
    ///
    /// Gateway failures propagate: a missing grade cannot be defaulted.
    pub async fn grade(
        &self,
        conversation: &mut GradingConversation,
        test: &SkillTest,
        candidate_answer: &str,
    ) -> Result<ParsedGrade, ModelUnavailable> {
        judge_internal::run::grade_impl(self.client.as_ref(), conversation, test, candidate_answer)
            .await
    }
}
