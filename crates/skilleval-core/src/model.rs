use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// One skill test case. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTest {
    /// Category label, e.g. "summarization".
    pub skill: String,
    /// Supporting text; empty when the question stands alone.
    #[serde(default)]
    pub context: String,
    pub question: String,
    /// Reference answer, if one is known.
    #[serde(default)]
    pub expected: Option<String>,
}

impl SkillTest {
    pub fn new(
        skill: impl Into<String>,
        context: impl Into<String>,
        question: impl Into<String>,
        expected: Option<String>,
    ) -> Self {
        Self {
            skill: skill.into(),
            context: context.into(),
            question: question.into(),
            expected,
        }
    }

    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl Usage {
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

impl Add for Usage {
    type Output = Usage;

    fn add(self, rhs: Usage) -> Usage {
        Usage {
            prompt_tokens: self.prompt_tokens + rhs.prompt_tokens,
            completion_tokens: self.completion_tokens + rhs.completion_tokens,
        }
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, rhs: Usage) {
        *self = *self + rhs;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Other(String),
}

impl StopReason {
    /// Map a provider's `finish_reason` / `done_reason` onto the shared enum.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stop" | "end_turn" => StopReason::Stop,
            "length" | "max_tokens" => StopReason::Length,
            "tool_calls" | "function_call" => StopReason::ToolCalls,
            "content_filter" => StopReason::ContentFilter,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// Reply from a model gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub candidates: Vec<String>,
    pub usage: Option<Usage>,
    pub stop_reasons: Vec<StopReason>,
}

impl GenerationResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![text.into()],
            usage: None,
            stop_reasons: vec![StopReason::Stop],
        }
    }

    /// First candidate, or "" when the provider returned none.
    pub fn first_text(&self) -> &str {
        self.candidates.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillScores {
    pub skill: String,
    pub scores: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelScores {
    pub model: String,
    pub skills: Vec<SkillScores>,
}

impl ModelScores {
    pub fn skill(&self, skill: &str) -> Option<&SkillScores> {
        self.skills.iter().find(|s| s.skill == skill)
    }
}

/// Per-model, per-skill integer grades in evaluation order.
///
/// Models keep insertion order, and skills keep first-seen order within a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScoreTable {
    models: Vec<ModelScores>,
}

impl RawScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_model(&mut self, model: &str) -> &mut ModelScores {
        let idx = match self.models.iter().position(|m| m.model == model) {
            Some(idx) => idx,
            None => {
                self.models.push(ModelScores {
                    model: model.to_string(),
                    skills: Vec::new(),
                });
                self.models.len() - 1
            }
        };
        &mut self.models[idx]
    }

    pub fn ensure_skill(&mut self, model: &str, skill: &str) -> &mut Vec<u32> {
        let entry = self.ensure_model(model);
        let idx = match entry.skills.iter().position(|s| s.skill == skill) {
            Some(idx) => idx,
            None => {
                entry.skills.push(SkillScores {
                    skill: skill.to_string(),
                    scores: Vec::new(),
                });
                entry.skills.len() - 1
            }
        };
        &mut entry.skills[idx].scores
    }

    pub fn record(&mut self, model: &str, skill: &str, score: u32) {
        self.ensure_skill(model, skill).push(score);
    }

    pub fn scores(&self, model: &str, skill: &str) -> Option<&[u32]> {
        self.model(model)
            .and_then(|m| m.skill(skill))
            .map(|s| s.scores.as_slice())
    }

    pub fn model(&self, model: &str) -> Option<&ModelScores> {
        self.models.iter().find(|m| m.model == model)
    }

    pub fn models(&self) -> &[ModelScores] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Distinct skill labels across every model, sorted.
    pub fn skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = self
            .models
            .iter()
            .flat_map(|m| m.skills.iter().map(|s| s.skill.clone()))
            .collect();
        skills.sort();
        skills.dedup();
        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let msg = ChatMessage::system("be strict");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v, serde_json::json!({"role": "system", "content": "be strict"}));
    }

    #[test]
    fn first_text_is_empty_without_candidates() {
        let res = GenerationResult::default();
        assert_eq!(res.first_text(), "");
        assert_eq!(GenerationResult::text("8").first_text(), "8");
    }

    #[test]
    fn usage_accumulates() {
        let mut total = Usage::default();
        total += Usage {
            prompt_tokens: 10,
            completion_tokens: 2,
        };
        total += Usage {
            prompt_tokens: 5,
            completion_tokens: 1,
        };
        assert_eq!(total.prompt_tokens, 15);
        assert_eq!(total.completion_tokens, 3);
        assert_eq!(total.total(), 18);
    }

    #[test]
    fn stop_reason_maps_provider_spellings() {
        assert_eq!(StopReason::parse("stop"), StopReason::Stop);
        assert_eq!(StopReason::parse("LENGTH"), StopReason::Length);
        assert_eq!(
            StopReason::parse("load"),
            StopReason::Other("load".to_string())
        );
    }

    #[test]
    fn score_table_keeps_insertion_order() {
        let mut table = RawScoreTable::new();
        table.ensure_model("b");
        table.record("a", "reasoning", 7);
        table.record("a", "extraction", 3);
        table.record("a", "reasoning", 9);

        let names: Vec<&str> = table.models().iter().map(|m| m.model.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        let skills: Vec<&str> = table.model("a").unwrap().skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(skills, vec!["reasoning", "extraction"]);
        assert_eq!(table.scores("a", "reasoning"), Some(&[7, 9][..]));
        assert_eq!(table.scores("b", "reasoning"), None);
        assert_eq!(table.skills(), vec!["extraction", "reasoning"]);
    }

    #[test]
    fn ensure_skill_creates_empty_entry() {
        let mut table = RawScoreTable::new();
        table.ensure_skill("m", "summarization");
        assert_eq!(table.scores("m", "summarization"), Some(&[][..]));
    }
}
