use super::prompts::generate_skill_tests_prompt;
use crate::errors::EvalError;
use crate::model::{ChatMessage, SkillTest};
use crate::providers::llm::LlmClient;
use serde_json::Value;

/// Ask the remote model for `tests_per_skill` tests per skill label.
///
/// One request per skill. A skill whose request fails, or whose reply is not
/// a JSON list after cleanup, is skipped with a warning; generation itself
/// never fails.
pub async fn generate_skill_tests(
    remote: &dyn LlmClient,
    skills: &[String],
    tests_per_skill: u32,
) -> Vec<SkillTest> {
    let mut generated = Vec::new();
    for skill in skills {
        let messages = [ChatMessage::user(generate_skill_tests_prompt(
            skill,
            tests_per_skill,
        ))];
        let reply = match remote.generate(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(skill = %skill, error = %e, "test generation request failed, skipping skill");
                continue;
            }
        };
        match parse_generated_tests(skill, reply.first_text()) {
            Ok(tests) => {
                tracing::info!(skill = %skill, count = tests.len(), "generated skill tests");
                generated.extend(tests);
            }
            Err(e) => {
                tracing::warn!(skill = %skill, error = %e, "failed to parse generated tasks, skipping skill");
            }
        }
    }
    generated
}

/// Stage 2 cleanup: drop surrounding code fences and a `json` language tag.
pub(crate) fn strip_fences(text: &str) -> &str {
    let inner = text.trim().trim_matches('`').trim();
    match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => inner[4..].trim(),
        _ => inner,
    }
}

/// Strict parse first, then one cleanup attempt.
pub(crate) fn parse_json_reply(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text).or_else(|_| serde_json::from_str(strip_fences(text)))
}

fn answer_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Turn a generator reply into skill tests.
///
/// The reply must be a JSON list. Entries that are not objects, or that have
/// no non-empty `question`, are dropped individually.
pub fn parse_generated_tests(skill: &str, text: &str) -> Result<Vec<SkillTest>, EvalError> {
    let value = parse_json_reply(text)
        .map_err(|e| EvalError::malformed_test_generation(skill, format!("invalid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(EvalError::malformed_test_generation(
            skill,
            "expected a JSON list of tasks",
        ));
    };

    Ok(items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let question = obj.get("question").and_then(Value::as_str).unwrap_or("");
            if question.is_empty() {
                return None;
            }
            let context = obj.get("context").and_then(Value::as_str).unwrap_or("");
            Some(SkillTest::new(
                skill,
                context,
                question,
                answer_text(obj.get("answer")),
            ))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::fake::FakeClient;

    const TWO_TASKS: &str = r#"[
        {"context": "Bob was born in 1985.", "question": "When was Bob born?", "answer": "1985"},
        {"question": "What is 3*4?", "answer": 12}
    ]"#;

    #[test]
    fn strict_json_list_parses() {
        let tests = parse_generated_tests("extraction", TWO_TASKS).unwrap();
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].skill, "extraction");
        assert_eq!(tests[0].context, "Bob was born in 1985.");
        assert_eq!(tests[1].context, "");
        assert_eq!(tests[1].expected.as_deref(), Some("12"));
    }

    #[test]
    fn fenced_reply_parses_after_cleanup() {
        let fenced = format!("```json\n{}\n```", TWO_TASKS);
        assert_eq!(parse_generated_tests("extraction", &fenced).unwrap().len(), 2);

        let bare_fence = format!("```{}```", TWO_TASKS);
        assert_eq!(parse_generated_tests("extraction", &bare_fence).unwrap().len(), 2);
    }

    #[test]
    fn prose_reply_is_malformed() {
        let err = parse_generated_tests("reasoning", "Sure! Here are some tasks: ...").unwrap_err();
        assert!(matches!(err, EvalError::MalformedTestGeneration { ref skill, .. } if skill == "reasoning"));
    }

    #[test]
    fn non_list_json_is_malformed() {
        let err = parse_generated_tests("reasoning", r#"{"question": "q"}"#).unwrap_err();
        assert!(err.to_string().contains("expected a JSON list"));
    }

    #[test]
    fn bad_entries_are_dropped_individually() {
        let text = r#"[
            "not an object",
            {"context": "c", "answer": "a"},
            {"question": "", "answer": "a"},
            {"question": "kept", "answer": null}
        ]"#;
        let tests = parse_generated_tests("summarization", text).unwrap();
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].question, "kept");
        assert_eq!(tests[0].expected, None);
    }

    #[tokio::test]
    async fn failing_skills_are_skipped() {
        let remote = FakeClient::new("gen");
        remote
            .push_reply(TWO_TASKS)
            .push_reply("I cannot do that")
            .push_failure("timeout");
        let skills = vec![
            "extraction".to_string(),
            "summarization".to_string(),
            "reasoning".to_string(),
        ];

        let tests = generate_skill_tests(&remote, &skills, 2).await;

        assert_eq!(tests.len(), 2);
        assert!(tests.iter().all(|t| t.skill == "extraction"));
        let calls = remote.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].len(), 1);
        assert!(calls[1][0].content.contains("summarization"));
    }
}
