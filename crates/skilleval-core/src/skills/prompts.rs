//! Prompt text sent to local models and to the remote test generator.

use crate::model::SkillTest;

pub const SYSTEM_TEST_LOCAL_MODEL_SKILL: &str = "You are a helpful AI assistant. Your task is to answer questions and solve problems to the best of your ability.

When given a context and question, first carefully read and understand the context. Then provide a clear, accurate, and well-reasoned answer to the question.

Some guidelines:
- If context is provided, use it to inform your answer
- Answer directly and concisely
- Stay focused on the specific question asked
- Format your response in a clear, readable way

The question will be provided in the format:
Q: [question]
Context: [context]
A:

Note that the context field may not be provided, in which case you should answer the question based on your knowledge.

Provide your answer after the \"A:\". Keep your response focused and relevant to the question.";

pub fn local_skill_prompt(test: &SkillTest) -> String {
    if test.has_context() {
        format!("Q: {}\nContext: {}\nA:", test.question, test.context)
    } else {
        format!("Q: {}\nA:", test.question)
    }
}

pub fn generate_skill_tests_prompt(skill: &str, tests_per_skill: u32) -> String {
    format!(
        "Create {tests_per_skill} distinct tasks to test a model's {skill} ability.\n\
         For each task, provide a context (if needed), a question/instruction, and the correct answer.\n\
         Respond in JSON format as a list of objects with keys 'context', 'question', 'answer'."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_template_only_when_context_present() {
        let with = SkillTest::new("extraction", "Alice was born in 1990.", "Birth year?", None);
        assert_eq!(
            local_skill_prompt(&with),
            "Q: Birth year?\nContext: Alice was born in 1990.\nA:"
        );

        let without = SkillTest::new("reasoning", "", "What is 5*3?", None);
        assert_eq!(local_skill_prompt(&without), "Q: What is 5*3?\nA:");
    }

    #[test]
    fn generation_prompt_names_skill_and_count() {
        let p = generate_skill_tests_prompt("extraction", 3);
        assert!(p.starts_with("Create 3 distinct tasks to test a model's extraction ability."));
        assert!(p.contains("'context', 'question', 'answer'"));
    }
}
