use crate::model::SkillTest;

/// Built-in tests: two each for summarization, extraction and reasoning.
pub fn static_tests() -> Vec<SkillTest> {
    vec![
        SkillTest::new(
            "summarization",
            "Climate change refers to long-term shifts in temperatures and weather patterns. \
             These shifts may be natural, but since the 1800s, human activities have been the main driver, \
             primarily due to burning fossil fuels like coal, oil and gas.",
            "Summarize the above paragraph in one sentence.",
            Some(
                "Human-induced climate change is causing long-term shifts in temperatures and weather patterns."
                    .to_string(),
            ),
        ),
        SkillTest::new(
            "summarization",
            "Artificial intelligence, or AI, is a field of computer science that focuses on creating systems \
             capable of performing tasks that typically require human intelligence. \
             This includes learning from data, recognizing patterns, and making decisions.",
            "Provide a one-sentence summary of the above text.",
            Some(
                "Artificial intelligence is a field of computer science that creates systems able to perform tasks requiring human-like intelligence."
                    .to_string(),
            ),
        ),
        SkillTest::new(
            "extraction",
            "Alice was born in 1990 and Bob was born in 1985. They both live in New York City.",
            "What year was Alice born?",
            Some("1990".to_string()),
        ),
        SkillTest::new(
            "extraction",
            "The museum is open from 9 AM to 5 PM, and the entry fee is $15 for adults and $10 for children.",
            "How much is the entry fee for children?",
            Some("$10".to_string()),
        ),
        SkillTest::new(
            "reasoning",
            "",
            "John is twice as old as Mary. Together, their ages sum to 36. How old is John?",
            Some("24".to_string()),
        ),
        SkillTest::new(
            "reasoning",
            "",
            "If a rectangle has length 5 and width 3, what is its area?",
            Some("15".to_string()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_tests_per_builtin_skill_in_order() {
        let tests = static_tests();
        let skills: Vec<&str> = tests.iter().map(|t| t.skill.as_str()).collect();
        assert_eq!(
            skills,
            vec![
                "summarization",
                "summarization",
                "extraction",
                "extraction",
                "reasoning",
                "reasoning"
            ]
        );
    }

    #[test]
    fn every_builtin_test_has_question_and_answer() {
        for t in static_tests() {
            assert!(!t.question.is_empty());
            assert!(t.expected.as_deref().is_some_and(|e| !e.is_empty()));
        }
        assert!(static_tests().iter().filter(|t| !t.has_context()).count() == 2);
    }
}
