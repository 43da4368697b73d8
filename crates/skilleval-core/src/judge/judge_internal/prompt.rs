use crate::model::SkillTest;

pub const SYSTEM_GRADE_ANSWER_PROMPT: &str = "You are a strict grader. You will receive a question, context, expected answer, and an answer to evaluate.

You will receive inputs in the following format:

Question: [question]
Context: [context]
Expected answer: [expected answer]
Answer to evaluate: [answer to evaluate]

Your job is to evaluate the answer based on the question, context, and expected answer.
Note that the answer does not need to be exactly the same as the expected answer, but the answer should be correct.

You will then grade the answer on a scale of 1 to 10 (10 = completely correct and well-written, 1 = incorrect or irrelevant).
Please just output the numeric score!";

/// Render one grading turn. Absent context or expected answer renders as an
/// empty field; the line itself is always present.
pub fn build_grading_turn(test: &SkillTest, candidate_answer: &str) -> String {
    format!(
        "Question: {}\nContext: {}\nExpected answer: {}\nAnswer to evaluate: {}",
        test.question,
        test.context,
        test.expected.as_deref().unwrap_or(""),
        candidate_answer
    )
}
