use super::parse::{parse_grade, GradeSource, ParsedGrade};
use super::prompt::build_grading_turn;
use crate::errors::ModelUnavailable;
use crate::judge::GradingConversation;
use crate::model::SkillTest;
use crate::providers::llm::LlmClient;

pub(crate) async fn grade_impl(
    client: &dyn LlmClient,
    conversation: &mut GradingConversation,
    test: &SkillTest,
    candidate_answer: &str,
) -> Result<ParsedGrade, ModelUnavailable> {
    conversation.push_user(build_grading_turn(test, candidate_answer));

    let reply = client.generate(conversation.messages()).await?;
    let text = reply.first_text();
    let grade = parse_grade(text);

    match grade.source {
        GradeSource::Standalone => {}
        GradeSource::DigitFallback => tracing::debug!(
            skill = %test.skill,
            score = grade.score,
            reply = %text,
            "grade taken from digit fallback"
        ),
        GradeSource::Default => tracing::warn!(
            skill = %test.skill,
            reply = %text,
            "malformed grade text, defaulting score to {}",
            grade.score
        ),
    }

    Ok(grade)
}
