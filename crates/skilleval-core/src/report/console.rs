use crate::report::summary::ScoreSummary;

pub const SUMMARY_HEADER: &str = "Skill level summary (average scores):";

#[must_use]
pub fn format_summary_lines(summary: &ScoreSummary) -> Vec<String> {
    let mut lines = vec![SUMMARY_HEADER.to_string()];
    for model in &summary.models {
        for skill in &model.skills {
            lines.push(format!("  {} - {}: {}", model.model, skill.skill, skill.level));
        }
    }
    lines
}

pub fn print_summary(summary: &ScoreSummary) {
    for line in format_summary_lines(summary) {
        println!("{}", line);
    }
}
