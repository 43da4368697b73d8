use crate::engine::RunArtifacts;
use crate::report::summary::ScoreSummary;
use std::path::Path;

pub fn write_json(
    artifacts: &RunArtifacts,
    summary: &ScoreSummary,
    out: &Path,
) -> anyhow::Result<()> {
    let v = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "candidate_calls": artifacts.candidate_calls,
        "grading_calls": artifacts.grading_calls,
        "scores": artifacts.scores,
        "summary": summary,
        "results": artifacts.records,
    });
    if let Some(parent) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, serde_json::to_string_pretty(&v)?)?;
    Ok(())
}
