use super::args::Cli;
use crate::exit_codes::SUCCESS;
use skilleval_core::config::EvalConfig;
use skilleval_core::engine::Runner;
use skilleval_core::report::{chart, console, json, summarize};

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let mut cfg = EvalConfig::from_env()?;
    if cli.dynamic {
        cfg.dynamic_tests = true;
    }
    run(&cfg).await
}

async fn run(cfg: &EvalConfig) -> anyhow::Result<i32> {
    let runner = Runner::from_config(cfg)?;
    let tests = runner.load_tests(cfg).await;
    if tests.is_empty() {
        tracing::warn!("no skill tests available; summary will be empty");
    }

    let artifacts = runner.run(&tests).await?;
    let summary = summarize(&artifacts.scores);
    console::print_summary(&summary);

    let skill_chart = chart::SkillChart::from_scores(&artifacts.scores);
    let chart_path = cfg.chart_path.as_deref();
    match chart::write_chart(&skill_chart, chart_path) {
        Ok(()) => {
            if let Some(p) = chart_path {
                println!("Skill level chart data saved to {}", p.display());
            }
        }
        Err(e) => eprintln!("warning: failed to write chart data: {}", e),
    }

    let report_path = cfg.report_path();
    if let Err(e) = json::write_json(&artifacts, &summary, &report_path) {
        eprintln!("warning: failed to write run report: {}", e);
    }

    Ok(SUCCESS)
}
