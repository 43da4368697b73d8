//! Box-plot data for the score distributions.
//!
//! One region per distinct skill (sorted), one box per model that has scores
//! for that skill. The score axis is fixed at `[0, 10]`; out-of-range grades
//! are kept in the statistics as-is.

use crate::errors::EvalError;
use crate::model::RawScoreTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCORE_AXIS: [f64; 2] = [0.0, 10.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub model: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRegion {
    pub title: String,
    pub skill: String,
    pub boxes: Vec<BoxStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillChart {
    pub y_axis: [f64; 2],
    pub regions: Vec<ChartRegion>,
}

/// Linear-interpolated quantile of sorted data.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn box_stats(model: &str, scores: &[u32]) -> Option<BoxStats> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = scores.iter().map(|&s| f64::from(s)).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(BoxStats {
        model: model.to_string(),
        count: sorted.len(),
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

impl SkillChart {
    pub fn from_scores(table: &RawScoreTable) -> Self {
        let regions = table
            .skills()
            .into_iter()
            .map(|skill| ChartRegion {
                title: format!("Skill: {}", skill),
                boxes: table
                    .models()
                    .iter()
                    .filter_map(|m| {
                        let scores = m.skill(&skill).map(|s| s.scores.as_slice())?;
                        box_stats(&m.model, scores)
                    })
                    .collect(),
                skill,
            })
            .collect();
        Self {
            y_axis: SCORE_AXIS,
            regions,
        }
    }
}

/// Write chart data to `path`, or print it to stdout when no path is given.
pub fn write_chart(chart: &SkillChart, path: Option<&Path>) -> Result<(), EvalError> {
    let body = serde_json::to_string_pretty(chart)?;
    match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(p, body)?;
        }
        None => println!("{}", body),
    }
    Ok(())
}
