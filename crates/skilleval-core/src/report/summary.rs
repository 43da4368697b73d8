//! Reduce the raw score table to one mean per (model, skill).

use crate::model::RawScoreTable;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Mean score for a skill, or an explicit marker when nothing was graded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillLevel {
    Mean(f64),
    NoData,
}

impl SkillLevel {
    pub fn mean(&self) -> Option<f64> {
        match self {
            SkillLevel::Mean(v) => Some(*v),
            SkillLevel::NoData => None,
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Mean(v) => write!(f, "{:.2}", v),
            SkillLevel::NoData => f.write_str("N/A"),
        }
    }
}

/// Serialized as a number, or `null` for no data.
impl Serialize for SkillLevel {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SkillLevel::Mean(v) => s.serialize_f64(*v),
            SkillLevel::NoData => s.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(d)?
            .map(SkillLevel::Mean)
            .unwrap_or(SkillLevel::NoData))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub skill: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub model: String,
    pub skills: Vec<SkillSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub models: Vec<ModelSummary>,
}

impl ScoreSummary {
    pub fn get(&self, model: &str, skill: &str) -> Option<SkillLevel> {
        self.models
            .iter()
            .find(|m| m.model == model)?
            .skills
            .iter()
            .find(|s| s.skill == skill)
            .map(|s| s.level)
    }
}

/// Every (model, skill) key of the input appears in the output, in the same
/// order. Total over any table.
pub fn summarize(table: &RawScoreTable) -> ScoreSummary {
    let models = table
        .models()
        .iter()
        .map(|m| ModelSummary {
            model: m.model.clone(),
            skills: m
                .skills
                .iter()
                .map(|s| SkillSummary {
                    skill: s.skill.clone(),
                    level: mean(&s.scores),
                })
                .collect(),
        })
        .collect();
    ScoreSummary { models }
}

fn mean(scores: &[u32]) -> SkillLevel {
    if scores.is_empty() {
        return SkillLevel::NoData;
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    SkillLevel::Mean(sum as f64 / scores.len() as f64)
}
