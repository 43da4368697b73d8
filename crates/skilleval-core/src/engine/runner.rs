use crate::config::EvalConfig;
use crate::engine::local::LocalModel;
use crate::errors::{EvalError, ModelUnavailable};
use crate::judge::{GradeSource, Grader, GradingConversation};
use crate::model::{RawScoreTable, SkillTest};
use crate::providers::llm::{build_client, LlmClient};
use crate::skills::{generate_skill_tests, static_tests};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// One graded (model, test) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub model: String,
    pub skill: String,
    pub question: String,
    pub answer: String,
    pub score: u32,
    pub source: GradeSource,
}

#[derive(Debug, Clone)]
pub struct ModelTranscript {
    pub model: String,
    pub conversation: GradingConversation,
}

#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub scores: RawScoreTable,
    pub records: Vec<GradeRecord>,
    /// Final grading conversation per model, in evaluation order.
    pub transcripts: Vec<ModelTranscript>,
    pub candidate_calls: usize,
    pub grading_calls: usize,
}

impl RunArtifacts {
    pub fn transcript(&self, model: &str) -> Option<&GradingConversation> {
        self.transcripts
            .iter()
            .find(|t| t.model == model)
            .map(|t| &t.conversation)
    }
}

/// Drives every (local model × skill test) pair through candidate
/// generation and grading.
pub struct Runner {
    pub remote: Arc<dyn LlmClient>,
    pub grader: Grader,
    pub local_models: Vec<LocalModel>,
}

impl Runner {
    pub fn new(remote: Arc<dyn LlmClient>, local_models: Vec<LocalModel>) -> Self {
        Self {
            grader: Grader::new(remote.clone()),
            remote,
            local_models,
        }
    }

    /// Build every client up front; an unknown provider fails here, before any
    /// model is called.
    pub fn from_config(cfg: &EvalConfig) -> Result<Self, EvalError> {
        cfg.validate()?;
        let timeout = cfg.request_timeout_secs.map(Duration::from_secs);
        let remote = build_client(&cfg.remote, timeout)?;
        let local_models = cfg
            .local_models
            .iter()
            .map(|spec| build_client(spec, timeout).map(|c| LocalModel::new(spec.name.clone(), c)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(remote, local_models))
    }

    /// Built-in tests, or tests generated by the remote model when
    /// `dynamic_tests` is set.
    pub async fn load_tests(&self, cfg: &EvalConfig) -> Vec<SkillTest> {
        if cfg.dynamic_tests {
            let tests =
                generate_skill_tests(self.remote.as_ref(), &cfg.skills, cfg.tests_per_skill).await;
            tracing::info!(
                "Generated {} dynamic skill tests using the remote model.",
                tests.len()
            );
            tests
        } else {
            let tests = static_tests();
            tracing::info!("Loaded {} static skill tests.", tests.len());
            tests
        }
    }

    /// Evaluate models in the order given, tests in registry order.
    ///
    /// Strictly sequential: each model's grading conversation accumulates in
    /// test order. A candidate failure yields an empty answer; a grading
    /// failure ends the run.
    pub async fn run(&self, tests: &[SkillTest]) -> Result<RunArtifacts, ModelUnavailable> {
        let mut scores = RawScoreTable::new();
        let mut records = Vec::with_capacity(self.local_models.len() * tests.len());
        let mut transcripts = Vec::with_capacity(self.local_models.len());
        let mut candidate_calls = 0;
        let mut grading_calls = 0;

        for model in &self.local_models {
            scores.ensure_model(&model.name);
            let mut conversation = GradingConversation::new();

            for test in tests {
                scores.ensure_skill(&model.name, &test.skill);

                let answer = model.answer(test).await;
                candidate_calls += 1;
                tracing::info!(
                    "{} -> Task: {} | Question: {} | Answer: {}",
                    model.name,
                    test.skill,
                    test.question,
                    answer
                );

                grading_calls += 1;
                let grade = self.grader.grade(&mut conversation, test, &answer).await?;
                scores.record(&model.name, &test.skill, grade.score);
                tracing::info!(
                    "Graded score for {} on {}: {}/10",
                    model.name,
                    test.skill,
                    grade.score
                );

                records.push(GradeRecord {
                    model: model.name.clone(),
                    skill: test.skill.clone(),
                    question: test.question.clone(),
                    answer,
                    score: grade.score,
                    source: grade.source,
                });
            }

            transcripts.push(ModelTranscript {
                model: model.name.clone(),
                conversation,
            });
        }

        Ok(RunArtifacts {
            scores,
            records,
            transcripts,
            candidate_calls,
            grading_calls,
        })
    }
}
