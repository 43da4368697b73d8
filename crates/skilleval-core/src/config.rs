use crate::errors::EvalError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "SKILLEVAL_CONFIG";

/// One model endpoint (remote judge or local candidate).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ModelSpec {
    /// Display name used as the score table key.
    pub name: String,
    /// "openai", "ollama" or "fake".
    pub provider: String,
    /// Provider-side model identifier.
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Override for the provider endpoint.
    pub base_url: Option<String>,
    /// Variable holding the API key (openai only).
    pub api_key_env: Option<String>,
    /// Context window (ollama only).
    pub num_ctx: Option<u32>,
    /// Fixed reply (fake only).
    pub response: Option<String>,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            provider: "openai".to_string(),
            model: String::new(),
            temperature: 0.0,
            max_tokens: 1024,
            base_url: None,
            api_key_env: None,
            num_ctx: None,
            response: None,
        }
    }
}

impl ModelSpec {
    pub fn new(name: &str, provider: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            name: name.to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
            max_tokens,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EvalConfig {
    /// Judge and (optionally) test generator.
    pub remote: ModelSpec,
    /// Models under evaluation, evaluated in this order.
    pub local_models: Vec<ModelSpec>,
    /// Skill labels used for dynamic test generation.
    pub skills: Vec<String>,
    pub tests_per_skill: u32,
    /// Generate tests with the remote model instead of using the built-in set.
    pub dynamic_tests: bool,
    /// Where the chart data is written. `None` prints it instead.
    pub chart_path: Option<PathBuf>,
    /// Deadline applied to every model call.
    pub request_timeout_secs: Option<u64>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            remote: ModelSpec::new("GPT-4 Supervisor", "openai", "gpt-4", 2048),
            local_models: vec![
                ModelSpec::new("GPT-3.5 Turbo", "openai", "gpt-3.5-turbo", 1024),
                ModelSpec::new("Llama2 7B", "ollama", "llama2", 1024),
            ],
            skills: vec![
                "summarization".to_string(),
                "extraction".to_string(),
                "reasoning".to_string(),
            ],
            tests_per_skill: 2,
            dynamic_tests: false,
            chart_path: Some(PathBuf::from("skill_levels.json")),
            request_timeout_secs: None,
        }
    }
}

impl EvalConfig {
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EvalError::config(Some(path), format!("cannot read config: {}", e)))?;
        Self::from_yaml(&raw).map_err(|e| match e {
            EvalError::Config { detail, .. } => EvalError::config(Some(path), detail),
            other => other,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, EvalError> {
        let cfg: EvalConfig = serde_yaml::from_str(raw)
            .map_err(|e| EvalError::config(None, format!("invalid YAML: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `SKILLEVAL_CONFIG` if set, otherwise fall back to defaults.
    pub fn from_env() -> Result<Self, EvalError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        if self.local_models.is_empty() {
            return Err(EvalError::config(None, "at least one local model is required"));
        }
        let mut seen = std::collections::HashSet::new();
        for spec in std::iter::once(&self.remote).chain(self.local_models.iter()) {
            if spec.name.trim().is_empty() {
                return Err(EvalError::config(None, "every model needs a non-empty name"));
            }
        }
        for spec in &self.local_models {
            if !seen.insert(spec.name.as_str()) {
                return Err(EvalError::config(
                    None,
                    format!("duplicate local model name '{}'", spec.name),
                ));
            }
        }
        if self.dynamic_tests {
            if self.skills.is_empty() {
                return Err(EvalError::config(None, "dynamic tests need at least one skill"));
            }
            if self.tests_per_skill == 0 {
                return Err(EvalError::config(None, "tests_per_skill must be at least 1"));
            }
        }
        Ok(())
    }

    /// Path of the machine-readable run report, next to the chart output.
    pub fn report_path(&self) -> PathBuf {
        match &self.chart_path {
            Some(p) => {
                let stem = p
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "skill_levels".to_string());
                p.with_file_name(format!("{}.report.json", stem))
            }
            None => PathBuf::from("skill_levels.report.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_mirror_builtin_run() {
        let cfg = EvalConfig::default();
        assert_eq!(cfg.remote.model, "gpt-4");
        assert_eq!(cfg.remote.max_tokens, 2048);
        assert_eq!(cfg.local_models.len(), 2);
        assert_eq!(cfg.local_models[1].provider, "ollama");
        assert_eq!(cfg.tests_per_skill, 2);
        assert!(!cfg.dynamic_tests);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = EvalConfig::from_yaml(
            r#"
dynamic_tests: true
local_models:
  - name: Tiny
    provider: ollama
    model: tinyllama
    num_ctx: 4096
"#,
        )
        .unwrap();
        assert!(cfg.dynamic_tests);
        assert_eq!(cfg.local_models.len(), 1);
        assert_eq!(cfg.local_models[0].num_ctx, Some(4096));
        assert_eq!(cfg.local_models[0].max_tokens, 1024);
        assert_eq!(cfg.remote.name, "GPT-4 Supervisor");
        assert_eq!(cfg.skills.len(), 3);
    }

    #[test]
    fn empty_local_models_rejected() {
        let err = EvalConfig::from_yaml("local_models: []").unwrap_err();
        assert!(err.to_string().contains("at least one local model"));
    }

    #[test]
    fn duplicate_local_names_rejected() {
        let err = EvalConfig::from_yaml(
            r#"
local_models:
  - { name: A, provider: fake, model: x }
  - { name: A, provider: fake, model: y }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate local model name 'A'"));
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.yaml");
        std::fs::write(&path, "local_models: {not: [a list").unwrap();
        let err = EvalConfig::load(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("eval.yaml"), "{msg}");
        assert!(msg.contains("invalid YAML"), "{msg}");
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = EvalConfig::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, EvalError::Config { .. }));
    }

    #[test]
    #[serial]
    fn from_env_uses_defaults_when_unset() {
        std::env::remove_var(CONFIG_ENV);
        assert_eq!(EvalConfig::from_env().unwrap(), EvalConfig::default());
    }

    #[test]
    #[serial]
    fn from_env_reads_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.yaml");
        std::fs::write(&path, "tests_per_skill: 5\n").unwrap();
        std::env::set_var(CONFIG_ENV, &path);
        let cfg = EvalConfig::from_env();
        std::env::remove_var(CONFIG_ENV);
        assert_eq!(cfg.unwrap().tests_per_skill, 5);
    }

    #[test]
    fn report_path_sits_next_to_chart() {
        let mut cfg = EvalConfig::default();
        cfg.chart_path = Some(PathBuf::from("out/levels.json"));
        assert_eq!(cfg.report_path(), PathBuf::from("out/levels.report.json"));
        cfg.chart_path = None;
        assert_eq!(cfg.report_path(), PathBuf::from("skill_levels.report.json"));
    }
}
