use thiserror::Error;

/// Transport or provider failure from a model gateway.
///
/// Gateways surface this instead of an empty reply so callers can tell
/// "the model said nothing" apart from "the call never completed".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("model unavailable ({provider}/{model}): {detail}")]
pub struct ModelUnavailable {
    pub provider: String,
    pub model: String,
    pub detail: String,
}

impl ModelUnavailable {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    ModelUnavailable(#[from] ModelUnavailable),

    #[error("unsupported model type '{provider}' for model '{name}' (expected one of: openai, ollama, fake)")]
    UnsupportedModelType { name: String, provider: String },

    #[error("malformed test generation output for skill '{skill}': {detail}")]
    MalformedTestGeneration { skill: String, detail: String },

    #[error("config error{}: {detail}", .path.as_deref().map(|p| format!(" ({p})")).unwrap_or_default())]
    Config {
        path: Option<String>,
        detail: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EvalError {
    pub fn config(path: Option<&std::path::Path>, detail: impl Into<String>) -> Self {
        Self::Config {
            path: path.map(|p| p.display().to_string()),
            detail: detail.into(),
        }
    }

    pub fn unsupported_model_type(name: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::UnsupportedModelType {
            name: name.into(),
            provider: provider.into(),
        }
    }

    pub fn malformed_test_generation(skill: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedTestGeneration {
            skill: skill.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_unavailable_message_names_provider_and_model() {
        let err = ModelUnavailable::new("ollama", "llama2", "connection refused");
        assert_eq!(
            err.to_string(),
            "model unavailable (ollama/llama2): connection refused"
        );
    }

    #[test]
    fn config_error_includes_path_when_known() {
        let err = EvalError::config(Some(std::path::Path::new("eval.yaml")), "bad yaml");
        assert_eq!(err.to_string(), "config error (eval.yaml): bad yaml");

        let err = EvalError::config(None, "no local models");
        assert_eq!(err.to_string(), "config error: no local models");
    }

    #[test]
    fn unsupported_model_type_lists_known_providers() {
        let err = EvalError::unsupported_model_type("Mystery", "anthropic-local");
        let msg = err.to_string();
        assert!(msg.contains("'anthropic-local'"));
        assert!(msg.contains("openai, ollama, fake"));
    }
}
