//! @ai:module:intent Configuration structs for the ladder benchmark
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkConfig, ModelConfig, SamplingConfig, PromptConfig
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// @ai:intent Top-level configuration for the ladder benchmark
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub prompts: PromptConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub paths: PathConfig,
}

/// @ai:intent Model identity and endpoint configuration
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Sent as a bearer token when present.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Free-form parameter-count labels recorded in the result file.
    #[serde(default = "default_parameters_label")]
    pub total_parameters: String,
    #[serde(default = "default_parameters_label")]
    pub active_parameters: String,
}

/// @ai:intent Sampling parameters forwarded to the inference endpoint
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_min_p")]
    pub min_p: f64,
}

/// @ai:intent Prompts and answering mode
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Two-phase mode: a free-form reasoning call, then a finalize call.
    #[serde(default)]
    pub use_two_phase: bool,
    #[serde(default = "default_reasoning_system_prompt")]
    pub reasoning_system_prompt: String,
    #[serde(default = "default_answer_system_prompt")]
    pub answer_system_prompt: String,
    /// Extra field merged verbatim into every request body.
    #[serde(default)]
    pub custom_field: Option<CustomField>,
}

/// @ai:intent Arbitrary name/value pair injected into the request payload
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    pub value: serde_json::Value,
}

/// @ai:intent Per-phase HTTP timeouts in seconds
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_single_phase_secs")]
    pub single_phase_secs: u64,
    #[serde(default = "default_reasoning_phase_secs")]
    pub reasoning_phase_secs: u64,
}

/// @ai:intent Run-shape configuration
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of rounds in flight at once; 1 means sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// @ai:intent Path configuration for input/output files
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_question_file")]
    pub question_file: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            sampling: SamplingConfig::default(),
            prompts: PromptConfig::default(),
            timeouts: TimeoutConfig::default(),
            run: RunConfig::default(),
            paths: PathConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            server_url: default_server_url(),
            api_key: None,
            total_parameters: default_parameters_label(),
            active_parameters: default_parameters_label(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            min_p: default_min_p(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            use_two_phase: false,
            reasoning_system_prompt: default_reasoning_system_prompt(),
            answer_system_prompt: default_answer_system_prompt(),
            custom_field: None,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            single_phase_secs: default_single_phase_secs(),
            reasoning_phase_secs: default_reasoning_phase_secs(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            question_file: default_question_file(),
            results_dir: default_results_dir(),
        }
    }
}

fn default_model_name() -> String {
    "local-model".to_string()
}

fn default_server_url() -> String {
    "http://localhost:8080/v1/chat/completions".to_string()
}

fn default_parameters_label() -> String {
    "unknown".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f64 {
    0.95
}

fn default_min_p() -> f64 {
    0.05
}

fn default_system_prompt() -> String {
    "You are a contestant on a quiz show. For each multiple-choice question, \
     pick exactly one of the options A, B, C or D. Respond with JSON in the \
     form {\"answer\": \"A\"}."
        .to_string()
}

fn default_reasoning_system_prompt() -> String {
    "You are a contestant on a quiz show. Think through the question step by \
     step and explain which option is the most plausible. Do not give a final \
     answer yet."
        .to_string()
}

fn default_answer_system_prompt() -> String {
    "You are given a quiz question and an analysis of it. Choose the final \
     answer. Respond with JSON in the form {\"answer\": \"A\"}."
        .to_string()
}

fn default_single_phase_secs() -> u64 {
    120
}

fn default_reasoning_phase_secs() -> u64 {
    600
}

fn default_concurrency() -> usize {
    1
}

fn default_question_file() -> PathBuf {
    PathBuf::from("questions.json")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

impl TimeoutConfig {
    /// @ai:intent Timeout for single-phase and finalize calls
    /// @ai:effects pure
    pub fn single_phase(&self) -> Duration {
        Duration::from_secs(self.single_phase_secs)
    }

    /// @ai:intent Timeout for the free-form reasoning call
    /// @ai:effects pure
    pub fn reasoning_phase(&self) -> Duration {
        Duration::from_secs(self.reasoning_phase_secs)
    }
}

impl BenchmarkConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.model.name, "local-model");
        assert_eq!(config.sampling.temperature, 0.7);
        assert_eq!(config.sampling.top_k, 40);
        assert!(!config.prompts.use_two_phase);
        assert_eq!(config.run.concurrency, 1);
        assert_eq!(config.timeouts.single_phase(), Duration::from_secs(120));
        assert_eq!(config.timeouts.reasoning_phase(), Duration::from_secs(600));
    }

    #[test]
    fn test_load_minimal_toml_fills_defaults() {
        let config: BenchmarkConfig = toml::from_str(
            r#"
[model]
name = "org/some-model"
"#,
        )
        .unwrap();

        assert_eq!(config.model.name, "org/some-model");
        assert_eq!(config.model.server_url, default_server_url());
        assert_eq!(config.sampling.top_p, 0.95);
        assert_eq!(config.paths.question_file, PathBuf::from("questions.json"));
    }

    #[test]
    fn test_custom_field_parses_arbitrary_value() {
        let config: BenchmarkConfig = toml::from_str(
            r#"
[prompts]
custom_field = { name = "cache_prompt", value = true }
"#,
        )
        .unwrap();

        let field = config.prompts.custom_field.unwrap();
        assert_eq!(field.name, "cache_prompt");
        assert_eq!(field.value, serde_json::json!(true));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ladder.toml");

        let mut config = BenchmarkConfig::default();
        config.model.name = "round/trip".to_string();
        config.run.concurrency = 8;
        config.save(&path).unwrap();

        let loaded = BenchmarkConfig::load(&path).unwrap();
        assert_eq!(loaded.model.name, "round/trip");
        assert_eq!(loaded.run.concurrency, 8);
        assert_eq!(loaded.prompts.system_prompt, config.prompts.system_prompt);
    }
}
