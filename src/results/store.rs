//! @ai:module:intent Per-model result file persistence
//! @ai:module:layer infrastructure
//! @ai:module:public_api ResultStore
//! @ai:module:stateless true

use crate::config::BenchmarkConfig;
use crate::results::types::BenchmarkSummary;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// @ai:intent Trait for result persistence
pub trait ResultStoreTrait: Send + Sync {
    /// @ai:intent Load the model's prior summary, or start a fresh one
    fn load_or_init(&self, config: &BenchmarkConfig) -> Result<BenchmarkSummary>;

    /// @ai:intent Write the summary to its per-model file
    fn save(&self, summary: &BenchmarkSummary) -> Result<PathBuf>;
}

/// @ai:intent Persists per-model benchmark summaries as pretty JSON
pub struct ResultStore {
    results_dir: PathBuf,
}

impl ResultStore {
    /// @ai:intent Create a store rooted at the results directory
    /// @ai:effects pure
    pub fn new(results_dir: &Path) -> Self {
        Self {
            results_dir: results_dir.to_path_buf(),
        }
    }

    /// @ai:intent File path holding a model's merged results
    /// @ai:effects pure
    pub fn result_path(&self, model: &str) -> PathBuf {
        self.results_dir
            .join(format!("result_{}.json", sanitize_model_name(model)))
    }
}

impl ResultStoreTrait for ResultStore {
    /// @ai:intent Load the model's prior summary, or start a fresh one
    /// @ai:effects fs:read
    fn load_or_init(&self, config: &BenchmarkConfig) -> Result<BenchmarkSummary> {
        let path = self.result_path(&config.model.name);
        if !path.exists() {
            return Ok(BenchmarkSummary::new(config));
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read result file: {}", path.display()))?;
        let summary = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse result file: {}", path.display()))?;

        Ok(summary)
    }

    /// @ai:intent Write the summary to its per-model file
    /// @ai:effects fs:write
    fn save(&self, summary: &BenchmarkSummary) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.results_dir).with_context(|| {
            format!(
                "Failed to create results directory: {}",
                self.results_dir.display()
            )
        })?;

        let path = self.result_path(&summary.model);
        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write result file: {}", path.display()))?;

        Ok(path)
    }
}

/// @ai:intent Make a model name safe to use as a filename
/// @ai:effects pure
fn sanitize_model_name(model: &str) -> String {
    model.replace('/', "-")
}
