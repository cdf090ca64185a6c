//! @ai:module:intent JSON question-bank loader
//! @ai:module:layer infrastructure
//! @ai:module:public_api BankLoader
//! @ai:module:stateless true

use crate::bank::question::{Question, QuestionRecord};
use crate::bank::{BankError, QuestionBank, Result};
use crate::ladder::PrizeLadder;
use std::collections::BTreeMap;
use std::path::Path;

/// @ai:intent Trait for loading the question bank
pub trait BankLoaderTrait: Send + Sync {
    /// @ai:intent Load the level-keyed question file
    fn load(&self, path: &Path) -> Result<QuestionBank>;
}

/// @ai:intent Loads the level-keyed JSON question file
/// @ai:effects pure (stateless)
pub struct BankLoader;

impl BankLoader {
    /// @ai:intent Create a new bank loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for BankLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BankLoaderTrait for BankLoader {
    /// @ai:intent Load the question file into a bank
    /// @ai:effects fs:read
    fn load(&self, path: &Path) -> Result<QuestionBank> {
        let content = std::fs::read_to_string(path).map_err(|source| BankError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: BTreeMap<String, Vec<QuestionRecord>> = serde_json::from_str(&content)?;

        let mut levels = BTreeMap::new();
        for (key, records) in raw {
            let level = key
                .parse::<u32>()
                .ok()
                .filter(|level| (1..=PrizeLadder::LEVELS).contains(level))
                .ok_or_else(|| BankError::InvalidLevel(key.clone()))?;

            levels.insert(level, records.into_iter().map(Question::from).collect());
        }

        Ok(QuestionBank::new(levels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_bank(dir: &Path, levels: u32, questions_per_level: usize) -> PathBuf {
        let mut root = serde_json::Map::new();

        for level in 1..=levels {
            let records: Vec<serde_json::Value> = (1..=questions_per_level)
                .map(|position| {
                    serde_json::json!([
                        format!("Level {level} question {position}?"),
                        "alpha",
                        "beta",
                        "gamma",
                        "delta",
                        "beta"
                    ])
                })
                .collect();
            root.insert(level.to_string(), serde_json::Value::Array(records));
        }

        let path = dir.join("questions.json");
        std::fs::write(&path, serde_json::Value::Object(root).to_string()).unwrap();
        path
    }

    #[test]
    fn test_load_full_bank() {
        let temp = TempDir::new().unwrap();
        let path = write_bank(temp.path(), 15, 3);

        let bank = BankLoader::new().load(&path).unwrap();
        assert_eq!(bank.total_questions(), 45);
        assert_eq!(bank.level_len(15), Some(3));
        assert_eq!(bank.question(1, 2).unwrap().text, "Level 1 question 2?");
        assert!(bank.question(1, 4).is_none());
        assert!(bank.question(1, 0).is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = BankLoader::new().load(&temp.path().join("nope.json"));
        assert!(matches!(result, Err(BankError::FileRead { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("questions.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = BankLoader::new().load(&path);
        assert!(matches!(result, Err(BankError::Json(_))));
    }

    #[test]
    fn test_load_rejects_bad_level_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("questions.json");
        std::fs::write(&path, r#"{"sixteen": []}"#).unwrap();
        let result = BankLoader::new().load(&path);
        assert!(matches!(result, Err(BankError::InvalidLevel(_))));

        std::fs::write(&path, r#"{"16": []}"#).unwrap();
        let result = BankLoader::new().load(&path);
        assert!(matches!(result, Err(BankError::InvalidLevel(_))));
    }

    #[test]
    fn test_load_rejects_short_record() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("questions.json");
        std::fs::write(&path, r#"{"1": [["q", "a", "b", "c", "d"]]}"#).unwrap();

        let result = BankLoader::new().load(&path);
        assert!(matches!(result, Err(BankError::Json(_))));
    }

    #[test]
    fn test_validate_clean_bank() {
        let temp = TempDir::new().unwrap();
        let path = write_bank(temp.path(), 15, 2);

        let bank = BankLoader::new().load(&path).unwrap();
        assert!(bank.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_missing_levels() {
        let temp = TempDir::new().unwrap();
        let path = write_bank(temp.path(), 3, 2);

        let bank = BankLoader::new().load(&path).unwrap();
        let issues = bank.validate();
        assert!(issues.contains(&"level 4 is missing".to_string()));
        assert_eq!(issues.len(), 12);
    }

    #[test]
    fn test_validate_reports_ground_truth_mismatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("questions.json");

        let mut root = serde_json::Map::new();
        for level in 1..=15u32 {
            let correct = if level == 7 { "zeta" } else { "beta" };
            root.insert(
                level.to_string(),
                serde_json::json!([["Q?", "alpha", "beta", "gamma", "delta", correct]]),
            );
        }
        std::fs::write(&path, serde_json::Value::Object(root).to_string()).unwrap();

        let bank = BankLoader::new().load(&path).unwrap();
        let issues = bank.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("level 7"));
        assert!(issues[0].contains("zeta"));
    }
}
