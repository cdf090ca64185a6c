//! @ai:module:intent Question bank definitions and loading
//! @ai:module:layer domain
//! @ai:module:public_api Question, QuestionBank, BankLoader, BankError

pub mod loader;
pub mod question;

pub use loader::{BankLoader, BankLoaderTrait};
pub use question::Question;

use crate::ladder::PrizeLadder;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Errors raised while loading the question bank
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Failed to read question file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed question file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Level key {0:?} is not a number in 1..=15")]
    InvalidLevel(String),
}

pub type Result<T> = std::result::Result<T, BankError>;

/// @ai:intent Immutable mapping from level to its ordered questions
#[derive(Debug, Clone)]
pub struct QuestionBank {
    levels: BTreeMap<u32, Vec<Question>>,
}

impl QuestionBank {
    /// @ai:intent Wrap a level map as a question bank
    /// @ai:effects pure
    pub fn new(levels: BTreeMap<u32, Vec<Question>>) -> Self {
        Self { levels }
    }

    /// @ai:intent All questions of one level, in file order
    /// @ai:effects pure
    pub fn level(&self, level: u32) -> Option<&[Question]> {
        self.levels.get(&level).map(|questions| questions.as_slice())
    }

    /// @ai:intent Question at a 1-based position within a level
    /// @ai:effects pure
    pub fn question(&self, level: u32, position: u32) -> Option<&Question> {
        let index = position.checked_sub(1)? as usize;
        self.levels.get(&level)?.get(index)
    }

    /// @ai:intent Number of questions stored for a level
    /// @ai:effects pure
    pub fn level_len(&self, level: u32) -> Option<usize> {
        self.levels.get(&level).map(|questions| questions.len())
    }

    /// @ai:intent Total question count across all levels
    /// @ai:effects pure
    pub fn total_questions(&self) -> usize {
        self.levels.values().map(|questions| questions.len()).sum()
    }

    /// @ai:intent Check bank invariants; returns human-readable issues
    /// @ai:effects pure
    ///
    /// Checks: all 15 levels present and non-empty, equal question counts
    /// per level, and every ground-truth answer present among its options.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let expected_len = self.levels.get(&1).map(|questions| questions.len());

        for level in 1..=PrizeLadder::LEVELS {
            let Some(questions) = self.levels.get(&level) else {
                issues.push(format!("level {level} is missing"));
                continue;
            };

            if questions.is_empty() {
                issues.push(format!("level {level} has no questions"));
            }

            if let Some(expected) = expected_len {
                if questions.len() != expected {
                    issues.push(format!(
                        "level {level} has {} questions, level 1 has {expected}",
                        questions.len()
                    ));
                }
            }

            for (position, question) in questions.iter().enumerate() {
                if question.correct_choice().is_none() {
                    issues.push(format!(
                        "level {level}, question {}: correct answer {:?} not among the options",
                        position + 1,
                        question.correct
                    ));
                }
            }
        }

        issues
    }
}
