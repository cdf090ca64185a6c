//! @ai:module:intent Result types for benchmark rounds
//! @ai:module:layer domain
//! @ai:module:public_api RoundResult, BenchmarkSummary
//! @ai:module:stateless true

use crate::config::{BenchmarkConfig, SamplingConfig};
use crate::ladder::{PrizeLadder, ZERO_AMOUNT};
use crate::results::aggregate;
use serde::{Deserialize, Serialize};

/// @ai:intent Outcome of one ladder round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    pub start_question: u32,
    pub correct_answers: u32,
    pub final_amount: String,
    /// Only set in all-rounds mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u32>,
    /// Attached when the result is merged into a summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// True when a question-bank data error ended the round.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub aborted: bool,
}

impl RoundResult {
    /// @ai:intent Result for a round that cleared `correct_answers` levels
    /// @ai:effects pure
    pub fn new(start_question: u32, correct_answers: u32) -> Self {
        Self {
            start_question,
            correct_answers,
            final_amount: PrizeLadder::payout(correct_answers).to_string(),
            question_number: None,
            timestamp: None,
            aborted: false,
        }
    }

    /// @ai:intent Result for a round cut short by a data error
    /// @ai:effects pure
    pub fn new_aborted(start_question: u32, correct_answers: u32) -> Self {
        Self {
            aborted: true,
            ..Self::new(start_question, correct_answers)
        }
    }

    /// @ai:intent Zero-score stand-in for a worker that failed outright
    /// @ai:effects pure
    pub fn placeholder(question_number: u32) -> Self {
        let mut result = Self::new(question_number, 0);
        result.question_number = Some(question_number);
        result
    }

    /// @ai:intent Whether the round cleared all 15 levels
    /// @ai:effects pure
    pub fn is_million_win(&self) -> bool {
        self.correct_answers >= PrizeLadder::LEVELS
    }

    /// @ai:intent Questions this round attempted, for correctness accounting
    /// @ai:effects pure
    ///
    /// A lost round attempted one more question than it answered. Won rounds
    /// attempted exactly 15. Aborted rounds never got an answer judged on
    /// their last question, so only the answered ones count.
    pub fn questions_attempted(&self) -> u32 {
        if self.aborted || self.correct_answers >= PrizeLadder::LEVELS {
            self.correct_answers
        } else {
            self.correct_answers + 1
        }
    }
}

/// @ai:intent Per-model aggregate persisted to the result file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub model: String,
    pub model_parameters: SamplingConfig,
    pub total_parameters: String,
    pub active_parameters: String,
    #[serde(default)]
    pub rounds: Vec<RoundResult>,
    #[serde(default)]
    pub average_final_amount: String,
    #[serde(default)]
    pub average_correctness_percentage: f64,
    #[serde(default)]
    pub million_wins: u32,
}

impl BenchmarkSummary {
    /// @ai:intent Fresh summary carrying the configured model snapshot
    /// @ai:effects pure
    pub fn new(config: &BenchmarkConfig) -> Self {
        Self {
            model: config.model.name.clone(),
            model_parameters: config.sampling,
            total_parameters: config.model.total_parameters.clone(),
            active_parameters: config.model.active_parameters.clone(),
            rounds: Vec::new(),
            average_final_amount: ZERO_AMOUNT.to_string(),
            average_correctness_percentage: 0.0,
            million_wins: 0,
        }
    }

    /// @ai:intent Merge one single-round result, replacing prior attempts
    /// @ai:effects pure (mutates self)
    ///
    /// Prior entries at the same start_question without a question_number
    /// are earlier single-round attempts and get replaced; bulk-run entries
    /// are kept.
    pub fn merge_single(&mut self, mut result: RoundResult) {
        result.timestamp = Some(current_timestamp());
        self.rounds.retain(|round| {
            round.start_question != result.start_question || round.question_number.is_some()
        });
        self.rounds.push(result);
        self.recompute();
    }

    /// @ai:intent Append a bulk run's results and refresh the statistics
    /// @ai:effects pure (mutates self)
    pub fn merge_bulk(&mut self, results: Vec<RoundResult>) {
        let stamp = current_timestamp();
        for mut result in results {
            result.timestamp = Some(stamp.clone());
            self.rounds.push(result);
        }
        self.recompute();
    }

    /// Keeps rounds sorted by start_question and derived fields current.
    fn recompute(&mut self) {
        self.rounds.sort_by_key(|round| round.start_question);
        self.average_final_amount = aggregate::average_final_amount(&self.rounds);
        self.average_correctness_percentage =
            aggregate::average_correctness_percentage(&self.rounds);
        self.million_wins = aggregate::million_wins(&self.rounds);
    }
}

fn current_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
