//! @ai:module:intent Orchestrates the full benchmark across all rounds
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkRunner, TOTAL_ROUNDS
//! @ai:module:stateless false

use crate::bank::QuestionBank;
use crate::results::RoundResult;
use crate::runner::client::InferenceClientTrait;
use crate::runner::engine::RoundEngine;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Rounds played in all-rounds mode, one per question position.
pub const TOTAL_ROUNDS: u32 = 45;

/// @ai:intent Runs ladder rounds sequentially or with bounded concurrency
pub struct BenchmarkRunner<C: InferenceClientTrait> {
    client: Arc<C>,
    bank: Arc<QuestionBank>,
    concurrency: usize,
}

impl<C: InferenceClientTrait + 'static> BenchmarkRunner<C> {
    /// @ai:intent Create a runner; concurrency below 1 means sequential
    /// @ai:effects pure
    pub fn new(client: Arc<C>, bank: Arc<QuestionBank>, concurrency: usize) -> Self {
        Self {
            client,
            bank,
            concurrency: concurrency.max(1),
        }
    }

    /// @ai:intent Play one verbose round at the given question position
    /// @ai:effects network
    pub async fn run_one(&self, start_question: u32) -> RoundResult {
        let engine = RoundEngine::new(self.client.clone(), self.bank.clone(), false);
        engine.play(start_question).await
    }

    /// @ai:intent Play every round; always exactly 45 results, in order
    /// @ai:effects network
    pub async fn run_all(&self) -> Vec<RoundResult> {
        if self.concurrency <= 1 {
            self.run_all_sequential().await
        } else {
            self.run_all_concurrent().await
        }
    }

    async fn run_all_sequential(&self) -> Vec<RoundResult> {
        tracing::info!("Running {} rounds sequentially", TOTAL_ROUNDS);

        let mut results = Vec::with_capacity(TOTAL_ROUNDS as usize);
        for question_number in 1..=TOTAL_ROUNDS {
            tracing::info!("Round {}/{}", question_number, TOTAL_ROUNDS);

            let engine = RoundEngine::new(self.client.clone(), self.bank.clone(), false);
            let mut result = engine.play(question_number).await;
            result.question_number = Some(question_number);
            results.push(result);
        }
        results
    }

    /// @ai:intent Dispatch all rounds to a bounded pool of silent workers
    /// @ai:effects network
    ///
    /// Collection order is completion order; the final sort restores the
    /// canonical ordering. A panicked worker costs only its own round,
    /// which is backfilled with a zero-score placeholder.
    async fn run_all_concurrent(&self) -> Vec<RoundResult> {
        tracing::info!(
            "Running {} rounds with concurrency {}",
            TOTAL_ROUNDS,
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for question_number in 1..=TOTAL_ROUNDS {
            let semaphore = semaphore.clone();
            let engine = RoundEngine::new(self.client.clone(), self.bank.clone(), true);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    // Only possible if the semaphore were closed; give the
                    // round up rather than crash the batch.
                    Err(_) => return RoundResult::placeholder(question_number),
                };

                let mut result = engine.play(question_number).await;
                result.question_number = Some(question_number);
                result
            });
        }

        let total = TOTAL_ROUNDS as usize;
        let mut results: Vec<RoundResult> = Vec::with_capacity(total);
        let mut completed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            match joined {
                Ok(result) => {
                    tracing::info!(
                        "[Round {:2}/{}] level {:2}, won {:>10} ({}/{} done)",
                        result.start_question,
                        TOTAL_ROUNDS,
                        result.correct_answers,
                        result.final_amount,
                        completed,
                        total
                    );
                    results.push(result);
                }
                Err(error) => {
                    tracing::warn!("Round worker failed: {} ({}/{} done)", error, completed, total);
                }
            }
        }

        // Rounds lost to worker failures still get a zero-score entry.
        for question_number in 1..=TOTAL_ROUNDS {
            let present = results
                .iter()
                .any(|result| result.question_number == Some(question_number));
            if !present {
                results.push(RoundResult::placeholder(question_number));
            }
        }

        results.sort_by_key(|result| result.question_number);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::ParsedAnswer;
    use crate::bank::Question;
    use crate::ladder::PrizeLadder;
    use crate::runner::client::MockInferenceClient;
    use std::collections::BTreeMap;

    fn full_bank() -> Arc<QuestionBank> {
        let mut levels = BTreeMap::new();
        for level in 1..=PrizeLadder::LEVELS {
            let questions = (1..=TOTAL_ROUNDS)
                .map(|position| Question {
                    text: format!("L{level} Q{position}"),
                    options: [
                        "right".to_string(),
                        "wrong 1".to_string(),
                        "wrong 2".to_string(),
                        "wrong 3".to_string(),
                    ],
                    correct: "right".to_string(),
                })
                .collect();
            levels.insert(level, questions);
        }
        Arc::new(QuestionBank::new(levels))
    }

    fn assert_ordered_full_set(results: &[RoundResult]) {
        assert_eq!(results.len(), TOTAL_ROUNDS as usize);
        for (index, result) in results.iter().enumerate() {
            assert_eq!(result.question_number, Some(index as u32 + 1));
        }
    }

    #[tokio::test]
    async fn test_run_one_leaves_question_number_unset() {
        let client = Arc::new(MockInferenceClient::new(ParsedAnswer::A));
        let runner = BenchmarkRunner::new(client, full_bank(), 1);

        let result = runner.run_one(3).await;

        assert_eq!(result.start_question, 3);
        assert_eq!(result.question_number, None);
        assert_eq!(result.correct_answers, 15);
    }

    #[tokio::test]
    async fn test_run_all_sequential_returns_ordered_full_set() {
        let client = Arc::new(MockInferenceClient::new(ParsedAnswer::A));
        let runner = BenchmarkRunner::new(client.clone(), full_bank(), 1);

        let results = runner.run_all().await;

        assert_ordered_full_set(&results);
        assert!(results.iter().all(|result| result.is_million_win()));
        assert_eq!(client.call_count(), (TOTAL_ROUNDS * 15) as usize);
    }

    #[tokio::test]
    async fn test_run_all_concurrent_returns_ordered_full_set() {
        let client = Arc::new(MockInferenceClient::new(ParsedAnswer::A));
        let runner = BenchmarkRunner::new(client, full_bank(), 5);

        let results = runner.run_all().await;

        assert_ordered_full_set(&results);
        assert!(results.iter().all(|result| result.is_million_win()));
    }

    #[tokio::test]
    async fn test_run_all_fully_parallel_all_wrong() {
        let client = Arc::new(MockInferenceClient::new(ParsedAnswer::B));
        let runner = BenchmarkRunner::new(client.clone(), full_bank(), TOTAL_ROUNDS as usize);

        let results = runner.run_all().await;

        assert_ordered_full_set(&results);
        assert!(results
            .iter()
            .all(|result| result.correct_answers == 0 && result.final_amount == "0€"));
        assert_eq!(client.call_count(), TOTAL_ROUNDS as usize);
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_zero_score_placeholder() {
        // The marker hits round 7's level-1 prompt and nothing else.
        let client = Arc::new(MockInferenceClient::panicking_on(ParsedAnswer::A, "L1 Q7\n"));
        let runner = BenchmarkRunner::new(client, full_bank(), 5);

        let results = runner.run_all().await;

        assert_ordered_full_set(&results);

        let round7 = &results[6];
        assert_eq!(round7.start_question, 7);
        assert_eq!(round7.correct_answers, 0);
        assert_eq!(round7.final_amount, "0€");
        assert!(!round7.aborted);

        let siblings_won = results
            .iter()
            .filter(|result| result.question_number != Some(7))
            .all(|result| result.is_million_win());
        assert!(siblings_won);
    }
}
