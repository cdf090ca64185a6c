//! @ai:module:intent State machine driving one ladder round
//! @ai:module:layer application
//! @ai:module:public_api RoundEngine
//! @ai:module:stateless false

use crate::bank::QuestionBank;
use crate::ladder::PrizeLadder;
use crate::results::RoundResult;
use crate::runner::client::InferenceClientTrait;
use std::sync::Arc;
use std::time::Instant;

/// @ai:intent Walks one round up the prize ladder until a wrong answer
pub struct RoundEngine<C: InferenceClientTrait> {
    client: Arc<C>,
    bank: Arc<QuestionBank>,
    silent: bool,
}

impl<C: InferenceClientTrait> RoundEngine<C> {
    /// @ai:intent Create an engine over a shared client and question bank
    /// @ai:effects pure
    pub fn new(client: Arc<C>, bank: Arc<QuestionBank>, silent: bool) -> Self {
        Self {
            client,
            bank,
            silent,
        }
    }

    /// @ai:intent Play levels 1..15 using the question at `start_question`
    /// @ai:effects network
    ///
    /// A wrong, invalid or errored answer ends the round with the winnings
    /// accumulated so far. Bank data errors abort the round instead, which
    /// keeps them out of the correctness accounting.
    pub async fn play(&self, start_question: u32) -> RoundResult {
        let mut correct = 0u32;

        if !self.silent {
            tracing::info!("Starting round with question #{}", start_question);
        }

        for level in 1..=PrizeLadder::LEVELS {
            let Some(questions) = self.bank.level(level) else {
                tracing::error!("No questions for level {}", level);
                return RoundResult::new_aborted(start_question, correct);
            };

            let Some(question) = self.bank.question(level, start_question) else {
                tracing::error!(
                    "Question #{} does not exist in level {} ({} available)",
                    start_question,
                    level,
                    questions.len()
                );
                return RoundResult::new_aborted(start_question, correct);
            };

            let Some(expected) = question.correct_choice() else {
                tracing::error!(
                    "Correct answer {:?} not found among the options of level {} question #{}",
                    question.correct,
                    level,
                    start_question
                );
                return RoundResult::new_aborted(start_question, correct);
            };

            if !self.silent {
                tracing::info!(
                    "Level {} ({}): {}",
                    level,
                    PrizeLadder::payout(level),
                    question.text
                );
            }

            let started = Instant::now();
            let answer = self.client.answer(&question.prompt()).await;
            let elapsed = started.elapsed().as_secs_f64();

            if answer == expected {
                correct += 1;
                if !self.silent {
                    tracing::info!("Correct: {} (in {:.2}s)", answer, elapsed);
                }
            } else {
                if !self.silent {
                    tracing::info!(
                        "Wrong: got {}, expected {} (in {:.2}s)",
                        answer,
                        expected,
                        elapsed
                    );
                }
                break;
            }
        }

        if !self.silent {
            tracing::info!(
                "Round over: {}/{} correct, won {}",
                correct,
                PrizeLadder::LEVELS,
                PrizeLadder::payout(correct)
            );
        }

        RoundResult::new(start_question, correct)
    }
}
