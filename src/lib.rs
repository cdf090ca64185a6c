//! @ai:module:intent Ladder-quiz benchmark library
//! @ai:module:layer application
//! @ai:module:public_api answer, bank, config, ladder, results, runner

pub mod answer;
pub mod bank;
pub mod config;
pub mod ladder;
pub mod results;
pub mod runner;

pub use answer::{AnswerParser, ParsedAnswer};
pub use bank::{BankLoader, BankLoaderTrait, Question, QuestionBank};
pub use config::BenchmarkConfig;
pub use ladder::PrizeLadder;
pub use results::{BenchmarkSummary, ChartGenerator, ResultStore, RoundResult};
pub use runner::{BenchmarkRunner, HttpInferenceClient, InferenceClientTrait, RoundEngine};
