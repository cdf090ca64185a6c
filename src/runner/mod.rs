//! @ai:module:intent Round execution and inference client
//! @ai:module:layer infrastructure
//! @ai:module:public_api HttpInferenceClient, RoundEngine, BenchmarkRunner

pub mod client;
pub mod engine;
pub mod executor;

pub use client::{HttpInferenceClient, InferenceClientTrait, MockInferenceClient};
pub use engine::RoundEngine;
pub use executor::{BenchmarkRunner, TOTAL_ROUNDS};
