//! @ai:module:intent Round results, aggregation, and persistence
//! @ai:module:layer domain
//! @ai:module:public_api RoundResult, BenchmarkSummary, ResultStore, ChartGenerator

pub mod aggregate;
pub mod charts;
pub mod store;
pub mod types;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use store::{ResultStore, ResultStoreTrait};
pub use types::{BenchmarkSummary, RoundResult};
