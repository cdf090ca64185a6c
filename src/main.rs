//! @ai:module:intent CLI for the ladder quiz benchmark
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use ladder_bench::{
    bank::{BankLoader, BankLoaderTrait, QuestionBank},
    config::BenchmarkConfig,
    ladder::PrizeLadder,
    results::{BenchmarkSummary, ChartGenerator, ChartGeneratorTrait, ResultStore, ResultStoreTrait},
    runner::{BenchmarkRunner, HttpInferenceClient},
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ladder-bench")]
#[command(about = "Prize-ladder quiz benchmark for LLM inference endpoints")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark against the configured endpoint
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Play all 45 rounds instead of a single one
        #[arg(long)]
        all: bool,

        /// Starting question position (1-based) for a single round
        #[arg(short, long, default_value = "1")]
        start: u32,

        /// Override the configured concurrency level
        #[arg(long)]
        concurrency: Option<usize>,

        /// Render charts after the run
        #[arg(long)]
        charts: bool,
    },

    /// Write a default configuration file
    Init {
        /// Output path for the configuration
        #[arg(short, long, default_value = "ladder.toml")]
        output: PathBuf,
    },

    /// Validate the question bank
    Validate {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List question counts and prizes per level
    List {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

struct RunArgs {
    config: Option<PathBuf>,
    all: bool,
    start: u32,
    concurrency: Option<usize>,
    charts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ladder_bench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            all,
            start,
            concurrency,
            charts,
        } => {
            run_benchmark(RunArgs {
                config,
                all,
                start,
                concurrency,
                charts,
            })
            .await
        }
        Commands::Init { output } => init_config(output),
        Commands::Validate { config } => validate_bank(config),
        Commands::List { config } => list_levels(config),
    }
}

/// @ai:intent Play one round or the full batch and persist the merged results
/// @ai:effects network, fs:read, fs:write
async fn run_benchmark(args: RunArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;
    if let Some(concurrency) = args.concurrency {
        config.run.concurrency = concurrency;
    }

    if !args.all && args.start == 0 {
        anyhow::bail!("--start positions are 1-based");
    }

    tracing::info!("Model: {}", config.model.name);
    tracing::info!("Server: {}", config.model.server_url);
    tracing::info!("Two-phase reasoning: {}", config.prompts.use_two_phase);
    tracing::info!("Concurrency: {}", config.run.concurrency);

    let bank = Arc::new(load_bank(&config)?);

    // Concurrent rounds would interleave per-question output.
    let silent = args.all && config.run.concurrency > 1;
    let client = Arc::new(HttpInferenceClient::new(&config, silent));
    let runner = BenchmarkRunner::new(client, bank, config.run.concurrency);

    let store = ResultStore::new(&config.paths.results_dir);
    let mut summary = store.load_or_init(&config)?;

    if args.all {
        let results = runner.run_all().await;
        summary.merge_bulk(results);
    } else {
        let result = runner.run_one(args.start).await;
        summary.merge_single(result);
    }

    let path = store.save(&summary)?;
    tracing::info!("Results saved to {}", path.display());

    if args.charts {
        let generator = ChartGenerator::new();
        for chart in generator.generate_all(&summary.rounds, &config.paths.results_dir)? {
            tracing::info!("Chart written: {}", chart);
        }
    }

    print_summary(&config, &summary);

    Ok(())
}

/// @ai:intent Load the question bank, warning about data issues without failing the run
/// @ai:effects fs:read
fn load_bank(config: &BenchmarkConfig) -> Result<QuestionBank> {
    let loader = BankLoader::new();
    let bank = loader.load(&config.paths.question_file)?;

    // Data issues abort only the rounds that hit them, so they are not fatal here.
    for issue in bank.validate() {
        tracing::warn!("Question bank: {}", issue);
    }

    tracing::info!(
        "Loaded {} questions across {} levels",
        bank.total_questions(),
        PrizeLadder::LEVELS
    );

    Ok(bank)
}

/// @ai:intent Write a default configuration file, refusing to overwrite
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    if output.exists() {
        anyhow::bail!("{} already exists, not overwriting it", output.display());
    }

    let config = BenchmarkConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    println!("Edit the [model] section before running the benchmark.");
    Ok(())
}

/// @ai:intent Validate the question bank and report every issue found
/// @ai:effects fs:read
fn validate_bank(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config_path)?;
    let loader = BankLoader::new();
    let bank = loader.load(&config.paths.question_file)?;

    let issues = bank.validate();
    if issues.is_empty() {
        println!("Question bank validation passed!");
        println!("Total questions: {}", bank.total_questions());
        for level in 1..=PrizeLadder::LEVELS {
            println!(
                "  - level {}: {} questions",
                level,
                bank.level_len(level).unwrap_or(0)
            );
        }
        return Ok(());
    }

    println!("Question bank has {} issue(s):", issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }
    anyhow::bail!("question bank validation failed");
}

/// @ai:intent List per-level question counts alongside the prize ladder
/// @ai:effects fs:read
fn list_levels(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config_path)?;
    let loader = BankLoader::new();
    let bank = loader.load(&config.paths.question_file)?;

    println!("Question bank: {}", config.paths.question_file.display());
    println!();
    println!("{:<8} {:>12} {:>12}", "Level", "Prize", "Questions");
    println!("{}", "-".repeat(34));

    for level in 1..=PrizeLadder::LEVELS {
        println!(
            "{:<8} {:>12} {:>12}",
            level,
            PrizeLadder::payout(level),
            bank.level_len(level).unwrap_or(0)
        );
    }

    Ok(())
}

/// @ai:intent Load configuration from an explicit path or fall back to defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<BenchmarkConfig> {
    match path {
        Some(path) => BenchmarkConfig::load(&path),
        None => {
            let default_path = PathBuf::from("ladder.toml");
            if default_path.exists() {
                BenchmarkConfig::load(&default_path)
            } else {
                Ok(BenchmarkConfig::default())
            }
        }
    }
}

/// @ai:intent Print the merged summary to the console
/// @ai:effects io
fn print_summary(config: &BenchmarkConfig, summary: &BenchmarkSummary) {
    println!();
    println!("Benchmark results for {}", summary.model);
    println!("{}", "=".repeat(50));
    println!("{:<25} {:>10}", "Rounds recorded:", summary.rounds.len());
    println!("{:<25} {:>10}", "Million wins:", summary.million_wins);
    println!(
        "{:<25} {:>10}",
        "Average winnings:", summary.average_final_amount
    );
    println!(
        "{:<25} {:>9.2}%",
        "Average correctness:", summary.average_correctness_percentage
    );
    println!(
        "Sampling: T:{}, K:{}, P:{}, Min:{}",
        config.sampling.temperature,
        config.sampling.top_k,
        config.sampling.top_p,
        config.sampling.min_p
    );
}
