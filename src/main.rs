use chrono::{Duration, Local};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;

use cli::Cli;
use cli::commands::Commands;
use pairwheel::config::EngineConfig;
use pairwheel::domain::DayPairs;
use pairwheel::engine::conformity::adapt_weights;
use pairwheel::engine::weights::pair_weights;
use pairwheel::history::{self, DevPairCombinations, split_streams};
use pairwheel::pipeline::generate_day;
use pairwheel::rng::{RandomSource, SeededRandom, ThreadRandom};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pairwheel")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("pairwheel.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &EngineConfig) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Generate {
            history,
            days_ahead,
            seed,
            write,
            json,
        } => handle_generate_command(history, *days_ahead, *seed, *write, *json, config),
        Commands::Weights { history } => handle_weights_command(history, config),
    }
}

fn handle_generate_command(
    history_path: &Path,
    days_ahead: i64,
    seed: Option<u64>,
    write: bool,
    json: bool,
    config: &EngineConfig,
) -> Result<()> {
    let date = Local::now().date_naive() + Duration::days(days_ahead);
    info!("Generating pairs for {} from {}", date, history_path.display());

    let past_days = history::load_days(history_path).context("Failed to load history")?;
    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let today = generate_day(date, config, past_days.clone(), rng.as_mut()).context("Failed to generate pairs")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&today)?);
    } else {
        print_day(&today);
    }

    if write {
        let mut days = past_days;
        days.retain(|day| day.date() != date);
        days.push(today);
        history::save_days(history_path, &days).context("Failed to write history")?;
        info!("History updated: {}", history_path.display());
    }
    Ok(())
}

fn handle_weights_command(history_path: &Path, config: &EngineConfig) -> Result<()> {
    info!("Building weight table from {}", history_path.display());

    let past_days = history::load_days(history_path).context("Failed to load history")?;
    let (dev_days, _) = split_streams(past_days);
    let dev_history = DevPairCombinations::new(dev_days)?;

    let mut weights = pair_weights(&dev_history, &config.developers);
    adapt_weights(&mut weights, &config.developers);

    println!("{}", "Adapted pair weights:".cyan());
    for (key, weight) in &weights {
        println!("  {} {}", format!("{key}").green(), weight);
    }
    Ok(())
}

fn print_day(today: &DayPairs) {
    println!("{} {}", "Pairs for".cyan(), today.date().to_string().cyan());
    for (track, pair) in today.pairs() {
        let mut tags = Vec::new();
        if pair.is_ops_pair() {
            tags.push("ops");
        }
        if pair.is_build_pair() {
            tags.push("build");
        }
        if pair.is_community_pair() {
            tags.push("community");
        }
        if pair.is_solo() {
            tags.push("solo");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };
        println!("  {} {}{}", format!("{track}:").green(), pair, tags.yellow());
    }
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = EngineConfig::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
