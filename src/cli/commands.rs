//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - generate: produce pair assignments for a day
//! - weights: print the adapted weight table

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pairwheel - a daily pair-rotation engine
#[derive(Parser, Debug)]
#[command(name = "pairwheel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate pair assignments for a day
    Generate {
        /// Path to the JSON history file
        #[arg(short = 'H', long, default_value = "pairs.json")]
        history: PathBuf,

        /// Generate for N days past today (dry runs into the future)
        #[arg(short, long, default_value_t = 0)]
        days_ahead: i64,

        /// Seed for deterministic tie-breaking
        #[arg(short, long)]
        seed: Option<u64>,

        /// Append the generated day to the history file
        #[arg(short, long)]
        write: bool,

        /// Print the result as JSON instead of the table view
        #[arg(short, long)]
        json: bool,
    },

    /// Print the adapted weight table for today's roster
    Weights {
        /// Path to the JSON history file
        #[arg(short = 'H', long, default_value = "pairs.json")]
        history: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["pairwheel", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                history,
                days_ahead,
                seed,
                write,
                json,
            } => {
                assert_eq!(history, PathBuf::from("pairs.json"));
                assert_eq!(days_ahead, 0);
                assert!(seed.is_none());
                assert!(!write);
                assert!(!json);
            }
            _ => panic!("Expected generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let cli = Cli::try_parse_from([
            "pairwheel", "generate", "-H", "/tmp/pairs.json", "-d", "2", "-s", "42", "--write", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                history,
                days_ahead,
                seed,
                write,
                json,
            } => {
                assert_eq!(history, PathBuf::from("/tmp/pairs.json"));
                assert_eq!(days_ahead, 2);
                assert_eq!(seed, Some(42));
                assert!(write);
                assert!(json);
            }
            _ => panic!("Expected generate command"),
        }
    }

    #[test]
    fn test_weights_command() {
        let cli = Cli::try_parse_from(["pairwheel", "weights", "-H", "history.json"]).unwrap();
        match cli.command {
            Commands::Weights { history } => {
                assert_eq!(history, PathBuf::from("history.json"));
            }
            _ => panic!("Expected weights command"),
        }
    }

    #[test]
    fn test_config_and_verbose_flags() {
        let cli = Cli::try_parse_from(["pairwheel", "-c", "/path/to/pairwheel.yml", "-v", "generate"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/pairwheel.yml")));
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["pairwheel"]).is_err());
    }

    #[test]
    fn test_help_works() {
        // Verify help doesn't panic
        Cli::command().debug_assert();
    }
}
