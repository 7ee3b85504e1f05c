//! CLI module for pairwheel - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for generating a day's
//! pairs and inspecting the weight table.

pub mod commands;

pub use commands::Cli;
