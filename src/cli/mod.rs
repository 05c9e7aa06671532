//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for OLI using clap.
//! Anonymized text and JSON go to stdout; status lines, summaries and logs
//! go to stderr.

pub mod commands;

use clap::{Parser, Subcommand};

/// OLI - Bilingual PII detection and anonymization
#[derive(Parser, Debug)]
#[command(name = "oli")]
#[command(version, about, long_about = None)]
#[command(author = "OLI Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = commands::DEFAULT_CONFIG_PATH, env = "OLI_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "OLI_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace detected PII with type tokens
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Print detected PII entities as JSON
    Detect(commands::detect::DetectArgs),

    /// List supported entity types and their replacement tokens
    Entities(commands::entities::EntitiesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
