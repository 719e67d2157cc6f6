//! Configuration management for the keyword runner.
//!
//! Handles:
//! - Command-line argument parsing
//! - Log level selection

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the keyword runner
#[derive(Debug, Parser)]
#[command(name = "excel-kw")]
#[command(about = "Run a TOML step script of Excel keywords")]
#[command(version)]
pub struct Args {
    /// Path to the step script to execute
    pub script: PathBuf,

    /// Log level for the runner
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Suppress printing of keyword return values
    #[arg(long)]
    pub quiet: bool,
}

/// Combined runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Script file to execute
    pub script: PathBuf,
    /// Log level
    pub log_level: String,
    /// Whether keyword return values are printed
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Config {
            script: args.script,
            log_level: args.log_level,
            quiet: args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["excel-kw", "steps.toml"]);
        let config = Config::from_args(args).expect("config");
        assert_eq!(config.script, PathBuf::from("steps.toml"));
        assert_eq!(config.log_level, "info");
        assert!(!config.quiet);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["excel-kw", "steps.toml", "--log-level", "debug", "--quiet"]);
        let config = Config::from_args(args).expect("config");
        assert_eq!(config.log_level, "debug");
        assert!(config.quiet);
    }
}
