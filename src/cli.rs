//! Command-line interface for tiresias
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Ask a spoken question about an image, hear the answer
#[derive(Parser, Debug)]
#[command(
    name = "tiresias",
    version,
    about = "Ask a spoken question about an image, hear the answer"
)]
pub struct Cli {
    /// Subcommand to execute (default: run the pipeline)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: stage progress, -vv: stage timings)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run number used for default file names (input_<N>.mp3, input_<N>.png,
    /// output_<N>.mp3)
    #[arg(short = 'n', long, value_name = "N", default_value_t = crate::defaults::RUN_NUMBER)]
    pub run: u32,

    /// Audio question file (overrides the run-number default)
    #[arg(long, value_name = "PATH")]
    pub audio: Option<PathBuf>,

    /// Image file (overrides the run-number default)
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Output audio file (overrides the run-number default)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip playback of the synthesized answer
    #[arg(long)]
    pub no_play: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check credentials, configuration and the audio output device
    Check,

    /// Get, set or dump configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print a configuration value
    Get {
        /// Dotted key path, e.g. synthesis.voice
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Dotted key path, e.g. synthesis.voice
        key: String,
        /// New value
        value: String,
    },
    /// Print the full default configuration as TOML
    Dump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_invocation_with_defaults() {
        let cli = Cli::parse_from(["tiresias"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.run, 1);
        assert!(cli.audio.is_none());
        assert!(!cli.no_play);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_run_number_and_overrides() {
        let cli = Cli::parse_from([
            "tiresias",
            "-n",
            "3",
            "--image",
            "photo.png",
            "--no-play",
            "-vv",
        ]);
        assert_eq!(cli.run, 3);
        assert_eq!(cli.image, Some(PathBuf::from("photo.png")));
        assert!(cli.no_play);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parses_config_subcommand() {
        let cli = Cli::parse_from(["tiresias", "config", "set", "synthesis.voice", "en-US-Standard-E"]);
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Set { key, value },
            }) => {
                assert_eq!(key, "synthesis.voice");
                assert_eq!(value, "en-US-Standard-E");
            }
            other => panic!("Expected config set, got {:?}", other),
        }
    }

    #[test]
    fn parses_check_subcommand_with_global_config() {
        let cli = Cli::parse_from(["tiresias", "check", "--config", "/tmp/c.toml"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
