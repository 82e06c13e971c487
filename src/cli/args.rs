//! CLI argument definitions.

use crate::cli::validators::{parse_threshold, parse_window_seconds};
use crate::constants::MAX_FRAME_INTERVAL_MS;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Replay a directory of frames through a filtered camera.
#[derive(Debug, Parser)]
#[command(name = "framegate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory of frames to replay.
    pub input: Option<PathBuf>,

    /// Replay options.
    #[command(flatten)]
    pub replay: ReplayArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
    /// Validate the configuration file.
    Check,
}

/// Arguments for a replay run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReplayArgs {
    /// JSON file with precomputed scores per frame name.
    #[arg(short, long, env = "FRAMEGATE_SCORES")]
    pub scores: Option<PathBuf>,

    /// Directory forwarded frames are copied to.
    #[arg(short, long, env = "FRAMEGATE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (default: platform config path).
    #[arg(long, env = "FRAMEGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Trailing window in seconds (0 disables buffering).
    #[arg(short, long, value_parser = parse_window_seconds, env = "FRAMEGATE_WINDOW_SECONDS")]
    pub window_seconds: Option<u32>,

    /// Classification threshold as LABEL=SCORE (`*` matches any label).
    #[arg(long = "classification", value_parser = parse_threshold)]
    pub classifications: Vec<(String, f64)>,

    /// Object detection threshold as LABEL=SCORE (`*` matches any label).
    #[arg(long = "object", value_parser = parse_threshold)]
    pub objects: Vec<(String, f64)>,

    /// Pull frames one at a time instead of in batches.
    #[arg(long)]
    pub stream: bool,

    /// Pull without filtering, as a non-capture consumer would.
    #[arg(long)]
    pub passthrough: bool,

    /// Frames per batch pull.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..), env = "FRAMEGATE_BATCH_SIZE")]
    pub batch_size: Option<u64>,

    /// Simulated milliseconds between pulls.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_FRAME_INTERVAL_MS), env = "FRAMEGATE_FRAME_INTERVAL_MS")]
    pub frame_interval_ms: Option<u64>,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay_flags() {
        let cli = Cli::try_parse_from([
            "framegate",
            "frames",
            "--scores",
            "scores.json",
            "--classification",
            "person=0.8",
            "--object",
            "*=0.5",
            "--object",
            "dog=0.6",
            "-w",
            "10",
            "--stream",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("frames")));
        assert_eq!(cli.replay.scores, Some(PathBuf::from("scores.json")));
        assert_eq!(
            cli.replay.classifications,
            vec![("person".to_string(), 0.8)]
        );
        assert_eq!(cli.replay.objects.len(), 2);
        assert_eq!(cli.replay.window_seconds, Some(10));
        assert!(cli.replay.stream);
        assert!(!cli.replay.passthrough);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = Cli::try_parse_from(["framegate", "frames", "--batch-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_interval_range() {
        let cli = Cli::try_parse_from(["framegate", "frames", "--frame-interval-ms", "86400000"])
            .unwrap();
        assert_eq!(cli.replay.frame_interval_ms, Some(MAX_FRAME_INTERVAL_MS));

        let result = Cli::try_parse_from([
            "framegate",
            "frames",
            "--frame-interval-ms",
            "9000000000000000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["framegate", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Check
            })
        ));
    }

    #[test]
    fn test_malformed_threshold_rejected() {
        let result = Cli::try_parse_from(["framegate", "frames", "--object", "dog"]);
        assert!(result.is_err());
    }
}
