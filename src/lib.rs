//! Framegate - filtered camera for data capture.
//!
//! Wraps a frame source so that data-capture consumers only receive frames
//! whose inference results clear configured thresholds, plus the frames
//! captured in a trailing window before each trigger.

#![warn(missing_docs)]

pub mod camera;
pub mod cli;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod inference;
pub mod output;
pub mod replay;
pub mod resource;

use chrono::TimeDelta;
use clap::{CommandFactory, Parser};
use cli::{Cli, Command, ConfigAction, ReplayArgs};
use config::{
    Config, config_file_path, load_config, resolve_config_path, save_default_config,
    validate_config,
};
use filter::Caller;
use replay::{PullMode, ReplaySettings};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the framegate CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.replay.verbose, cli.replay.quiet);

    if let Some(command) = cli.command {
        return handle_command(command, cli.replay.config.as_deref());
    }

    let Some(input) = cli.input else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = load_config(cli.replay.config.as_deref())?;
    let settings = build_settings(input, &cli.replay, config)?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;
    let summary = runtime.block_on(replay::replay(&settings))?;

    if summary.left_queued > 0 {
        warn!(
            "{} released batch(es) were never handed out",
            summary.left_queued
        );
    }

    Ok(())
}

/// Merge command-line overrides into the loaded configuration.
fn build_settings(input: PathBuf, args: &ReplayArgs, mut config: Config) -> Result<ReplaySettings> {
    if let Some(window_seconds) = args.window_seconds {
        config.filter.window_seconds = window_seconds;
    }
    for (label, min_score) in &args.classifications {
        config.filter.classifications.insert(label.clone(), *min_score);
    }
    for (label, min_score) in &args.objects {
        config.filter.objects.insert(label.clone(), *min_score);
    }
    if let Some(batch_size) = args.batch_size {
        config.replay.batch_size = usize::try_from(batch_size).unwrap_or(usize::MAX);
    }
    if let Some(frame_interval_ms) = args.frame_interval_ms {
        config.replay.frame_interval_ms = frame_interval_ms;
    }

    validate_config(&config)?;

    let scores = args.scores.clone().ok_or_else(|| Error::ConfigValidation {
        message: "no scores file specified (use --scores)".to_string(),
    })?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| input.join("forwarded"));

    let frame_interval = TimeDelta::milliseconds(
        i64::try_from(config.replay.frame_interval_ms).unwrap_or(i64::MAX),
    );

    Ok(ReplaySettings {
        input_dir: input,
        scores,
        output_dir,
        filter: config.filter,
        frame_interval,
        batch_size: config.replay.batch_size,
        mode: if args.stream {
            PullMode::Stream
        } else {
            PullMode::Batch
        },
        caller: if args.passthrough {
            Caller::Other
        } else {
            Caller::DataCapture
        },
        progress: !args.quiet && !args.no_progress,
    })
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, explicit_config: Option<&Path>) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, explicit_config),
    }
}

fn handle_config_command(action: ConfigAction, explicit_config: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  add thresholds under [filter.classifications] or [filter.objects]");
                println!("  framegate <frames-dir> --scores <scores.json>");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(explicit_config)?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = resolve_config_path(explicit_config)?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Check => {
            let config = load_config(explicit_config)?;
            validate_config(&config)?;
            info!(
                "Filtering '{}' with '{}': {} classification, {} object threshold(s)",
                config.filter.camera,
                config.filter.vision,
                config.filter.classifications.len(),
                config.filter.objects.len()
            );
            println!("Configuration OK");
            Ok(())
        }
    }
}
