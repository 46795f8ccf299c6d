//! Keyscribe - reconstruct typed sentences from keyboard recorder logs
//!
//! Run `keyscribe parse <log>` to write a result document next to the log.
//! Use `keyscribe config` to show the effective configuration.

use clap::Parser;
use keyscribe::config::{self, Config};
use keyscribe::error::OutputError;
use keyscribe::output::{ExportFormat, ResultWriter};
use keyscribe::{input, Cli, Commands};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    // Logs go to stderr so `--stdout` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("keyscribe={},warn", log_level))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = config::load_config(cli.config.as_deref())?;
    let config_path = cli.config.clone().or_else(Config::default_path);

    match cli.command {
        Commands::Parse {
            file,
            output_dir,
            format,
            stdout,
        } => {
            // Apply CLI overrides
            if let Some(dir) = output_dir {
                config.output.directory = dir.to_string_lossy().into_owned();
            }
            if let Some(format) = format {
                config.output.format =
                    ExportFormat::parse(&format).ok_or(OutputError::UnknownFormat(format))?;
            }

            parse_log(&config, &file, stdout)?;
        }

        Commands::Config { default: true } => {
            print!("{}", config::DEFAULT_CONFIG);
        }

        Commands::Config { default: false } => {
            show_config(&config, config_path.as_deref())?;
        }
    }

    Ok(())
}

/// Reconstruct a log and emit the result document
fn parse_log(config: &Config, path: &Path, stdout: bool) -> anyhow::Result<()> {
    let (result, stats) = input::reconstruct_log(path)?;

    tracing::info!(
        "Reconstructed {} sentence(s) from {} record(s) in {:?}",
        stats.lines_emitted,
        stats.records,
        path
    );
    tracing::debug!("Reconstruction stats: {:?}", stats);
    if stats.malformed_lines > 0 {
        tracing::info!("Skipped {} malformed line(s)", stats.malformed_lines);
    }
    if stats.unrecognized_tokens > 0 {
        tracing::warn!(
            "{} key label(s) were not recognized and were kept literally (run with -v to list them)",
            stats.unrecognized_tokens
        );
    }

    let writer = ResultWriter::new(&config.output);
    tracing::debug!("Rendering result as {}", writer.format());

    if stdout {
        let rendered = writer.render(&result)?;
        if rendered.ends_with('\n') {
            print!("{}", rendered);
        } else {
            println!("{}", rendered);
        }
    } else {
        let out_path = writer.write(&result, path)?;
        println!("Wrote parsed output to: {}", out_path.display());
    }

    Ok(())
}

/// Show current configuration as TOML
fn show_config(config: &Config, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) if path.exists() => println!("# Config file: {}", path.display()),
        Some(path) => println!(
            "# Config file: {} (not found, using defaults)",
            path.display()
        ),
        None => println!("# Config file: (no config directory)"),
    }
    println!();
    print!("{}", config::to_toml(config)?);

    Ok(())
}
