//! pq - run commands through a paced queue
//!
//! CLI entry point: commands run one at a time, in order, with a minimum
//! interval between starts.

use std::io::BufRead;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use pacedqueue::PacedQueue;
use pacedqueue::cli::{Cli, Command};
use pacedqueue::config::Config;
use pacedqueue::runner::{report, submit_commands};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (WARN)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
                tracing::Level::WARN
            }
        },
        None => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to install tracing subscriber: {}", e))?;

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn read_commands_from_stdin() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut commands = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            commands.push(line.to_string());
        }
    }
    Ok(commands)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Run {
            commands,
            interval_ms,
            shell,
        } => {
            if let Some(interval_ms) = interval_ms {
                config.queue.interval_ms = interval_ms;
            }
            if let Some(shell) = shell {
                config.shell = shell;
            }
            let commands = if commands.is_empty() {
                read_commands_from_stdin()?
            } else {
                commands
            };
            cmd_run(&config, commands).await
        }
        Command::Config => {
            let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
            Ok(())
        }
    }
}

async fn cmd_run(config: &Config, commands: Vec<String>) -> Result<()> {
    if commands.is_empty() {
        println!("No commands to run");
        return Ok(());
    }

    let total = commands.len();
    info!(total, interval_ms = config.queue.interval_ms, shell = %config.shell, "cmd_run: starting");

    let queue = PacedQueue::with_config(&config.queue);
    let submitted = submit_commands(&queue, &config.shell, commands);
    let failures = report(submitted).await;
    queue.shutdown().await?;

    if failures > 0 {
        return Err(eyre::eyre!("{} of {} commands failed", failures, total));
    }
    println!("{} {} commands completed", "✓".green(), total);
    Ok(())
}
