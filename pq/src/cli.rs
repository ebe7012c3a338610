//! CLI argument parsing for pacedqueue

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pq")]
#[command(author, version, long_about = None)]
#[command(about = "Run commands one at a time with a minimum spacing between starts")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run shell commands through a paced queue
    Run {
        /// Commands to run; read one per line from stdin when omitted
        commands: Vec<String>,

        /// Minimum interval between command starts in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Shell used to run each command
        #[arg(short, long)]
        shell: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from(["pq", "run", "--interval-ms", "200", "echo a", "echo b"]);
        match cli.command {
            Command::Run {
                commands,
                interval_ms,
                shell,
            } => {
                assert_eq!(commands, vec!["echo a", "echo b"]);
                assert_eq!(interval_ms, Some(200));
                assert!(shell.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["pq", "--config", "pq.yml", "--log-level", "debug", "config"]);
        assert_eq!(cli.config, Some(PathBuf::from("pq.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Config));
    }

    #[test]
    fn test_run_without_commands() {
        let cli = Cli::parse_from(["pq", "run"]);
        assert!(matches!(cli.command, Command::Run { ref commands, .. } if commands.is_empty()));
    }
}
