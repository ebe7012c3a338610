//! Shell command runner built on the paced queue
//!
//! Each command becomes one queued task that runs `<shell> -c <command>` and
//! captures its output. A non-zero exit is reported as that task's failure.

use chrono::{DateTime, Utc};
use colored::*;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::queue::{PacedQueue, TaskError, TaskHandle};

/// Errors from running a single command
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to spawn command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Command exited with {}: {}", exit_label(.code), .stderr)]
    Exit { code: Option<i32>, stderr: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub started_at: DateTime<Utc>,
}

/// A command submitted to the queue, paired with its outcome handle
pub struct SubmittedCommand {
    pub index: usize,
    pub command: String,
    pub handle: TaskHandle<CommandOutput, RunError>,
}

/// Submit every command to the queue up front
pub fn submit_commands(queue: &PacedQueue, shell: &str, commands: Vec<String>) -> Vec<SubmittedCommand> {
    debug!(%shell, count = commands.len(), "submit_commands: called");
    commands
        .into_iter()
        .enumerate()
        .map(|(index, command)| {
            let shell = shell.to_string();
            let line = command.clone();
            let handle = queue.submit(move || run_command(shell, line));
            SubmittedCommand {
                index: index + 1,
                command,
                handle,
            }
        })
        .collect()
}

async fn run_command(shell: String, command: String) -> Result<CommandOutput, RunError> {
    let started_at = Utc::now();
    info!(%command, "run_command: starting");
    let output = Command::new(&shell)
        .arg("-c")
        .arg(&command)
        .kill_on_drop(true)
        .output()
        .await?;

    if output.status.success() {
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            started_at,
        })
    } else {
        Err(RunError::Exit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        })
    }
}

/// Await each submitted command in order, printing results as they settle
///
/// Returns the number of commands that did not succeed.
pub async fn report(submitted: Vec<SubmittedCommand>) -> usize {
    let mut failures = 0;
    for SubmittedCommand { index, command, handle } in submitted {
        match handle.await {
            Ok(output) => {
                println!(
                    "{} [{}] {} {}",
                    "✓".green(),
                    index,
                    command.cyan(),
                    output.started_at.format("%H:%M:%S%.3f").to_string().dimmed()
                );
                print!("{}", output.stdout);
            }
            Err(e) => {
                failures += 1;
                let reason = match e {
                    TaskError::Failed(run_error) => run_error.to_string(),
                    other => other.to_string(),
                };
                println!("{} [{}] {} {}", "✗".red(), index, command.cyan(), reason.red());
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_successful_command_captures_stdout() {
        let queue = PacedQueue::new(Duration::ZERO);
        let mut submitted = submit_commands(&queue, "sh", vec!["echo hello".to_string()]);
        let cmd = submitted.remove(0);
        assert_eq!(cmd.index, 1);
        let output = cmd.handle.await.unwrap();
        assert_eq!(output.stdout, "hello\n");
    }

    #[tokio::test]
    async fn test_failing_command_reports_exit() {
        let queue = PacedQueue::new(Duration::ZERO);
        let mut submitted = submit_commands(&queue, "sh", vec!["echo bad >&2; exit 3".to_string()]);
        let err = submitted.remove(0).handle.await.unwrap_err();
        match err.into_failure() {
            Some(RunError::Exit { code, stderr }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "bad");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_error() {
        let queue = PacedQueue::new(Duration::ZERO);
        let mut submitted = submit_commands(&queue, "/nonexistent/shell", vec!["true".to_string()]);
        let err = submitted.remove(0).handle.await.unwrap_err();
        assert!(matches!(err.into_failure(), Some(RunError::Spawn(_))));
    }

    #[tokio::test]
    async fn test_report_counts_failures() {
        let queue = PacedQueue::new(Duration::ZERO);
        let submitted = submit_commands(
            &queue,
            "sh",
            vec!["true".to_string(), "false".to_string(), "true".to_string()],
        );
        assert_eq!(report(submitted).await, 1);
    }

    #[test]
    fn test_abandoned_command_is_killed() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let started = temp_dir.path().join("started");
        let finished = temp_dir.path().join("finished");
        let command = format!("touch '{}'; sleep 1; touch '{}'", started.display(), finished.display());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build runtime");
        let mut submitted = runtime.block_on(async {
            let queue = PacedQueue::new(Duration::ZERO);
            let submitted = submit_commands(&queue, "sh", vec![command]);
            while !started.exists() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            submitted
        });
        // Tearing down the runtime drops the worker mid-command
        drop(runtime);

        std::thread::sleep(Duration::from_millis(1500));
        assert!(!finished.exists(), "shell kept running after its task was abandoned");

        let handle = submitted.remove(0).handle;
        let outcome = futures::executor::block_on(handle);
        assert!(matches!(outcome, Err(TaskError::Abandoned)));
    }

    #[test]
    fn test_exit_display() {
        let err = RunError::Exit {
            code: Some(2),
            stderr: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Command exited with status 2: nope");
        let err = RunError::Exit {
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "Command exited with a signal: ");
    }
}
