use crate::core::{MinifyError, MinifyResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of an external process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `-1` when the process was terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Describe a failed run: exit code, then stderr and stdout when non-empty
    pub fn failure_report(&self) -> String {
        let mut report = format!("\nExit code: {}", self.exit_code);
        if !self.stderr.is_empty() {
            report.push_str("\nStderr:\n");
            report.push_str(&self.stderr);
        }
        if !self.stdout.is_empty() {
            report.push_str("\nStdout:\n");
            report.push_str(&self.stdout);
        }
        report
    }
}

/// Resolve a program name the way the shell would.
///
/// Names containing a path separator are taken as-is.
pub fn locate_program(program: &str) -> MinifyResult<PathBuf> {
    if Path::new(program).components().count() > 1 {
        return Ok(PathBuf::from(program));
    }
    which::which(program)
        .map_err(|_| MinifyError::Process(format!("Program '{}' not found on PATH", program)))
}

/// Render a command line for messages
pub fn display_command(command: &[String]) -> String {
    command.join(" ")
}

/// Run `command` in `cwd`, blocking until it exits, with stdout and stderr
/// captured separately.
///
/// The first element is the program, the rest are its arguments. A non-zero
/// exit is not an error here; callers decide via [`ProcessOutput::success`].
pub fn run_captured(command: &[String], cwd: &Path) -> MinifyResult<ProcessOutput> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| MinifyError::Config("Empty command".to_string()))?;

    let program_path = locate_program(program)?;

    tracing::debug!(
        command = %display_command(command),
        cwd = %cwd.display(),
        "Running external command"
    );

    let output = Command::new(&program_path)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| {
            MinifyError::Process(format!(
                "Failed to execute: {}\n{}",
                display_command(command),
                e
            ))
        })?;

    Ok(ProcessOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_failure_report_layout() {
        let output = ProcessOutput {
            exit_code: 1,
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert_eq!(output.failure_report(), "\nExit code: 1\nStderr:\nerr\nStdout:\nout");

        let quiet = ProcessOutput {
            exit_code: 3,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(quiet.failure_report(), "\nExit code: 3");
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(run_captured(&[], temp.path()).is_err());
    }

    #[test]
    fn test_missing_program() {
        let temp = TempDir::new().unwrap();
        let err = run_captured(&cmd(&["definitely-not-a-real-program-xyz"]), temp.path())
            .unwrap_err();
        assert!(err.to_string().contains("not found on PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_streams_and_cwd() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();

        let output = run_captured(
            &cmd(&["sh", "-c", "ls; echo oops >&2; exit 3"]),
            temp.path(),
        )
        .unwrap();

        assert!(!output.success());
        assert_eq!(output.exit_code, 3);
        assert!(output.stdout.contains("marker.txt"));
        assert_eq!(output.stderr.trim(), "oops");
    }
}
