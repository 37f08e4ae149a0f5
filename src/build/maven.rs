use crate::core::{MinifyError, MinifyResult};
use minify_core::process::runner::{display_command, run_captured};
use std::path::Path;

/// Builds a project directory with an external build tool
pub trait ProjectBuilder {
    /// Build the project rooted at `project_dir`.
    ///
    /// Blocks until the build finishes. A failed build is reported as
    /// [`MinifyError::Build`] carrying the exit code and captured output.
    fn build(&self, project_dir: &Path) -> MinifyResult<()>;
}

/// Runs Maven (or any configured command) inside the project directory
pub struct MavenBuilder {
    command: Vec<String>,
}

impl MavenBuilder {
    /// Create a builder for the given command line
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }
}

impl Default for MavenBuilder {
    fn default() -> Self {
        Self::new(crate::config::Config::default().build_command)
    }
}

impl ProjectBuilder for MavenBuilder {
    fn build(&self, project_dir: &Path) -> MinifyResult<()> {
        tracing::info!(
            dir = %project_dir.display(),
            command = %display_command(&self.command),
            "Building"
        );

        let output = run_captured(&self.command, project_dir)
            .map_err(|e| MinifyError::Build(e.to_string()))?;

        if !output.success() {
            return Err(MinifyError::Build(output.failure_report()));
        }

        tracing::debug!(dir = %project_dir.display(), "Build succeeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn builder(parts: &[&str]) -> MavenBuilder {
        MavenBuilder::new(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_default_command_is_maven() {
        let builder = MavenBuilder::default();
        assert_eq!(builder.command()[0], "mvn");
        assert!(builder.command().contains(&"-DskipTests=True".to_string()));
    }

    #[test]
    fn test_missing_build_tool() {
        let temp = TempDir::new().unwrap();
        let err = builder(&["no-such-build-tool-xyz"]).build(temp.path()).unwrap_err();
        assert!(matches!(err, MinifyError::Build(_)));
        assert!(err.to_string().contains("not found on PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_build_reports_exit_code_and_streams() {
        let temp = TempDir::new().unwrap();
        let err = builder(&["sh", "-c", "echo compiling; echo broken >&2; exit 1"])
            .build(temp.path())
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Exit code: 1"));
        assert!(message.contains("Stderr:\nbroken"));
        assert!(message.contains("Stdout:\ncompiling"));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_build_runs_in_project_dir() {
        let temp = TempDir::new().unwrap();
        builder(&["sh", "-c", "touch built.marker"])
            .build(temp.path())
            .unwrap();
        assert!(temp.path().join("built.marker").exists());
    }
}
