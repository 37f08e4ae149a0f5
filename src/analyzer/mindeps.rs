use super::{AnalysisRequest, DependencyAnalyzer, RetainedClasses};
use crate::core::{MinifyError, MinifyResult};
use minify_core::process::runner::run_captured;
use std::fs;
use std::path::Path;

/// Runs the deps4j `MinDeps` tool as a subprocess.
///
/// The configured command prefix is followed by the analyzer options and the
/// packages; the result is read back from a temporary `--output` file.
pub struct MinDepsAnalyzer {
    command: Vec<String>,
}

impl MinDepsAnalyzer {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Full command line for a request, writing results to `output`
    pub fn command_line(
        &self,
        request: &AnalysisRequest,
        output: &Path,
    ) -> MinifyResult<Vec<String>> {
        let classpath = request.classpath.to_os_string()?;

        let mut command = self.command.clone();
        command.push("--java-home".to_string());
        command.push(path_arg(&request.java_home));
        command.push("--class-path".to_string());
        command.push(classpath.to_string_lossy().into_owned());
        command.push("--classes".to_string());
        command.push(path_arg(&request.classes_file));
        if let Some(additional) = &request.additional_file {
            command.push("--additional".to_string());
            command.push(path_arg(additional));
        }
        command.push("--output".to_string());
        command.push(path_arg(output));
        command.extend(request.packages.iter().cloned());

        Ok(command)
    }
}

impl DependencyAnalyzer for MinDepsAnalyzer {
    fn retained_classes(&self, request: &AnalysisRequest) -> MinifyResult<RetainedClasses> {
        let output_file = tempfile::Builder::new()
            .prefix("minify-deps")
            .suffix(".txt")
            .tempfile()?;
        let command = self.command_line(request, output_file.path())?;
        let cwd = std::env::current_dir()?;

        let result =
            run_captured(&command, &cwd).map_err(|e| MinifyError::Analyzer(e.to_string()))?;
        if !result.success() {
            return Err(MinifyError::Analyzer(result.failure_report()));
        }

        let content = fs::read_to_string(output_file.path()).map_err(|e| {
            MinifyError::Analyzer(format!(
                "Failed to read analyzer output {}: {}",
                output_file.path().display(),
                e
            ))
        })?;

        let classes = RetainedClasses::parse(&content)?;
        tracing::info!(count = classes.len(), "Analyzer returned retained classes");
        Ok(classes)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
