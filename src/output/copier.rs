use super::copy_relative;
use crate::analyzer::RetainedClasses;
use crate::core::path::{class_to_relative_source, source_dir_to_resource_dir, source_root};
use crate::core::MinifyResult;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// What the copier did, for the run summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Destination paths of copied source files
    pub sources: Vec<PathBuf>,
    /// Retained classes without a local source file
    pub missing: Vec<String>,
    /// Destination paths of copied resource files
    pub resources: Vec<PathBuf>,
}

/// Copies the sources of retained classes, plus the resources living next to
/// them, from the input project into the output project.
pub struct Copier {
    input: PathBuf,
    output: PathBuf,
}

impl Copier {
    pub fn new(input: &Path, output: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        }
    }

    /// Source file of a class in the input project
    pub fn class_to_file(&self, class_name: &str) -> PathBuf {
        source_root(&self.input).join(class_to_relative_source(class_name))
    }

    pub fn copy(&self, classes: &RetainedClasses) -> MinifyResult<CopyReport> {
        let mut report = CopyReport::default();
        let mut input_dirs: Vec<PathBuf> = Vec::new();
        let mut seen_dirs = HashSet::new();
        let mut seen_files = HashSet::new();

        for class_name in classes.iter() {
            let in_file = self.class_to_file(class_name);

            if let Some(dir) = in_file.parent() {
                if seen_dirs.insert(dir.to_path_buf()) {
                    input_dirs.push(dir.to_path_buf());
                }
            }

            // nested classes share their outer class's file
            if !seen_files.insert(in_file.clone()) {
                continue;
            }

            match copy_relative(&self.input, &self.output, &in_file)? {
                Some(dest) => report.sources.push(dest),
                None => report.missing.push(class_name.to_string()),
            }
        }

        tracing::info!("Copying resources...");
        for dir in &input_dirs {
            self.copy_resources(dir, &mut report)?;
        }

        tracing::info!(
            sources = report.sources.len(),
            resources = report.resources.len(),
            missing = report.missing.len(),
            "Copied retained classes"
        );
        Ok(report)
    }

    fn copy_resources(&self, source_dir: &Path, report: &mut CopyReport) -> MinifyResult<()> {
        let resource_dir = source_dir_to_resource_dir(&self.input, source_dir);
        let entries = match fs::read_dir(&resource_dir) {
            Ok(entries) => entries,
            Err(_) => {
                tracing::debug!("No resources in {}", resource_dir.display());
                return Ok(());
            }
        };

        tracing::debug!("- {}", resource_dir.display());
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if name == "." || name == ".." {
                continue;
            }
            if name.to_string_lossy().ends_with(".java") {
                continue;
            }
            if entry.file_type()?.is_dir() {
                continue;
            }
            files.push(entry.path());
        }
        files.sort();

        for file in files {
            if let Some(dest) = copy_relative(&self.input, &self.output, &file)? {
                report.resources.push(dest);
            }
        }
        Ok(())
    }
}
