use super::copy_relative;
use crate::config::{AuxiliaryKind, AuxiliaryPath, Config};
use crate::core::{MinifyError, MinifyResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Creates or empties the output directory and lays down the parts of the
/// project that do not depend on the retained classes.
pub struct OutputPreparer {
    input: PathBuf,
    output: PathBuf,
    skeleton: Vec<String>,
    auxiliary: Vec<AuxiliaryPath>,
}

impl OutputPreparer {
    pub fn new(input: &Path, output: &Path, config: &Config) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            skeleton: config.skeleton.clone(),
            auxiliary: config.auxiliary.clone(),
        }
    }

    /// Clean the output, recreate the skeleton and copy auxiliary paths
    pub fn prepare(&self) -> MinifyResult<()> {
        self.clean()?;
        self.create_skeleton()?;
        self.copy_auxiliary()
    }

    /// Create the output directory, or delete everything inside it
    pub fn clean(&self) -> MinifyResult<()> {
        let entries = match fs::read_dir(&self.output) {
            Ok(entries) => entries,
            Err(_) => {
                tracing::info!("Creating output dir...");
                fs::create_dir_all(&self.output).map_err(|e| {
                    MinifyError::Output(format!(
                        "Failed to create output directory: {}\n{}",
                        self.output.display(),
                        e
                    ))
                })?;
                return Ok(());
            }
        };

        let entries: Vec<_> = entries.collect::<Result<_, _>>()?;
        if entries.is_empty() {
            return Ok(());
        }

        tracing::info!("Cleaning output dir...");
        for entry in entries {
            let name = entry.file_name();
            if name == "." || name == ".." {
                continue;
            }

            let path = entry.path();
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path).map_err(|e| {
                    MinifyError::Output(format!(
                        "Failed to delete directory: {}\n{}",
                        path.display(),
                        e
                    ))
                })?;
            } else {
                fs::remove_file(&path).map_err(|e| {
                    MinifyError::Output(format!("Failed to delete file: {}\n{}", path.display(), e))
                })?;
            }
        }

        Ok(())
    }

    fn create_skeleton(&self) -> MinifyResult<()> {
        for dir in &self.skeleton {
            let path = self.output.join(dir);
            fs::create_dir_all(&path).map_err(|e| {
                MinifyError::Output(format!(
                    "Failed to create directory: {}\n{}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    fn copy_auxiliary(&self) -> MinifyResult<()> {
        for aux in &self.auxiliary {
            let source = self.input.join(&aux.path);
            if !source.exists() {
                tracing::info!("Missing: {}", source.display());
                continue;
            }

            match (aux.kind, source.is_dir()) {
                (AuxiliaryKind::Directory, true) => self.copy_tree(&source)?,
                (AuxiliaryKind::File, false) => {
                    copy_relative(&self.input, &self.output, &source)?;
                }
                (kind, _) => {
                    tracing::warn!(
                        "Skipping {}: expected a {}",
                        source.display(),
                        kind.describe()
                    );
                }
            }
        }
        Ok(())
    }

    fn copy_tree(&self, dir: &Path) -> MinifyResult<()> {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file() {
                copy_relative(&self.input, &self.output, entry.path())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn listing(dir: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<_> = WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .map(|e| e.unwrap().path().strip_prefix(dir).unwrap().to_path_buf())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_prepare_empty_output_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();

        let preparer = OutputPreparer::new(&input, &output, &Config::default());
        preparer.prepare().unwrap();
        let first = listing(&output);
        preparer.prepare().unwrap();

        assert_eq!(first, listing(&output));
        assert!(output.join("src/main/java").is_dir());
        assert!(output.join("src/main/resources").is_dir());
    }

    #[test]
    fn test_prepare_creates_missing_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("does/not/exist");
        fs::create_dir_all(&input).unwrap();

        OutputPreparer::new(&input, &output, &Config::default())
            .prepare()
            .unwrap();
        assert!(output.join("src/main/java").is_dir());
    }

    #[test]
    fn test_prepare_removes_previous_content() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(output.join("old/nested")).unwrap();
        fs::write(output.join("old/nested/file.txt"), "x").unwrap();
        fs::write(output.join("stale.txt"), "x").unwrap();

        OutputPreparer::new(&input, &output, &Config::default())
            .prepare()
            .unwrap();

        assert!(!output.join("old").exists());
        assert!(!output.join("stale.txt").exists());
    }

    #[test]
    fn test_auxiliary_paths_are_copied() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");
        fs::create_dir_all(input.join("src/main/assembly/sub")).unwrap();
        fs::write(input.join("src/main/assembly/bin.xml"), "<assembly/>").unwrap();
        fs::write(input.join("src/main/assembly/sub/extra.xml"), "<x/>").unwrap();
        fs::write(input.join("pom.xml"), "<project/>").unwrap();
        fs::create_dir_all(&output).unwrap();

        OutputPreparer::new(&input, &output, &Config::default())
            .prepare()
            .unwrap();

        assert_eq!(
            fs::read_to_string(output.join("src/main/assembly/bin.xml")).unwrap(),
            "<assembly/>"
        );
        assert!(output.join("src/main/assembly/sub/extra.xml").exists());
        assert_eq!(fs::read_to_string(output.join("pom.xml")).unwrap(), "<project/>");
        // latex and scripts are absent in the input and simply skipped
        assert!(!output.join("src/main/latex").exists());
    }

    #[test]
    fn test_auxiliary_kind_mismatch_is_skipped() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");
        // a file where a directory is expected, and the reverse
        fs::create_dir_all(input.join("src/main")).unwrap();
        fs::write(input.join("src/main/scripts"), "not a dir").unwrap();
        fs::create_dir_all(input.join("pom.xml")).unwrap();
        fs::write(input.join("pom.xml/inner.txt"), "x").unwrap();
        fs::create_dir_all(&output).unwrap();

        OutputPreparer::new(&input, &output, &Config::default())
            .prepare()
            .unwrap();

        assert!(!output.join("src/main/scripts").exists());
        assert!(!output.join("pom.xml").exists());
    }
}
