//! Writing the minified project: preparing the output tree and copying
//! retained sources into it.

pub mod copier;
pub mod preparer;

pub use copier::{CopyReport, Copier};
pub use preparer::OutputPreparer;

use crate::core::{MinifyError, MinifyResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy `file` from below `input_root` to the same relative path below
/// `output_root`, creating parent directories.
///
/// Returns the destination, or `None` (after logging) when `file` does not
/// exist.
pub(crate) fn copy_relative(
    input_root: &Path,
    output_root: &Path,
    file: &Path,
) -> MinifyResult<Option<PathBuf>> {
    if !file.exists() {
        tracing::warn!("Missing: {}", file.display());
        return Ok(None);
    }

    let relative = pathdiff::diff_paths(file, input_root).ok_or_else(|| {
        MinifyError::Output(format!(
            "Cannot express {} relative to {}",
            file.display(),
            input_root.display()
        ))
    })?;
    let dest = output_root.join(relative);

    let copy = || -> std::io::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(file, &dest)?;
        Ok(())
    };
    copy().map_err(|e| {
        MinifyError::Output(format!(
            "Failed to copy file: {} -> {}\n{}",
            file.display(),
            dest.display(),
            e
        ))
    })?;

    Ok(Some(dest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_relative_creates_parents() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");
        let file = input.join("a/b/c.txt");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "content").unwrap();

        let dest = copy_relative(&input, &output, &file).unwrap().unwrap();
        assert_eq!(dest, output.join("a/b/c.txt"));
        assert_eq!(fs::read_to_string(dest).unwrap(), "content");
    }

    #[test]
    fn test_copy_relative_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = copy_relative(temp.path(), temp.path(), &temp.path().join("nope")).unwrap();
        assert!(result.is_none());
    }
}
