use super::PropertiesDocument;
use crate::analyzer::RetainedClasses;
use crate::config::PropertyFileRule;
use crate::core::path::{resource_root, source_root};
use crate::core::MinifyResult;
use std::path::{Path, PathBuf};

/// Keys dropped from one property file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub path: PathBuf,
    pub removed: Vec<String>,
}

/// Prunes class-keyed property files in the output project so they no longer
/// reference classes that were not retained.
///
/// Rule paths are package-relative and looked up below both the Java source
/// root and the resource root of the output project.
pub struct PropertyPatcher {
    roots: Vec<PathBuf>,
    rules: Vec<PropertyFileRule>,
}

impl PropertyPatcher {
    pub fn new(output: &Path, rules: &[PropertyFileRule]) -> Self {
        Self {
            roots: vec![source_root(output), resource_root(output)],
            rules: rules.to_vec(),
        }
    }

    /// Apply every rule; files that do not exist are skipped
    pub fn patch(&self, classes: &RetainedClasses) -> MinifyResult<Vec<PatchOutcome>> {
        let mut outcomes = Vec::new();
        for rule in &self.rules {
            for root in &self.roots {
                let path = root.join(&rule.path);
                if let Some(outcome) = patch_file(&path, rule.strip_array_suffix, classes)? {
                    outcomes.push(outcome);
                }
            }
        }
        Ok(outcomes)
    }
}

/// Class name a property key refers to
pub fn normalize_key(key: &str, strip_array_suffix: bool) -> &str {
    let key = key.trim();
    if strip_array_suffix {
        key.strip_suffix("[]").unwrap_or(key)
    } else {
        key
    }
}

/// Remove keys of `path` whose class is not retained.
///
/// Returns `None` when the file does not exist. The file is only rewritten
/// when at least one key was removed.
pub fn patch_file(
    path: &Path,
    strip_array_suffix: bool,
    classes: &RetainedClasses,
) -> MinifyResult<Option<PatchOutcome>> {
    if !path.exists() {
        tracing::debug!("Skipping missing property file {}", path.display());
        return Ok(None);
    }

    let mut document = PropertiesDocument::load(path)?;
    let removed =
        document.remove_where(|key| !classes.contains(normalize_key(key, strip_array_suffix)));

    if !removed.is_empty() {
        tracing::info!(
            file = %path.display(),
            removed = removed.len(),
            "Pruned property keys"
        );
        document.save(path)?;
    }

    Ok(Some(PatchOutcome {
        path: path.to_path_buf(),
        removed,
    }))
}
