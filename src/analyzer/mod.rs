pub mod mindeps;

pub use mindeps::MinDepsAnalyzer;

use crate::classpath::Classpath;
use crate::core::{MinifyError, MinifyResult};
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;

/// Everything the dependency analyzer needs for one run
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub java_home: PathBuf,
    pub classpath: Classpath,
    /// Package prefixes whose classes may be retained
    pub packages: Vec<String>,
    /// Seed classes, one per line
    pub classes_file: PathBuf,
    /// Classes to include regardless of reachability, one per line
    pub additional_file: Option<PathBuf>,
}

/// Computes the closure of classes the seeds depend on
pub trait DependencyAnalyzer {
    fn retained_classes(&self, request: &AnalysisRequest) -> MinifyResult<RetainedClasses>;
}

/// Fully qualified names of the classes to keep.
///
/// Keeps first-seen order for stable copying and logging; lookups are O(1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetainedClasses {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl RetainedClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class name; returns false if it was already present
    pub fn insert(&mut self, class_name: impl Into<String>) -> bool {
        let class_name = class_name.into();
        if self.index.contains(&class_name) {
            return false;
        }
        self.index.insert(class_name.clone());
        self.ordered.push(class_name);
        true
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.index.contains(class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Parse a class list: one name per line, blank lines and `#` comments
    /// ignored. Lines that are not class names are logged and dropped.
    pub fn parse(content: &str) -> MinifyResult<Self> {
        let pattern = Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*(\.[\p{L}_$][\p{L}\p{N}_$]*)*$")
            .map_err(|e| MinifyError::Analyzer(format!("Invalid regex pattern: {}", e)))?;

        let mut classes = Self::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if !pattern.is_match(line) {
                tracing::warn!(line, "Ignoring line that is not a class name");
                continue;
            }
            classes.insert(line);
        }
        Ok(classes)
    }
}

impl<S: Into<String>> FromIterator<S> for RetainedClasses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut classes = Self::new();
        for class_name in iter {
            classes.insert(class_name);
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_blanks_and_duplicates() {
        let classes = RetainedClasses::parse(
            "# seeds\nmeka.core.Main\n\n  meka.core.Helper  \nmeka.core.Main\nmeka.core.Outer$Inner\n",
        )
        .unwrap();
        let names: Vec<_> = classes.iter().collect();
        assert_eq!(
            names,
            vec!["meka.core.Main", "meka.core.Helper", "meka.core.Outer$Inner"]
        );
    }

    #[test]
    fn test_parse_drops_noise() {
        let classes = RetainedClasses::parse("Processing 3 classes...\np.Main\n").unwrap();
        assert_eq!(classes.len(), 1);
        assert!(classes.contains("p.Main"));
    }

    #[test]
    fn test_collect_preserves_order() {
        let classes: RetainedClasses = vec!["b.B", "a.A", "b.B"].into_iter().collect();
        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["b.B", "a.A"]);
        assert!(!classes.contains("c.C"));
    }
}
