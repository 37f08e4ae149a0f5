use crate::core::path::BUILD_DESCRIPTOR;
use crate::core::{MinifyError, MinifyResult};
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// Scope value that keeps a dependency off the analysis classpath
pub const TEST_SCOPE: &str = "test";

/// A single `<dependency>` declaration.
///
/// Every field is optional in the descriptor, so every field is optional here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    pub group: Option<String>,
    pub artifact: Option<String>,
    pub version: Option<String>,
    pub scope: Option<String>,
}

impl Dependency {
    /// Whether this dependency is only needed for tests
    pub fn is_test(&self) -> bool {
        self.scope.as_deref() == Some(TEST_SCOPE)
    }

    /// Group, artifact and version, if all three are declared
    pub fn coordinates(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.group.as_deref()?,
            self.artifact.as_deref()?,
            self.version.as_deref()?,
        ))
    }

    /// Path of this dependency's jar inside a local Maven repository.
    ///
    /// `<repo>/<group as dirs>/<artifact>/<version>/<artifact>-<version>.jar`
    pub fn jar_path(&self, repository: &Path) -> Option<PathBuf> {
        let (group, artifact, version) = self.coordinates()?;
        let mut path = repository.to_path_buf();
        for part in group.split('.') {
            path.push(part);
        }
        path.push(artifact);
        path.push(version);
        path.push(format!("{}-{}.jar", artifact, version));
        Some(path)
    }

    fn from_node(node: Node) -> Self {
        Self {
            group: child_text(node, "groupId"),
            artifact: child_text(node, "artifactId"),
            version: child_text(node, "version"),
            scope: child_text(node, "scope"),
        }
    }
}

/// The parts of a `pom.xml` the minifier needs: its dependency declarations.
#[derive(Debug, Clone, Default)]
pub struct BuildDescriptor {
    /// Every `<dependency>` element in document order, wherever it appears
    pub dependencies: Vec<Dependency>,
}

impl BuildDescriptor {
    /// Load `pom.xml` from a project directory
    pub fn load(project_root: &Path) -> MinifyResult<Self> {
        let path = project_root.join(BUILD_DESCRIPTOR);
        Self::load_file(&path)
    }

    /// Load a descriptor from an explicit file
    pub fn load_file(path: &Path) -> MinifyResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MinifyError::Descriptor(format!("Failed to read/parse: {}\n{}", path.display(), e))
        })?;

        Self::parse(&content).map_err(|e| {
            MinifyError::Descriptor(format!("Failed to read/parse: {}\n{}", path.display(), e))
        })
    }

    /// Parse descriptor content.
    ///
    /// Parsing is non-validating: DTDs are tolerated and namespaces are ignored
    /// by matching element local names only.
    pub fn parse(content: &str) -> Result<Self, roxmltree::Error> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(content, options)?;

        let dependencies = doc
            .descendants()
            .filter(|node| is_element(*node, "dependency"))
            .map(Dependency::from_node)
            .collect();

        Ok(Self { dependencies })
    }

    /// Dependencies that belong on the analysis classpath, in document order
    pub fn runtime_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|dep| !dep.is_test())
    }
}

fn is_element(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Text of the first direct child element called `name`.
fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|child| is_element(*child, name))
        .map(|child| {
            child
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect::<String>()
                .trim()
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>net.sf.meka</groupId>
  <artifactId>meka</artifactId>
  <dependencies>
    <dependency>
      <groupId>nz.ac.waikato.cms.weka</groupId>
      <artifactId>weka-stable</artifactId>
      <version>3.8.1</version>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.12</version>
      <scope>test</scope>
    </dependency>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>no-version</artifactId>
      <scope>compile</scope>
    </dependency>
  </dependencies>
</project>
"#;

    #[test]
    fn test_parse_dependencies_in_order() {
        let descriptor = BuildDescriptor::parse(POM).unwrap();
        assert_eq!(descriptor.dependencies.len(), 3);

        let weka = &descriptor.dependencies[0];
        assert_eq!(weka.group.as_deref(), Some("nz.ac.waikato.cms.weka"));
        assert_eq!(weka.artifact.as_deref(), Some("weka-stable"));
        assert_eq!(weka.version.as_deref(), Some("3.8.1"));
        assert_eq!(weka.scope, None);
        assert!(!weka.is_test());

        assert!(descriptor.dependencies[1].is_test());
        assert_eq!(descriptor.dependencies[2].coordinates(), None);
    }

    #[test]
    fn test_runtime_dependencies_skip_test_scope() {
        let descriptor = BuildDescriptor::parse(POM).unwrap();
        let artifacts: Vec<_> = descriptor
            .runtime_dependencies()
            .map(|d| d.artifact.clone().unwrap())
            .collect();
        assert_eq!(artifacts, vec!["weka-stable", "no-version"]);
    }

    #[test]
    fn test_jar_path() {
        let dep = Dependency {
            group: Some("org.example".to_string()),
            artifact: Some("lib".to_string()),
            version: Some("1.0".to_string()),
            scope: None,
        };
        let path = dep.jar_path(Path::new("/repo")).unwrap();
        assert_eq!(path, PathBuf::from("/repo/org/example/lib/1.0/lib-1.0.jar"));
    }

    #[test]
    fn test_nested_dependency_management_is_included() {
        let pom = r#"<project>
  <dependencyManagement><dependencies>
    <dependency><groupId>g</groupId><artifactId>managed</artifactId><version>2</version></dependency>
  </dependencies></dependencyManagement>
</project>"#;
        let descriptor = BuildDescriptor::parse(pom).unwrap();
        assert_eq!(descriptor.dependencies.len(), 1);
        assert_eq!(descriptor.dependencies[0].artifact.as_deref(), Some("managed"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = BuildDescriptor::load(temp.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read/parse: "));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("pom.xml"), "<project><dependencies>").unwrap();
        let err = BuildDescriptor::load(temp.path()).unwrap_err();
        assert!(matches!(err, MinifyError::Descriptor(_)));
        assert!(err.to_string().contains("pom.xml"));
    }
}
