//! Classpath assembly for the dependency analyzer.
//!
//! The classpath is the project's own snapshot jar followed by the jar of
//! every non-test dependency in `pom.xml`, resolved against the local Maven
//! repository.

use crate::core::path::TARGET_DIR;
use crate::core::{BuildDescriptor, MinifyError, MinifyResult};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix identifying the project's own build artifact in `target/`
pub const PROJECT_JAR_SUFFIX: &str = "-SNAPSHOT.jar";

#[cfg(windows)]
const PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_SEPARATOR: char = ':';

/// Ordered jar paths, project artifact first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Entries joined with the platform path separator
    pub fn to_os_string(&self) -> MinifyResult<OsString> {
        std::env::join_paths(&self.entries)
            .map_err(|e| MinifyError::Classpath(format!("Invalid classpath entry: {}", e)))
    }
}

impl fmt::Display for Classpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", entry.display())?;
        }
        Ok(())
    }
}

/// Resolves descriptor dependencies against a local Maven repository
pub struct ClasspathAssembler {
    repository: PathBuf,
}

impl ClasspathAssembler {
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    /// Build the analysis classpath for the project at `project_root`.
    ///
    /// Fails on the first dependency jar missing from the repository and when
    /// the project has no snapshot jar; a partial classpath is never returned.
    pub fn assemble(
        &self,
        descriptor: &BuildDescriptor,
        project_root: &Path,
    ) -> MinifyResult<Classpath> {
        let dependencies = self.dependency_jars(descriptor)?;

        let mut entries = vec![find_project_jar(project_root)?];
        entries.extend(dependencies);

        let classpath = Classpath::new(entries);
        tracing::info!("Classpath:\n{}", classpath);
        Ok(classpath)
    }

    /// Jar paths of all non-test dependencies, in descriptor order.
    ///
    /// Declarations lacking group, artifact or version are skipped.
    pub fn dependency_jars(&self, descriptor: &BuildDescriptor) -> MinifyResult<Vec<PathBuf>> {
        let mut jars = Vec::new();

        for dependency in descriptor.runtime_dependencies() {
            let Some(jar) = dependency.jar_path(&self.repository) else {
                tracing::warn!(
                    group = ?dependency.group,
                    artifact = ?dependency.artifact,
                    version = ?dependency.version,
                    "Skipping dependency without full coordinates"
                );
                continue;
            };

            if !jar.exists() {
                return Err(MinifyError::Classpath(format!(
                    "Failed to determine 'dependency' tags to build classpath!\nFile not found: {}",
                    jar.display()
                )));
            }

            tracing::debug!(jar = %jar.display(), "Resolved dependency");
            jars.push(jar);
        }

        Ok(jars)
    }
}

/// Locate the project's `*-SNAPSHOT.jar` in its `target` directory.
///
/// When several match, the first by file name wins.
pub fn find_project_jar(project_root: &Path) -> MinifyResult<PathBuf> {
    let target = project_root.join(TARGET_DIR);
    let not_found = || {
        MinifyError::Classpath(format!(
            "Project jar not found in directory: {}",
            target.display()
        ))
    };

    let entries = fs::read_dir(&target).map_err(|_| not_found())?;

    let mut jars: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with(PROJECT_JAR_SUFFIX))
                .unwrap_or(false)
        })
        .collect();
    jars.sort();

    jars.into_iter().next().ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POM: &str = r#"<project>
  <dependencies>
    <dependency><groupId>g</groupId><artifactId>a</artifactId><version>1.0</version></dependency>
    <dependency><groupId>junit</groupId><artifactId>junit</artifactId><version>4.12</version><scope>test</scope></dependency>
    <dependency><groupId>org.x</groupId><artifactId>b</artifactId><version>2.1</version><scope>compile</scope></dependency>
  </dependencies>
</project>"#;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"jar").unwrap();
    }

    fn setup(temp: &TempDir) -> (PathBuf, PathBuf) {
        let repo = temp.path().join("repo");
        let project = temp.path().join("project");
        touch(&repo.join("g/a/1.0/a-1.0.jar"));
        touch(&repo.join("org/x/b/2.1/b-2.1.jar"));
        touch(&project.join("target/proj-1.0-SNAPSHOT.jar"));
        fs::create_dir_all(project.join("target/classes")).unwrap();
        (repo, project)
    }

    #[test]
    fn test_test_scope_is_excluded() {
        let temp = TempDir::new().unwrap();
        let (repo, project) = setup(&temp);
        let descriptor = BuildDescriptor::parse(POM).unwrap();

        let classpath = ClasspathAssembler::new(&repo)
            .assemble(&descriptor, &project)
            .unwrap();

        assert_eq!(
            classpath.entries(),
            &[
                project.join("target/proj-1.0-SNAPSHOT.jar"),
                repo.join("g/a/1.0/a-1.0.jar"),
                repo.join("org/x/b/2.1/b-2.1.jar"),
            ]
        );
    }

    #[test]
    fn test_missing_dependency_jar_is_fatal() {
        let temp = TempDir::new().unwrap();
        let (repo, project) = setup(&temp);
        fs::remove_file(repo.join("org/x/b/2.1/b-2.1.jar")).unwrap();
        let descriptor = BuildDescriptor::parse(POM).unwrap();

        let err = ClasspathAssembler::new(&repo)
            .assemble(&descriptor, &project)
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("File not found"));
        assert!(message.contains("b-2.1.jar"));
    }

    #[test]
    fn test_incomplete_coordinates_are_skipped() {
        let temp = TempDir::new().unwrap();
        let (repo, _) = setup(&temp);
        let descriptor = BuildDescriptor::parse(
            "<project><dependencies><dependency><artifactId>lonely</artifactId></dependency></dependencies></project>",
        )
        .unwrap();

        let jars = ClasspathAssembler::new(&repo)
            .dependency_jars(&descriptor)
            .unwrap();
        assert!(jars.is_empty());
    }

    #[test]
    fn test_project_jar_missing() {
        let temp = TempDir::new().unwrap();
        let (repo, project) = setup(&temp);
        fs::remove_file(project.join("target/proj-1.0-SNAPSHOT.jar")).unwrap();
        touch(&project.join("target/proj-1.0.jar"));

        let err = ClasspathAssembler::new(&repo)
            .assemble(&BuildDescriptor::default(), &project)
            .unwrap_err();
        assert!(err.to_string().starts_with("Project jar not found in directory"));
    }

    #[test]
    fn test_target_dir_missing() {
        let temp = TempDir::new().unwrap();
        assert!(find_project_jar(temp.path()).is_err());
    }

    #[test]
    fn test_display_uses_path_separator() {
        let classpath = Classpath::new(vec![PathBuf::from("x.jar"), PathBuf::from("y.jar")]);
        assert_eq!(classpath.to_string(), format!("x.jar{}y.jar", PATH_SEPARATOR));
        assert_eq!(
            classpath.to_os_string().unwrap(),
            OsString::from(classpath.to_string())
        );
    }
}
