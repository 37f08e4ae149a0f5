use crate::core::error::{MinifyError, MinifyResult};
use std::path::{Path, PathBuf};

/// Name of the build descriptor at the root of a project
pub const BUILD_DESCRIPTOR: &str = "pom.xml";

/// Java sources, relative to the project root
pub const SOURCE_ROOT: &str = "src/main/java";

/// Resources, relative to the project root
pub const RESOURCE_ROOT: &str = "src/main/resources";

/// Directory the build tool writes artifacts into
pub const TARGET_DIR: &str = "target";

/// Environment variable overriding the local Maven repository
pub const MAVEN_REPOSITORY_ENV: &str = "MINIFY_MAVEN_REPOSITORY";

/// Get the minify config directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\minify
/// - Linux: ~/.config/minify
/// - macOS: ~/Library/Application Support/minify
pub fn minify_home() -> MinifyResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| MinifyError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("minify"))
}

/// Get the default config file path (`<minify_home>/config.yaml`)
pub fn config_file() -> MinifyResult<PathBuf> {
    Ok(minify_home()?.join("config.yaml"))
}

/// Get the local Maven repository (`~/.m2/repository`)
///
/// `MINIFY_MAVEN_REPOSITORY` takes precedence over the home directory.
pub fn maven_repository() -> MinifyResult<PathBuf> {
    if let Some(dir) = std::env::var_os(MAVEN_REPOSITORY_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let home = dirs::home_dir()
        .ok_or_else(|| MinifyError::Path("Could not determine home directory".to_string()))?;
    Ok(home.join(".m2").join("repository"))
}

/// Get the Java source root of a project (`<root>/src/main/java`)
pub fn source_root(project_root: &Path) -> PathBuf {
    project_root.join(SOURCE_ROOT)
}

/// Get the resource root of a project (`<root>/src/main/resources`)
pub fn resource_root(project_root: &Path) -> PathBuf {
    project_root.join(RESOURCE_ROOT)
}

/// Source file of a class, relative to the Java source root.
///
/// `a.b.C` maps to `a/b/C.java`. Nested classes (`a.b.C$D`) live in the
/// source file of their outermost class.
pub fn class_to_relative_source(class_name: &str) -> PathBuf {
    let outer = class_name.split('$').next().unwrap_or(class_name);
    let mut path: PathBuf = outer.split('.').collect();
    path.set_extension("java");
    path
}

/// Map a directory below a project's source root to its resource counterpart.
///
/// `<root>/src/main/java/a/b` becomes `<root>/src/main/resources/a/b`. Only
/// the part below `project_root` is rewritten; directories outside the source
/// root are returned unchanged.
pub fn source_dir_to_resource_dir(project_root: &Path, dir: &Path) -> PathBuf {
    match dir.strip_prefix(source_root(project_root)) {
        Ok(relative) => resource_root(project_root).join(relative),
        Err(_) => dir.to_path_buf(),
    }
}
