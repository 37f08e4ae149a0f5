use crate::core::path::{config_file, maven_repository};
use crate::core::{MinifyError, MinifyResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What kind of filesystem entry an auxiliary path is expected to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuxiliaryKind {
    Directory,
    File,
}

/// A path copied verbatim from the input project into the output project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryPath {
    /// Relative to the project root
    pub path: String,
    pub kind: AuxiliaryKind,
}

impl AuxiliaryKind {
    pub fn describe(self) -> &'static str {
        match self {
            AuxiliaryKind::Directory => "directory",
            AuxiliaryKind::File => "file",
        }
    }
}

impl AuxiliaryPath {
    fn directory(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: AuxiliaryKind::Directory,
        }
    }

    fn file(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: AuxiliaryKind::File,
        }
    }
}

/// A property file whose keys name classes and get pruned after copying
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFileRule {
    /// Relative to the output Java source root
    pub path: String,
    /// Strip a trailing `[]` from keys before looking them up
    #[serde(default)]
    pub strip_array_suffix: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Command used to build a project, run inside the project directory
    #[serde(default = "default_build_command")]
    pub build_command: Vec<String>,

    /// Command prefix for the MinDeps dependency analyzer
    ///
    /// The analyzer options (`--java-home`, `--class-path`, ...) are appended.
    #[serde(default = "default_analyzer_command")]
    pub analyzer_command: Vec<String>,

    /// Local Maven repository (defaults to ~/.m2/repository)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maven_repository: Option<String>,

    /// Directories created in a freshly cleaned output project
    #[serde(default = "default_skeleton")]
    pub skeleton: Vec<String>,

    /// Directories and files copied as-is from input to output
    #[serde(default = "default_auxiliary")]
    pub auxiliary: Vec<AuxiliaryPath>,

    /// Property files pruned of classes that were not retained
    #[serde(default = "default_property_files")]
    pub property_files: Vec<PropertyFileRule>,
}

fn default_build_command() -> Vec<String> {
    ["mvn", "clean", "compile", "package", "-DskipTests=True"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_analyzer_command() -> Vec<String> {
    vec![
        "java".to_string(),
        "com.github.fracpete.deps4j.MinDeps".to_string(),
    ]
}

fn default_skeleton() -> Vec<String> {
    vec!["src/main/java".to_string(), "src/main/resources".to_string()]
}

fn default_auxiliary() -> Vec<AuxiliaryPath> {
    vec![
        AuxiliaryPath::directory("src/main/assembly"),
        AuxiliaryPath::directory("src/main/latex"),
        AuxiliaryPath::directory("src/main/scripts"),
        AuxiliaryPath::file("pom.xml"),
    ]
}

fn default_property_files() -> Vec<PropertyFileRule> {
    vec![
        PropertyFileRule {
            path: "meka/gui/goe/GenericPropertiesCreator.props".to_string(),
            strip_array_suffix: false,
        },
        PropertyFileRule {
            path: "meka/gui/goe/MekaEditors.props".to_string(),
            strip_array_suffix: true,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_command: default_build_command(),
            analyzer_command: default_analyzer_command(),
            maven_repository: None,
            skeleton: default_skeleton(),
            auxiliary: default_auxiliary(),
            property_files: default_property_files(),
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\minify\config.yaml
    /// - Linux: ~/.config/minify/config.yaml
    /// - macOS: ~/Library/Application Support/minify/config.yaml
    pub fn load() -> MinifyResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file, which must exist
    pub fn load_from(path: &Path) -> MinifyResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MinifyError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| MinifyError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> MinifyResult<()> {
        if self.build_command.is_empty() {
            return Err(MinifyError::Config(
                "build_command cannot be empty".to_string(),
            ));
        }
        if self.analyzer_command.is_empty() {
            return Err(MinifyError::Config(
                "analyzer_command cannot be empty".to_string(),
            ));
        }
        for aux in &self.auxiliary {
            if Path::new(&aux.path).is_absolute() {
                return Err(MinifyError::Config(format!(
                    "Auxiliary path must be relative to the project root: {}",
                    aux.path
                )));
            }
        }
        Ok(())
    }

    /// Get the local Maven repository path
    pub fn get_maven_repository(&self) -> MinifyResult<PathBuf> {
        if let Some(ref dir) = self.maven_repository {
            Ok(PathBuf::from(dir))
        } else {
            maven_repository()
        }
    }
}
