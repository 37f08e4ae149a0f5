use thiserror::Error;

pub type MinifyResult<T> = Result<T, MinifyError>;

#[derive(Error, Debug)]
pub enum MinifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Process(String),

    #[error("{0}")]
    Build(String),

    #[error("{0}")]
    Descriptor(String),

    #[error("{0}")]
    Classpath(String),

    #[error("{0}")]
    Analyzer(String),

    #[error("{0}")]
    Output(String),

    #[error("{0}")]
    Properties(String),
}

impl MinifyError {
    /// Process exit code for this error.
    ///
    /// Argument, validation and configuration problems exit with 1,
    /// everything that fails once the pipeline has started exits with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            MinifyError::Validation(_) | MinifyError::Config(_) => 1,
            _ => 2,
        }
    }
}
