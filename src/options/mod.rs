use crate::core::{MinifyError, MinifyResult};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Command-line arguments as typed by the user
#[derive(Parser, Debug, Clone)]
#[command(name = "minify")]
#[command(about = "Minifies a Maven build environment using a minimum set of classes")]
#[command(version)]
pub struct MinifyArgs {
    /// The java home directory of the JDK that includes the jdeps binary
    #[arg(long = "java-home", value_name = "DIR")]
    pub java_home: PathBuf,

    /// File with the classes to determine the dependencies for (empty lines and lines starting with # are ignored)
    #[arg(long, value_name = "FILE")]
    pub classes: PathBuf,

    /// File with additional class names to just include
    #[arg(long, value_name = "FILE")]
    pub additional: Option<PathBuf>,

    /// The directory with the pristine build environment
    #[arg(long, value_name = "DIR")]
    pub input: PathBuf,

    /// The directory for storing the minified build environment
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Build the minified build environment afterwards to verify it
    #[arg(long)]
    pub test: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// The packages to keep, e.g. 'meka'
    #[arg(value_name = "PACKAGE", required = true, num_args = 1..)]
    pub packages: Vec<String>,
}

/// Validated settings for a single run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    pub java_home: PathBuf,
    pub classes_file: PathBuf,
    pub additional_file: Option<PathBuf>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub packages: Vec<String>,
    pub verify: bool,
}

impl RunConfiguration {
    /// Check the arguments and turn them into a run configuration.
    ///
    /// Nothing on disk is touched. Input and output are made absolute so the
    /// pipeline does not depend on the working directory.
    pub fn validate(args: &MinifyArgs) -> MinifyResult<Self> {
        check_dir(
            &args.java_home,
            "Java home directory does not exist",
            "Java home does not point to a directory",
        )?;

        if !args.classes.exists() {
            return Err(invalid("File with class names does not exist", &args.classes));
        }
        if args.classes.is_dir() {
            return Err(invalid(
                "File with class names points to directory",
                &args.classes,
            ));
        }

        if let Some(additional) = &args.additional {
            if !additional.exists() {
                return Err(invalid(
                    "File with additional class names does not exist",
                    additional,
                ));
            }
            if additional.is_dir() {
                return Err(invalid(
                    "File with additional class names points to directory",
                    additional,
                ));
            }
        }

        check_dir(
            &args.input,
            "Input build environment does not exist",
            "Input build environment points to a file",
        )?;

        let output = args
            .output
            .as_ref()
            .ok_or_else(|| MinifyError::Validation("No output directory supplied!".to_string()))?;
        check_dir(
            output,
            "Output directory does not exist",
            "Output directory points to a file",
        )?;

        // preparing the output empties it, which must never hit the input
        if same_directory(&args.input, output) {
            return Err(invalid(
                "Output directory must differ from input build environment",
                output,
            ));
        }

        let packages: Vec<String> = args
            .packages
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if packages.is_empty() {
            return Err(MinifyError::Validation(
                "At least one package to keep is required".to_string(),
            ));
        }

        Ok(Self {
            java_home: args.java_home.clone(),
            classes_file: args.classes.clone(),
            additional_file: args.additional.clone(),
            input: absolute(&args.input)?,
            output: absolute(output)?,
            packages,
            verify: args.test,
        })
    }
}

fn invalid(message: &str, path: &Path) -> MinifyError {
    MinifyError::Validation(format!("{}: {}", message, path.display()))
}

fn check_dir(path: &Path, missing: &str, not_dir: &str) -> MinifyResult<()> {
    if !path.exists() {
        return Err(invalid(missing, path));
    }
    if !path.is_dir() {
        return Err(invalid(not_dir, path));
    }
    Ok(())
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn absolute(path: &Path) -> MinifyResult<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        MinifyError::Validation(format!("Failed to resolve {}: {}", path.display(), e))
    })
}
