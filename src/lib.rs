//! minify: trim a Maven build environment down to the classes a set of seed
//! classes needs.
//!
//! This crate holds the pipeline stages and the CLI configuration; errors,
//! paths, the `pom.xml` model and process capture come from `minify-core`.

pub use minify_core::{
    format_error_with_help, BuildDescriptor, Dependency, ErrorHelp, MinifyError, MinifyResult,
};

/// Core module re-exported from `minify-core`.
pub mod core {
    pub use minify_core::core::*;
    pub use minify_core::*;

    /// Path module re-exported from minify-core.
    pub mod path {
        pub use minify_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Command-line options and their validation.
pub mod options;

/// Building projects with the external build tool.
pub mod build;

/// Analysis classpath assembly.
pub mod classpath;

/// The external dependency analyzer.
pub mod analyzer;

/// Output preparation and copying.
pub mod output;

/// Property file pruning.
pub mod properties;

/// The pipeline tying the stages together.
pub mod minifier;

pub use minifier::{MinifySummary, Minifier};
pub use options::{MinifyArgs, RunConfiguration};
