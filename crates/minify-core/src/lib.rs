// Core functionality
pub mod core;

// Build descriptor (pom.xml)
pub mod descriptor;

// External process execution
pub mod process;

// Re-export commonly used types
pub use crate::core::{format_error_with_help, ErrorHelp, MinifyError, MinifyResult};
pub use descriptor::pom::{BuildDescriptor, Dependency};
pub use process::runner::{run_captured, ProcessOutput};
