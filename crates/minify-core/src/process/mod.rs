pub mod runner;

pub use runner::{run_captured, ProcessOutput};
