pub mod maven;

pub use maven::{MavenBuilder, ProjectBuilder};
