pub mod pom;

pub use pom::{BuildDescriptor, Dependency};
