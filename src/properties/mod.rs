//! Java `.properties` handling: an order-preserving document model and the
//! pruning of class-keyed property files after minification.

pub mod document;
pub mod patcher;

pub use document::PropertiesDocument;
pub use patcher::{PatchOutcome, PropertyPatcher};
