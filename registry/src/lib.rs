//! dirmap Registry
//!
//! Model declaration and lookup. Responsibilities:
//! - Declaring models with fields, object classes, constants and a path template
//! - Merging inherited declarations when a model is finalized
//! - Path template parsing and expansion
//! - The immutable Registry of finalized models

mod builder;
mod registry;
mod template;
mod types;

pub use builder::{ModelBuilder, ModelDecl, RegistryBuilder, RegistryError};
pub use registry::Registry;
pub use template::{PathTemplate, Segment, TemplateError};
pub use types::*;
