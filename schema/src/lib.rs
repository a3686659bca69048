//! dirmap Schema
//!
//! Models derived from directory schema. Responsibilities:
//! - The SchemaProvider seam
//! - Parsing RFC 4512 object class and attribute type descriptions
//! - Resolving the fields of a set of object classes along their SUP chains
//! - Generating models from a provider (DynamicModelFactory)

mod definition;
mod directory;
mod error;
mod factory;
mod provider;

pub use definition::{AttributeTypeDef, ObjectClassDef, ObjectClassKind};
pub use directory::DirectorySchema;
pub use error::{SchemaLookupError, SchemaResult};
pub use factory::DynamicModelFactory;
pub use provider::SchemaProvider;
