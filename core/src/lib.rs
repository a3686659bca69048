//! dirmap Core Types
//!
//! This crate provides the foundational types used throughout dirmap:
//! - Value types (the Value enum and one-or-many normalization)
//! - Field definitions (FieldDef, FieldKind, Validator)
//! - The case-insensitive attribute map with alias lookup
//! - Escaping for search filters and DN values
//! - DN parsing and normalization

mod attrs;
mod dn;
mod escape;
mod field;
mod value;

pub use attrs::*;
pub use dn::*;
pub use escape::*;
pub use field::*;
pub use value::*;
