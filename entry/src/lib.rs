//! dirmap Entry
//!
//! Model instances. Responsibilities:
//! - Constructing entries from supplied field values
//! - Defaults, validators and aggregated missing-field reporting
//! - Expanding the path template into an escaped, normalized DN
//! - Case-insensitive attribute access by key, alias or field name

mod construct;
mod entry;
mod error;

pub use entry::Entry;
pub use error::{ConstructionError, EntryResult};
