//! dirmap Filter
//!
//! Compile comparisons on model fields into directory search filters
//! (RFC 4515 string form).
//!
//! Responsibilities:
//! - Render comparison terms (`=`, substring, `>=`, `<=`, `~=`, presence)
//! - Escape plain operand values, insert compiled expressions verbatim
//! - Combine expressions with AND / OR / NOT, nesting left-associatively
//! - Accept raw filter text wherever a search filter is expected

mod expr;
mod operand;
mod search;

pub use expr::FilterExpression;
pub use operand::Operand;
pub use search::{compile_filter, IntoSearchFilter};
