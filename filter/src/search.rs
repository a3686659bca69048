//! Conversion of filter expressions or raw filter text into search filters.

use crate::FilterExpression;

/// Anything that can be handed to a directory search as its filter.
pub trait IntoSearchFilter {
    fn into_search_filter(self) -> String;
}

impl IntoSearchFilter for &str {
    fn into_search_filter(self) -> String {
        self.to_string()
    }
}

impl IntoSearchFilter for String {
    fn into_search_filter(self) -> String {
        self
    }
}

impl IntoSearchFilter for &String {
    fn into_search_filter(self) -> String {
        self.clone()
    }
}

impl IntoSearchFilter for FilterExpression {
    fn into_search_filter(self) -> String {
        self.compiled_filter().to_string()
    }
}

impl IntoSearchFilter for &FilterExpression {
    fn into_search_filter(self) -> String {
        self.compiled_filter().to_string()
    }
}

/// Returns the compiled filter of an expression, or raw filter text unchanged.
pub fn compile_filter(filter: impl IntoSearchFilter) -> String {
    filter.into_search_filter()
}
