//! Value types for directory attributes.
//!
//! Directory attributes are multi-valued: every attribute carries an ordered
//! list of values. Callers may still hand over a single scalar, which is
//! normalized into a one-element list by [`Value::into_values`].

use std::fmt;

/// A value that can be supplied for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// 64-bit signed integer.
    Int(i64),
    /// Boolean value, rendered in the directory boolean syntax.
    Bool(bool),
    /// Ordered list of values.
    List(Vec<Value>),
}

impl Value {
    /// Returns true if this is a list value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Normalize into the ordered value list of an attribute.
    ///
    /// Lists pass through unchanged, scalars become a single-element list.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Value::List(values) => values,
            scalar => vec![scalar],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(true) => write!(f, "TRUE"),
            Value::Bool(false) => write!(f, "FALSE"),
            Value::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

/// Render a normalized value list the way error messages and entry dumps show it.
pub fn render_values(values: &[Value]) -> String {
    match values {
        [single] => single.to_string(),
        many => {
            let inner: Vec<String> = many.iter().map(|v| v.to_string()).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

// Conversions from Rust types

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Build a list of `(field name, value)` pairs for model construction.
///
/// ```
/// use dirmap_core::{fields, Value};
///
/// let values = fields! { "username" => "guest", "uidNumber" => 1000 };
/// assert_eq!(values[1].1, Value::Int(1000));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::Value)>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        vec![$(($name.to_string(), $crate::Value::from($value))),+]
    };
}
