//! Operands accepted by filter comparisons and combinators.

use dirmap_core::{escape_filter_value, Value};

use crate::FilterExpression;

/// Right-hand side of a comparison or combination.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// An already compiled filter, inserted verbatim.
    Filter(String),
    /// A plain value, escaped before insertion.
    Value(Value),
}

impl Operand {
    /// Compile the operand into filter text.
    pub fn compile(&self) -> String {
        match self {
            Operand::Filter(filter) => filter.clone(),
            Operand::Value(value) => escape_filter_value(&value.to_string()),
        }
    }

    /// Returns true if compiling this operand yields no text.
    pub fn is_empty(&self) -> bool {
        match self {
            Operand::Filter(filter) => filter.is_empty(),
            Operand::Value(_) => false,
        }
    }
}

impl From<FilterExpression> for Operand {
    fn from(expr: FilterExpression) -> Self {
        Operand::Filter(expr.compiled_filter().to_string())
    }
}

impl From<&FilterExpression> for Operand {
    fn from(expr: &FilterExpression) -> Self {
        Operand::Filter(expr.compiled_filter().to_string())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Value(Value::from(s))
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Value(Value::from(s))
    }
}

impl From<&String> for Operand {
    fn from(s: &String) -> Self {
        Operand::Value(Value::from(s))
    }
}

impl From<i64> for Operand {
    fn from(i: i64) -> Self {
        Operand::Value(Value::from(i))
    }
}

impl From<i32> for Operand {
    fn from(i: i32) -> Self {
        Operand::Value(Value::from(i))
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Value(Value::from(b))
    }
}
