//! Filter expressions over model fields.
//!
//! A [`FilterExpression`] pairs a field definition with the filter text
//! accumulated so far. Every comparison and combinator returns a new
//! expression, so the accessor handed out by a model can be reused freely.

use dirmap_core::FieldDef;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::Operand;

/// Comparison kinds supported by the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Equal,
    StartsWith,
    EndsWith,
    Contains,
    GreaterOrEqual,
    LessOrEqual,
    Approx,
}

impl Comparison {
    fn render(self, key: &str, value: &str) -> String {
        match self {
            Comparison::Equal => format!("({}={})", key, value),
            Comparison::StartsWith => format!("({}={}*)", key, value),
            Comparison::EndsWith => format!("({}=*{})", key, value),
            Comparison::Contains => format!("({}=*{}*)", key, value),
            Comparison::GreaterOrEqual => format!("({}>={})", key, value),
            Comparison::LessOrEqual => format!("({}<={})", key, value),
            Comparison::Approx => format!("({}~={})", key, value),
        }
    }
}

/// Boolean combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    And,
    Or,
}

impl Combinator {
    fn symbol(self) -> char {
        match self {
            Combinator::And => '&',
            Combinator::Or => '|',
        }
    }
}

/// A field together with an accumulated search filter.
#[derive(Debug, Clone)]
pub struct FilterExpression {
    field: Arc<FieldDef>,
    filter: String,
}

impl FilterExpression {
    /// Create an expression with an empty filter for `field`.
    pub fn new(field: Arc<FieldDef>) -> Self {
        Self {
            field,
            filter: String::new(),
        }
    }

    /// The protocol key the comparisons are rendered against.
    pub fn key(&self) -> &str {
        &self.field.key
    }

    /// The wrapped field definition.
    pub fn field(&self) -> &FieldDef {
        &self.field
    }

    /// The filter text compiled so far (empty if nothing was compared yet).
    pub fn compiled_filter(&self) -> &str {
        &self.filter
    }

    /// Returns true if no comparison has been applied yet.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
    }

    fn with_filter(&self, filter: String) -> Self {
        Self {
            field: Arc::clone(&self.field),
            filter,
        }
    }

    /// Apply a comparison. A non-empty expression is conjoined with the new term.
    fn compare(&self, comparison: Comparison, operand: Operand) -> Self {
        let term = comparison.render(self.key(), &operand.compile());
        if self.filter.is_empty() {
            self.with_filter(term)
        } else {
            self.combine(Combinator::And, Operand::Filter(term))
        }
    }

    /// Nest the current filter (left) and `operand` (right) under `combinator`.
    fn combine(&self, combinator: Combinator, operand: Operand) -> Self {
        let other = operand.compile();
        if other.is_empty() {
            tracing::debug!(key = %self.key(), "empty right operand elided from filter");
            return self.clone();
        }
        if self.filter.is_empty() {
            tracing::debug!(key = %self.key(), "empty left operand elided from filter");
            return self.with_filter(other);
        }
        self.with_filter(format!("({}{}{})", combinator.symbol(), self.filter, other))
    }

    /// `(key=value)`
    pub fn equals(&self, operand: impl Into<Operand>) -> Self {
        self.compare(Comparison::Equal, operand.into())
    }

    /// `(key=value*)`
    pub fn starts_with(&self, operand: impl Into<Operand>) -> Self {
        self.compare(Comparison::StartsWith, operand.into())
    }

    /// `(key=*value)`
    pub fn ends_with(&self, operand: impl Into<Operand>) -> Self {
        self.compare(Comparison::EndsWith, operand.into())
    }

    /// `(key=*value*)`
    pub fn contains(&self, operand: impl Into<Operand>) -> Self {
        self.compare(Comparison::Contains, operand.into())
    }

    /// `(key>=value)`
    pub fn greater_or_equal(&self, operand: impl Into<Operand>) -> Self {
        self.compare(Comparison::GreaterOrEqual, operand.into())
    }

    /// `(key<=value)`
    pub fn less_or_equal(&self, operand: impl Into<Operand>) -> Self {
        self.compare(Comparison::LessOrEqual, operand.into())
    }

    /// `(key~=value)`
    pub fn approx(&self, operand: impl Into<Operand>) -> Self {
        self.compare(Comparison::Approx, operand.into())
    }

    /// `(key=*)`
    pub fn present(&self) -> Self {
        let term = format!("({}=*)", self.key());
        if self.filter.is_empty() {
            self.with_filter(term)
        } else {
            self.combine(Combinator::And, Operand::Filter(term))
        }
    }

    /// `(&(self)(other))`
    pub fn and(&self, operand: impl Into<Operand>) -> Self {
        self.combine(Combinator::And, operand.into())
    }

    /// `(|(self)(other))`
    pub fn or(&self, operand: impl Into<Operand>) -> Self {
        self.combine(Combinator::Or, operand.into())
    }

    /// `(!(self))`. Negating an empty expression leaves it empty.
    pub fn negate(&self) -> Self {
        if self.filter.is_empty() {
            return self.clone();
        }
        self.with_filter(format!("(!{})", self.filter))
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filter)
    }
}

impl<O: Into<Operand>> BitAnd<O> for FilterExpression {
    type Output = FilterExpression;

    fn bitand(self, rhs: O) -> Self::Output {
        self.and(rhs)
    }
}

impl<O: Into<Operand>> BitAnd<O> for &FilterExpression {
    type Output = FilterExpression;

    fn bitand(self, rhs: O) -> Self::Output {
        self.and(rhs)
    }
}

impl<O: Into<Operand>> BitOr<O> for FilterExpression {
    type Output = FilterExpression;

    fn bitor(self, rhs: O) -> Self::Output {
        self.or(rhs)
    }
}

impl<O: Into<Operand>> BitOr<O> for &FilterExpression {
    type Output = FilterExpression;

    fn bitor(self, rhs: O) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for FilterExpression {
    type Output = FilterExpression;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Not for &FilterExpression {
    type Output = FilterExpression;

    fn not(self) -> Self::Output {
        self.negate()
    }
}
