//! Visibility predicates
//!
//! Sections, tabs, and actions may carry a `visible` rule. Rules are
//! evaluated against the resolved screen data (or the entity an action
//! targets) and never fail: a rule over an absent field simply does not
//! match, except for the negative operators.

use screenwright_core::path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

// ============================================================================
// Visibility
// ============================================================================

/// A visibility rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Visibility {
    Condition { condition: Condition },
    All { rules: Vec<Visibility> },
    Any { rules: Vec<Visibility> },
    Not { rule: Box<Visibility> },
}

impl Visibility {
    pub fn when(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Visibility::Condition {
            condition: Condition::new(field, operator, Some(value.into())),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Visibility::Condition {
            condition: Condition::new(field, Operator::Exists, None),
        }
    }

    pub fn all(rules: Vec<Visibility>) -> Self {
        Visibility::All { rules }
    }

    pub fn any(rules: Vec<Visibility>) -> Self {
        Visibility::Any { rules }
    }

    pub fn negate(rule: Visibility) -> Self {
        Visibility::Not {
            rule: Box::new(rule),
        }
    }

    /// Evaluate against `data`
    pub fn evaluate(&self, data: &Value) -> bool {
        match self {
            Visibility::Condition { condition } => condition.evaluate(data),
            Visibility::All { rules } => rules.iter().all(|r| r.evaluate(data)),
            Visibility::Any { rules } => rules.iter().any(|r| r.evaluate(data)),
            Visibility::Not { rule } => !rule.evaluate(data),
        }
    }

    /// Fields the rule reads, for diagnostics
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Visibility::Condition { condition } => vec![condition.field.as_str()],
            Visibility::All { rules } | Visibility::Any { rules } => {
                rules.iter().flat_map(|r| r.fields()).collect()
            }
            Visibility::Not { rule } => rule.fields(),
        }
    }
}

/// Evaluate an optional rule; no rule means visible
pub fn is_visible(rule: Option<&Visibility>, data: &Value) -> bool {
    rule.is_none_or(|r| r.evaluate(data))
}

// ============================================================================
// Condition
// ============================================================================

/// A field / operator / value triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn evaluate(&self, data: &Value) -> bool {
        let actual = path::lookup(data, &self.field).filter(|v| has_content(v));
        let expected = self.value.as_ref().unwrap_or(&Value::Null);

        match self.operator {
            Operator::Exists => actual.is_some(),
            Operator::NotExists => actual.is_none(),
            Operator::Eq => actual.is_some_and(|a| loosely_equal(a, expected)),
            Operator::Neq => !actual.is_some_and(|a| loosely_equal(a, expected)),
            Operator::In => actual.is_some_and(|a| member_of(a, expected)),
            Operator::NotIn => !actual.is_some_and(|a| member_of(a, expected)),
            Operator::Gt => compare(actual, expected) == Some(Ordering::Greater),
            Operator::Gte => matches!(
                compare(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Lt => compare(actual, expected) == Some(Ordering::Less),
            Operator::Lte => matches!(
                compare(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Contains => actual.is_some_and(|a| contains(a, expected)),
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Neq,
    In,
    NotIn,
    Exists,
    NotExists,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
}

impl Operator {
    /// Whether the operator needs a comparison value
    pub fn takes_value(&self) -> bool {
        !matches!(self, Operator::Exists | Operator::NotExists)
    }
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    match (path::as_f64(actual), path::as_f64(expected)) {
        (Some(a), Some(b)) if actual.is_number() || expected.is_number() => a == b,
        _ => actual == expected,
    }
}

fn member_of(actual: &Value, expected: &Value) -> bool {
    match expected {
        Value::Array(options) => options.iter().any(|o| loosely_equal(actual, o)),
        single => loosely_equal(actual, single),
    }
}

fn compare(actual: Option<&Value>, expected: &Value) -> Option<Ordering> {
    let actual = actual?;
    if let (Some(a), Some(b)) = (path::as_f64(actual), path::as_f64(expected)) {
        return a.partial_cmp(&b);
    }
    match (actual, expected) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(haystack), Value::String(needle)) => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        (Value::Array(items), needle) => items.iter().any(|i| loosely_equal(i, needle)),
        _ => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
