//! Value Domain
//!
//! `Value` is the dynamic value space of a host context: the numbers,
//! vectors, strings, booleans and nulls that live behind property keys.
//! Arguments resolve into values, the broadcast reducer consumes them, and
//! the write-back path coerces between them.
//!
//! # Numeric View
//!
//! The reducer only combines numbers. `as_number` deliberately performs no
//! cross-type coercion: a null, boolean, string or vector scalar has no
//! numeric view and combines as a missing operand. Each combine policy
//! defines what a missing operand means (identity for sum, zero for
//! product).

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The ordered numeric payload of a vector-valued property.
///
/// Vectors in practice are short (a handful of elements); the inline
/// capacity keeps them off the heap in the common case.
pub type Vector = SmallVec<[f64; 8]>;

/// A dynamically typed host value.
///
/// The untagged serde representation maps JSON-shaped host data directly
/// onto the variants: `null`, booleans, numbers, strings and numeric
/// arrays round-trip without an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value. Resolving a missing or null property yields this.
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Vector(Vector),
}

impl Value {
    /// The kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::Str,
            Value::Vector(_) => ValueKind::Vector,
        }
    }

    /// Numeric view of a scalar value. No coercion: only `Number` has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the vector payload, if this is a vector.
    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    /// The string form used by the write-back fallback coercion.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Vector(v) => {
                let joined = v
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "{joined}")
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(Vector::from_vec(v))
    }
}

impl From<Vector> for Value {
    fn from(v: Vector) -> Self {
        Value::Vector(v)
    }
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    Str,
    Vector,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::Str => "string",
            ValueKind::Vector => "vector",
        };
        write!(f, "{name}")
    }
}

/// Retain the values of a single kind, in order.
///
/// ```rust,ignore
/// let mixed = vec![Value::from("a"), Value::from(1.0), Value::from("b")];
/// retain_by_kind(&mixed, ValueKind::Str); // ["a", "b"]
/// ```
pub fn retain_by_kind(values: &[Value], kind: ValueKind) -> Vec<Value> {
    values
        .iter()
        .filter(|value| value.kind() == kind)
        .cloned()
        .collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
