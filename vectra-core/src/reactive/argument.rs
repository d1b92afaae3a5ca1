//! Macro Arguments
//!
//! One element of a macro call's input list. An argument is immutable once
//! constructed; what it contributes to resolution and to the dependency
//! key set depends on its variant.

use crate::reactive::descriptor::Descriptor;
use crate::value::{Value, Vector};

/// A single argument to a derivation macro.
#[derive(Debug, Clone)]
pub enum Argument {
    /// A literal value, combined as-is. Never tracked.
    Literal(Value),

    /// A named reference, resolved against the context on every
    /// evaluation and tracked for invalidation. A key containing an
    /// embedded space is never looked up; it resolves to the string
    /// itself.
    Key(String),

    /// A composite derivation evaluated in place. Contributes its own
    /// dependency keys to the enclosing derivation.
    Derived(Descriptor),
}

impl From<&str> for Argument {
    fn from(key: &str) -> Self {
        Argument::Key(key.to_owned())
    }
}

impl From<String> for Argument {
    fn from(key: String) -> Self {
        Argument::Key(key)
    }
}

impl From<f64> for Argument {
    fn from(n: f64) -> Self {
        Argument::Literal(Value::Number(n))
    }
}

impl From<i64> for Argument {
    fn from(n: i64) -> Self {
        Argument::Literal(Value::Number(n as f64))
    }
}

impl From<i32> for Argument {
    fn from(n: i32) -> Self {
        Argument::Literal(Value::Number(n as f64))
    }
}

impl From<bool> for Argument {
    fn from(b: bool) -> Self {
        Argument::Literal(Value::Bool(b))
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Literal(value)
    }
}

impl From<Vec<f64>> for Argument {
    fn from(v: Vec<f64>) -> Self {
        Argument::Literal(Value::Vector(Vector::from_vec(v)))
    }
}

impl From<Descriptor> for Argument {
    fn from(descriptor: Descriptor) -> Self {
        Argument::Derived(descriptor)
    }
}

/// Build a `Vec<Argument>` from a heterogeneous list, the Rust rendition
/// of a variadic macro call.
///
/// ```rust,ignore
/// let total = vector_sum(args!["a", 2, "a"])?;
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::reactive::Argument::from($arg)),*]
    };
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
