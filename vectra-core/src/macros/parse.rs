//! Parse-through Derivations
//!
//! Single-key derivations that read their dependency through a parse
//! policy and accept writes back through the shared coercion path. Null,
//! missing and empty-string raw values read as NaN rather than erroring.

use crate::reactive::{Descriptor, Parse};
use crate::value::Value;

/// Build a parse-through derivation for `key` with an arbitrary policy.
///
/// ```rust,ignore
/// let hex = parsed("raw", |v| match v {
///     Value::Str(s) => i64::from_str_radix(s, 16).map(|n| n as f64).unwrap_or(f64::NAN),
///     _ => f64::NAN,
/// });
/// ```
pub fn parsed(key: impl Into<String>, parse: Parse) -> Descriptor {
    Descriptor::parsed(key, parse)
}

/// Derivation reading `key` as a float.
pub fn parse_float(key: impl Into<String>) -> Descriptor {
    Descriptor::parsed(key, float_of)
}

/// Derivation reading `key` as an integer, truncating toward zero.
pub fn parse_int(key: impl Into<String>) -> Descriptor {
    Descriptor::parsed(key, int_of)
}

fn float_of(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => *n,
        Value::Str(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn int_of(raw: &Value) -> f64 {
    float_of(raw).trunc()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
