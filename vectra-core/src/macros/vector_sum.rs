//! Vector Sum
//!
//! A derivation whose value is the element-wise sum of its arguments,
//! with scalar broadcasting and seed padding per the reducer's rules.

use crate::error::Error;
use crate::reactive::{Argument, Descriptor};

/// Additive combine policy: a missing operand on either side is the
/// identity and the other side passes through.
fn add(prev: Option<f64>, item: Option<f64>) -> Option<f64> {
    match (prev, item) {
        (None, item) => item,
        (prev, None) => prev,
        (Some(prev), Some(item)) => Some(prev + item),
    }
}

/// Build a derivation that is the vector sum of its arguments. Arguments
/// can be vectors, scalars, property keys, or other derivations.
///
/// Vector arguments need not share a length; the result has the length of
/// the longest one. A scalar argument is added to every element.
///
/// ```rust,ignore
/// let store = Store::new();
/// store.set("a", Value::from(vec![2.0, 5.0]))?;
/// store.set("b", Value::from(7.0))?;
///
/// store.install("e", vector_sum(args!["a", "b"])?);       // [9, 12]
/// store.install("f", vector_sum(args!["a", "b", 2])?);    // [11, 14]
/// store.install("g", vector_sum(args!["a"])?);            // [2, 5]
/// ```
pub fn vector_sum(args: Vec<Argument>) -> Result<Descriptor, Error> {
    Descriptor::reduce(args, add)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
