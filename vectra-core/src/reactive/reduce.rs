//! Broadcast Reducer
//!
//! Folds a resolved argument list into a single vector, left to right.
//! Scalar arguments broadcast across every slot of the accumulator;
//! vector arguments combine element-wise, with positions past their end
//! combining as missing operands.
//!
//! # Seeding and Padding
//!
//! The accumulator seeds from argument 0 and is padded up to the longest
//! vector among all arguments before the first combine step. A vector
//! seed pads with `0.0`; a scalar seed pads by repeating itself. This
//! makes argument order observable: the padding fill depends on what came
//! first, not only on the arithmetic.
//!
//! # Missing Operands
//!
//! Nulls, non-numeric scalars and out-of-range vector positions all
//! combine as `None`. Each combine policy decides what that means; a slot
//! that never sees a number surfaces as NaN in the output.

use smallvec::smallvec;

use crate::error::Error;
use crate::reactive::argument::Argument;
use crate::reactive::resolve::resolve;
use crate::reactive::store::Context;
use crate::value::{Value, Vector};

/// Element combine policy. `None` is a missing operand; the policy defines
/// its own identity or absorbing behavior for it.
pub type Combine = fn(Option<f64>, Option<f64>) -> Option<f64>;

/// Reduce the arguments against the context into a fresh vector.
///
/// Fails with [`Error::Arity`] on an empty argument list; never on any
/// value. The returned vector is owned by the caller and aliases nothing.
pub fn reduce(ctx: &dyn Context, args: &[Argument], combine: Combine) -> Result<Vector, Error> {
    let (first, rest) = args.split_first().ok_or(Error::Arity)?;

    if rest.is_empty() {
        return Ok(into_vector(resolve(ctx, first)));
    }

    let resolved: Vec<Value> = args.iter().map(|arg| resolve(ctx, arg)).collect();
    let max_len = resolved
        .iter()
        .filter_map(|value| value.as_vector().map(Vector::len))
        .max()
        .unwrap_or(0);

    let mut acc = seed(&resolved[0], max_len);

    for current in &resolved[1..] {
        for index in 0..acc.len() {
            let item = match current {
                Value::Vector(v) => v.get(index).copied(),
                scalar => scalar.as_number(),
            };
            acc[index] = combine(acc[index], item);
        }
    }

    Ok(acc
        .into_iter()
        .map(|slot| slot.unwrap_or(f64::NAN))
        .collect())
}

/// Coerce a single resolved argument to a vector. Vectors are already
/// fresh copies from resolution; null yields an empty vector; a scalar
/// wraps into one element.
fn into_vector(value: Value) -> Vector {
    match value {
        Value::Vector(v) => v,
        Value::Null => Vector::new(),
        scalar => smallvec![scalar.as_number().unwrap_or(f64::NAN)],
    }
}

/// Seed the working accumulator from argument 0, padded to `max_len`.
fn seed(first: &Value, max_len: usize) -> Vec<Option<f64>> {
    match first {
        Value::Vector(v) => {
            let mut acc: Vec<Option<f64>> = v.iter().copied().map(Some).collect();
            let len = acc.len().max(max_len);
            acc.resize(len, Some(0.0));
            acc
        }
        Value::Null => vec![None; max_len],
        scalar => {
            let fill = scalar.as_number();
            // Natural length one, like any other scalar-to-vector coercion.
            let mut acc = vec![fill];
            let len = acc.len().max(max_len);
            acc.resize(len, fill);
            acc
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
