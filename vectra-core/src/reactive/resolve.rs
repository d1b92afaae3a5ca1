//! Value Resolver
//!
//! Turns an [`Argument`] into its current [`Value`] against a context.
//! Resolution is pure with respect to the context snapshot: no side
//! effects, no caching, the same inputs always yield the same value.

use crate::reactive::argument::Argument;
use crate::reactive::store::Context;
use crate::value::Value;

/// Resolve one argument against the given context.
///
/// - Literals pass through unchanged; a null literal stays null, it is not
///   coerced to zero here.
/// - A key containing an embedded space is never looked up on the context;
///   it resolves to the string itself. This is an escape hatch, not an
///   error.
/// - Any other key reads `ctx.get(key)`; a missing key resolves to
///   [`Value::Null`], never to the key string.
/// - A composite derivation evaluates in place, bound to this context.
pub fn resolve(ctx: &dyn Context, arg: &Argument) -> Value {
    match arg {
        Argument::Literal(value) => value.clone(),
        Argument::Key(key) => {
            if key.contains(' ') {
                Value::Str(key.clone())
            } else {
                ctx.get(key).unwrap_or(Value::Null)
            }
        }
        Argument::Derived(descriptor) => descriptor.evaluate(ctx),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
