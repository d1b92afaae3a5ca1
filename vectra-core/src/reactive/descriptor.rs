//! Derivation Descriptors
//!
//! A descriptor is the installable blueprint a macro call returns: the
//! argument list (or target key), the combine policy, and the flattened
//! dependency key set, all fixed at construction. Descriptors are inert
//! until installed on a store or passed as a composite argument; either
//! way they evaluate as a zero-argument function bound to a context.

use indexmap::IndexSet;

use crate::error::Error;
use crate::reactive::argument::Argument;
use crate::reactive::deps::dependent_keys;
use crate::reactive::reduce::{reduce, Combine};
use crate::reactive::store::Context;
use crate::value::Value;

/// Parse policy for parse-through descriptors: raw value in, float out.
pub type Parse = fn(&Value) -> f64;

#[derive(Debug, Clone)]
enum Kind {
    /// Broadcast reduction over an argument list.
    Reduce {
        args: Vec<Argument>,
        combine: Combine,
    },

    /// Read (and write) through another key unchanged.
    Alias { key: String },

    /// Read another key through a parse policy. Null, missing and
    /// empty-string raw values read as NaN.
    Parsed { key: String, parse: Parse },
}

/// An installable derivation blueprint.
#[derive(Debug, Clone)]
pub struct Descriptor {
    kind: Kind,
    keys: IndexSet<String>,
}

impl Descriptor {
    /// Blueprint for a broadcast reduction. Fails with [`Error::Arity`]
    /// on an empty argument list; the error is surfaced at construction
    /// so no derivation ever exists without arguments.
    pub fn reduce(args: Vec<Argument>, combine: Combine) -> Result<Self, Error> {
        if args.is_empty() {
            return Err(Error::Arity);
        }
        let keys = dependent_keys(&args);
        Ok(Self {
            kind: Kind::Reduce { args, combine },
            keys,
        })
    }

    /// Blueprint reading through `key` unchanged.
    pub fn alias(key: impl Into<String>) -> Self {
        let key = key.into();
        let mut keys = IndexSet::new();
        keys.insert(key.clone());
        Self {
            kind: Kind::Alias { key },
            keys,
        }
    }

    /// Blueprint reading `key` through a parse policy.
    pub fn parsed(key: impl Into<String>, parse: Parse) -> Self {
        let key = key.into();
        let mut keys = IndexSet::new();
        keys.insert(key.clone());
        Self {
            kind: Kind::Parsed { key, parse },
            keys,
        }
    }

    /// The flattened dependency key set, in first-appearance order.
    pub fn dependent_keys(&self) -> &IndexSet<String> {
        &self.keys
    }

    /// Evaluate against a context. Pure: same context state, same value.
    pub fn evaluate(&self, ctx: &dyn Context) -> Value {
        match &self.kind {
            Kind::Reduce { args, combine } => {
                let vector =
                    reduce(ctx, args, *combine).expect("argument list validated at construction");
                Value::Vector(vector)
            }
            Kind::Alias { key } => ctx.get(key).unwrap_or(Value::Null),
            Kind::Parsed { key, parse } => Value::Number(parse_raw(ctx.get(key), *parse)),
        }
    }
}

fn parse_raw(raw: Option<Value>, parse: Parse) -> f64 {
    match raw {
        None | Some(Value::Null) => f64::NAN,
        Some(Value::Str(s)) if s.is_empty() => f64::NAN,
        Some(value) => parse(&value),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
