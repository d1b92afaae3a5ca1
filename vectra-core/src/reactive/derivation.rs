//! Derivation Cell
//!
//! A Derivation wraps a [`Descriptor`] as a memoized, dependency-tracked
//! value installed on a store.
//!
//! # Lifecycle
//!
//! 1. Created once per macro invocation, at install time. Starts dirty.
//!
//! 2. First read evaluates the descriptor, caches the result and marks
//!    the cell clean.
//!
//! 3. The store calls `mark_dirty` when any dependency key changes; the
//!    next read recomputes. Reads between invalidations return the cached
//!    value without re-evaluating.
//!
//! Reads hand out clones of the cache, so callers cannot corrupt it by
//! mutating what they were given.
//!
//! # Write-back
//!
//! A derivation wrapping exactly one dependency key accepts writes and
//! forwards them to the underlying key, coerced to match that key's
//! current type. Every other derivation is read-only and writes fail
//! fast.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;
use tracing::trace;

use crate::error::Error;
use crate::reactive::descriptor::Descriptor;
use crate::reactive::store::Context;
use crate::value::Value;

/// Counter for generating unique derivation IDs.
static DERIVATION_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique derivation ID.
fn next_derivation_id() -> u64 {
    DERIVATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Cache state of a derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// The cached value is up-to-date.
    Clean,

    /// A dependency changed (or the cell was never computed); the next
    /// read recomputes.
    Dirty,
}

/// A lazily computed, cached derived value tied to a dependency key set.
pub struct Derivation {
    /// Unique identifier for this derivation.
    id: u64,

    /// The blueprint: argument list, combine policy and dependency keys.
    descriptor: Arc<Descriptor>,

    /// The cached value (None if never computed).
    value: Arc<RwLock<Option<Value>>>,

    /// Current cache state.
    state: Arc<RwLock<CacheState>>,
}

impl Derivation {
    /// Wrap a descriptor in a fresh, dirty cell.
    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            id: next_derivation_id(),
            descriptor: Arc::new(descriptor),
            value: Arc::new(RwLock::new(None)),
            state: Arc::new(RwLock::new(CacheState::Dirty)),
        }
    }

    /// Get the derivation's unique ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The keys whose changes invalidate this cell.
    pub fn dependent_keys(&self) -> &IndexSet<String> {
        self.descriptor.dependent_keys()
    }

    /// Get the current value, recomputing if dirty or never computed.
    pub fn get(&self, ctx: &dyn Context) -> Value {
        if *self.state.read() == CacheState::Clean {
            if let Some(value) = self.value.read().clone() {
                trace!(id = self.id, "derivation cache hit");
                return value;
            }
        }
        self.recompute(ctx)
    }

    /// Mark the cell dirty. Called by the store when a dependency key
    /// changes; the cached value survives until the next read replaces
    /// it.
    pub fn mark_dirty(&self) {
        *self.state.write() = CacheState::Dirty;
    }

    /// Current cache state.
    pub fn state(&self) -> CacheState {
        *self.state.read()
    }

    /// Check whether the cell has ever computed.
    pub fn has_value(&self) -> bool {
        self.value.read().is_some()
    }

    fn recompute(&self, ctx: &dyn Context) -> Value {
        // Evaluate before taking any lock; descriptors may read back
        // through the same store.
        let value = self.descriptor.evaluate(ctx);
        *self.value.write() = Some(value.clone());
        *self.state.write() = CacheState::Clean;
        trace!(id = self.id, "derivation recomputed");
        value
    }

    /// Write through to the underlying dependency.
    ///
    /// Only a derivation wrapping exactly one dependency key is writable;
    /// anything else fails with [`Error::ReadOnly`]. The written value is
    /// coerced to the dependency's current type: numeric dependencies
    /// parse the value as a float, boolean dependencies accept
    /// `"true"`/`"false"` (case-insensitive) or a number, and anything
    /// else stores the value's string form. A failed boolean coercion
    /// leaves the dependency unchanged.
    pub fn set(&self, ctx: &dyn Context, value: Value) -> Result<(), Error> {
        let keys = self.descriptor.dependent_keys();
        let mut iter = keys.iter();
        let key = match (iter.next(), iter.next()) {
            (Some(key), None) => key,
            _ => return Err(Error::ReadOnly { deps: keys.len() }),
        };

        let coerced = match ctx.get(key) {
            Some(Value::Number(_)) => Value::Number(coerce_to_float(&value)),
            Some(Value::Bool(_)) => Value::Bool(coerce_to_bool(&value)?),
            _ => Value::Str(value.to_string()),
        };
        ctx.set(key, coerced)
    }
}

fn coerce_to_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Str(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn coerce_to_bool(value: &Value) -> Result<bool, Error> {
    match value {
        Value::Str(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::Str(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        Value::Number(n) => Ok(*n != 0.0),
        other => Err(Error::TypeMismatch { kind: other.kind() }),
    }
}

impl Clone for Derivation {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            descriptor: Arc::clone(&self.descriptor),
            value: Arc::clone(&self.value),
            state: Arc::clone(&self.state),
        }
    }
}

impl Debug for Derivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derivation")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("has_value", &self.has_value())
            .field("dependent_keys", &self.dependent_keys().len())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::macros::{alias, parse_float, vector_sum};
    use crate::reactive::store::Store;

    fn store() -> Store {
        let store = Store::new();
        store
            .set("a", Value::from(vec![1.0, 2.0, 3.0, 4.0]))
            .expect("plain set");
        store.set("b", Value::from(1.0)).expect("plain set");
        store
    }

    #[test]
    fn starts_dirty_and_computes_on_first_read() {
        let store = store();
        let cell = Derivation::new(vector_sum(args!["a", "b"]).expect("two arguments"));

        assert_eq!(cell.state(), CacheState::Dirty);
        assert!(!cell.has_value());

        assert_eq!(cell.get(&store), Value::from(vec![2.0, 3.0, 4.0, 5.0]));
        assert_eq!(cell.state(), CacheState::Clean);
        assert!(cell.has_value());
    }

    #[test]
    fn repeated_reads_return_the_cached_value() {
        let store = store();
        let cell = Derivation::new(vector_sum(args!["a", "b"]).expect("two arguments"));

        let first = cell.get(&store);

        // The cell was never installed, so nothing marks it dirty; the
        // store change is not observed until someone does.
        store.set("b", Value::from(100.0)).expect("plain set");
        assert_eq!(cell.state(), CacheState::Clean);
        assert_eq!(cell.get(&store), first);
    }

    #[test]
    fn dirty_cells_recompute_on_next_read() {
        let store = store();
        let cell = Derivation::new(vector_sum(args!["a", "b"]).expect("two arguments"));

        assert_eq!(cell.get(&store), Value::from(vec![2.0, 3.0, 4.0, 5.0]));

        store.set("b", Value::from(10.0)).expect("plain set");
        cell.mark_dirty();
        assert_eq!(cell.get(&store), Value::from(vec![11.0, 12.0, 13.0, 14.0]));
    }

    #[test]
    fn clones_share_cache_and_state() {
        let store = store();
        let cell = Derivation::new(vector_sum(args!["a"]).expect("one argument"));
        let twin = cell.clone();

        assert_eq!(cell.id(), twin.id());
        cell.get(&store);
        assert!(twin.has_value());

        twin.mark_dirty();
        assert_eq!(cell.state(), CacheState::Dirty);
    }

    #[test]
    fn writes_forward_to_a_numeric_dependency_as_floats() {
        let store = store();
        let cell = Derivation::new(parse_float("b"));

        cell.set(&store, Value::from("2.5")).expect("writable");
        assert_eq!(store.get("b"), Some(Value::from(2.5)));

        cell.set(&store, Value::from(7.0)).expect("writable");
        assert_eq!(store.get("b"), Some(Value::from(7.0)));
    }

    #[test]
    fn unparseable_floats_store_nan() {
        let store = store();
        let cell = Derivation::new(parse_float("b"));

        cell.set(&store, Value::from("garbage")).expect("writable");
        match store.get("b") {
            Some(Value::Number(n)) => assert!(n.is_nan()),
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn writes_coerce_to_a_boolean_dependency() {
        let store = store();
        store.set("flag", Value::from(false)).expect("plain set");
        let cell = Derivation::new(alias("flag"));

        cell.set(&store, Value::from("TRUE")).expect("writable");
        assert_eq!(store.get("flag"), Some(Value::from(true)));

        cell.set(&store, Value::from("false")).expect("writable");
        assert_eq!(store.get("flag"), Some(Value::from(false)));

        cell.set(&store, Value::from(2)).expect("writable");
        assert_eq!(store.get("flag"), Some(Value::from(true)));

        cell.set(&store, Value::from(0)).expect("writable");
        assert_eq!(store.get("flag"), Some(Value::from(false)));
    }

    #[test]
    fn incompatible_boolean_writes_fail_and_leave_the_dependency_alone() {
        let store = store();
        store.set("flag", Value::from(true)).expect("plain set");
        let cell = Derivation::new(alias("flag"));

        let err = cell.set(&store, Value::from("yes")).expect_err("mismatch");
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(store.get("flag"), Some(Value::from(true)));

        let err = cell.set(&store, Value::Null).expect_err("mismatch");
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(store.get("flag"), Some(Value::from(true)));
    }

    #[test]
    fn other_typed_dependencies_take_the_string_form() {
        let store = store();
        store.set("label", Value::from("old")).expect("plain set");
        let cell = Derivation::new(alias("label"));

        cell.set(&store, Value::from(3.5)).expect("writable");
        assert_eq!(store.get("label"), Some(Value::from("3.5")));
    }

    #[test]
    fn multi_key_derivations_are_read_only() {
        let store = store();
        let cell = Derivation::new(vector_sum(args!["a", "b"]).expect("two arguments"));

        let err = cell.set(&store, Value::from(1.0)).expect_err("read-only");
        assert_eq!(err, Error::ReadOnly { deps: 2 });
    }
}
