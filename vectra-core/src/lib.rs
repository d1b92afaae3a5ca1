//! Vectra Core
//!
//! This crate provides the core runtime for the Vectra reactive vector
//! derivation library. It implements:
//!
//! - A broadcast reducer combining mixed scalar/vector argument lists
//! - Dependency collection and lazily cached, invalidation-tracked
//!   derivations
//! - A keyed store with per-key change notification
//! - The standard macros: vector-sum, vector-product, alias and the
//!   parse-through family
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `value`: the dynamic value domain shared with the host
//! - `reactive`: resolution, dependency collection, reduction, the
//!   derivation cell and the store
//! - `macros`: descriptor constructors for the standard derivations
//! - `registry`: explicit name-to-constructor registry for hosts
//!
//! # Example
//!
//! ```rust,ignore
//! use vectra_core::{args, vector_sum, Context, Store, Value};
//!
//! let store = Store::new();
//! store.set("a", Value::from(vec![2.0, 5.0]))?;
//! store.set("b", Value::from(7.0))?;
//!
//! // Install a derived property: the vector sum of `a` and `b`.
//! store.install("total", vector_sum(args!["a", "b"])?);
//! assert_eq!(store.get("total"), Some(Value::from(vec![9.0, 12.0])));
//!
//! // Changing a tracked key invalidates the cache; the next read
//! // recomputes.
//! store.set("b", Value::from(10.0))?;
//! assert_eq!(store.get("total"), Some(Value::from(vec![12.0, 15.0])));
//! ```

pub mod error;
pub mod macros;
pub mod reactive;
pub mod registry;
pub mod value;

pub use error::Error;
pub use macros::{alias, parse_float, parse_int, parsed, vector_product, vector_sum};
pub use reactive::{
    dependent_keys, reduce, resolve, Argument, CacheState, Combine, Context, Derivation,
    Descriptor, Parse, Store, WatcherId,
};
pub use registry::{MacroRegistry, VERSION};
pub use value::{retain_by_kind, Value, ValueKind, Vector};
