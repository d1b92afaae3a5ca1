//! Reactive Derivation Engine
//!
//! This module implements the core machinery behind the vector macros:
//! argument resolution, dependency collection, the broadcast reducer and
//! the cached derivation cell, together with the keyed store the cells are
//! installed on.
//!
//! # Concepts
//!
//! ## Arguments
//!
//! A macro call takes a mixed list of literals, named references and
//! composite derivations. Named references are resolved against the host
//! context at evaluation time and tracked for invalidation; literals are
//! inert.
//!
//! ## Broadcast Reduction
//!
//! Resolved arguments are folded left to right into a single vector.
//! Scalars broadcast across every slot; vectors of different lengths are
//! reconciled by padding the seed, so argument order is observable in the
//! padding fill even where the arithmetic itself is associative.
//!
//! ## Derivations
//!
//! A derivation is a lazily computed, cached value tied to a dependency
//! key set. It recomputes on first read and after any tracked key changes,
//! and returns its cached value otherwise. Derivations wrapping exactly
//! one dependency key also accept writes, forwarded to the underlying key
//! with type-respecting coercion.
//!
//! # Implementation Notes
//!
//! Change tracking is explicit rather than introspective: the store keeps a
//! per-key watcher list, each installed derivation subscribes a dirty
//! marker for every key it depends on, and `Store::set` walks the
//! dependents synchronously. There is no ambient tracking context; a
//! derivation's key set is fixed when its descriptor is built.

mod argument;
mod deps;
mod derivation;
mod descriptor;
mod reduce;
mod resolve;
mod store;

pub use argument::Argument;
pub use deps::dependent_keys;
pub use derivation::{CacheState, Derivation};
pub use descriptor::{Descriptor, Parse};
pub use reduce::{reduce, Combine};
pub use resolve::resolve;
pub use store::{Context, Store, WatcherId};
