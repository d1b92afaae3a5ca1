//! Keyed Store and Context Interface
//!
//! [`Context`] is the capability interface the derivation engine consumes:
//! keyed get/set access plus per-key change notification. [`Store`] is the
//! provided in-memory implementation hosting both plain values and
//! installed derivations.
//!
//! # Change Propagation
//!
//! Setting a plain key fires the key's watchers (which is how installed
//! derivations get marked dirty), then walks every installed property
//! whose dependency set contains the key and notifies its key in turn, so
//! chains of derivations invalidate transitively. The walk is synchronous
//! and cycle-guarded with a visited set.
//!
//! Watcher lists are snapshotted before callbacks run, so callbacks may
//! freely read the store or register further watchers.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::Error;
use crate::reactive::derivation::Derivation;
use crate::reactive::descriptor::Descriptor;
use crate::value::Value;

/// Unique identifier for a change watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatcherId(u64);

impl WatcherId {
    /// Generate a new unique watcher ID.
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Host capability interface consumed by the derivation engine.
///
/// The engine needs exactly three things from a host: read a value by
/// key, write a value by key, and be told when a key's value changes.
pub trait Context: Send + Sync {
    /// Current value at `key`, or None if absent. Reading an installed
    /// derivation evaluates it.
    fn get(&self, key: &str) -> Option<Value>;

    /// Replace the value at `key`. Writing to an installed derivation
    /// runs its write-back path, which can fail.
    fn set(&self, key: &str, value: Value) -> Result<(), Error>;

    /// Register a callback invoked whenever the value at `key` changes.
    fn on_change(&self, key: &str, callback: Box<dyn Fn() + Send + Sync>) -> WatcherId;

    /// Remove a previously registered watcher.
    fn remove_watcher(&self, key: &str, id: WatcherId);
}

/// In-memory keyed store hosting plain values and installed derivations.
pub struct Store {
    /// Plain property values, in insertion order.
    values: RwLock<IndexMap<String, Value>>,

    /// Installed derivations, keyed by property name. These shadow plain
    /// values of the same name.
    derived: RwLock<IndexMap<String, Derivation>>,

    /// Watcher subscriptions made on behalf of installed derivations,
    /// recorded so uninstall can remove them.
    subscriptions: RwLock<IndexMap<String, Vec<(String, WatcherId)>>>,

    /// Per-key watcher lists.
    watchers: DashMap<String, Vec<(WatcherId, Callback)>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(IndexMap::new()),
            derived: RwLock::new(IndexMap::new()),
            subscriptions: RwLock::new(IndexMap::new()),
            watchers: DashMap::new(),
        }
    }

    /// Install a derivation descriptor as property `key`.
    ///
    /// Subscribes a dirty marker for every dependency key, so any change
    /// to a tracked key invalidates the cell before its next read. The
    /// returned handle shares state with the installed cell.
    pub fn install(&self, key: impl Into<String>, descriptor: Descriptor) -> Derivation {
        let key = key.into();
        let derivation = Derivation::new(descriptor);

        let mut recorded = Vec::new();
        for dep in derivation.dependent_keys() {
            let cell = derivation.clone();
            let id = self.on_change(dep, Box::new(move || cell.mark_dirty()));
            recorded.push((dep.clone(), id));
        }

        debug!(
            key = %key,
            deps = derivation.dependent_keys().len(),
            "installed derivation"
        );
        self.subscriptions.write().insert(key.clone(), recorded);
        self.derived.write().insert(key, derivation.clone());
        derivation
    }

    /// Remove an installed derivation and its watcher subscriptions.
    /// Returns the removed cell, if any.
    pub fn uninstall(&self, key: &str) -> Option<Derivation> {
        if let Some(recorded) = self.subscriptions.write().shift_remove(key) {
            for (dep, id) in recorded {
                self.remove_watcher(&dep, id);
            }
        }
        self.derived.write().shift_remove(key)
    }

    /// Look up an installed derivation handle.
    pub fn derivation(&self, key: &str) -> Option<Derivation> {
        self.derived.read().get(key).cloned()
    }

    /// Notify watchers of `key` and, transitively, of every installed
    /// property depending on it.
    fn notify(&self, key: &str) {
        let mut visited = HashSet::new();
        self.notify_inner(key, &mut visited);
    }

    fn notify_inner(&self, key: &str, visited: &mut HashSet<String>) {
        if !visited.insert(key.to_owned()) {
            return;
        }

        // Snapshot so callbacks can read the store or subscribe.
        let callbacks: Vec<Callback> = self
            .watchers
            .get(key)
            .map(|entry| entry.iter().map(|(_, callback)| callback.clone()).collect())
            .unwrap_or_default();
        for callback in callbacks {
            callback();
        }

        let dependents: Vec<String> = self
            .derived
            .read()
            .iter()
            .filter(|(_, derivation)| derivation.dependent_keys().contains(key))
            .map(|(name, _)| name.clone())
            .collect();
        for dependent in dependents {
            self.notify_inner(&dependent, visited);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Context for Store {
    fn get(&self, key: &str) -> Option<Value> {
        // Clone the cell out so no map lock is held while it evaluates
        // back through this store.
        let derivation = self.derived.read().get(key).cloned();
        if let Some(derivation) = derivation {
            return Some(derivation.get(self));
        }
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        let derivation = self.derived.read().get(key).cloned();
        if let Some(derivation) = derivation {
            return derivation.set(self, value);
        }

        self.values.write().insert(key.to_owned(), value);
        self.notify(key);
        Ok(())
    }

    fn on_change(&self, key: &str, callback: Box<dyn Fn() + Send + Sync>) -> WatcherId {
        let id = WatcherId::new();
        self.watchers
            .entry(key.to_owned())
            .or_default()
            .push((id, Arc::from(callback)));
        id
    }

    fn remove_watcher(&self, key: &str, id: WatcherId) {
        if let Some(mut entry) = self.watchers.get_mut(key) {
            entry.retain(|(watcher, _)| *watcher != id);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
