//! Macro Registry
//!
//! An explicit registry mapping macro names to descriptor constructors.
//! Hosts populate one at startup (or take [`MacroRegistry::standard`])
//! and look constructors up by name when wiring properties from
//! configuration. Nothing is registered ambiently.

use indexmap::IndexMap;

use crate::error::Error;
use crate::macros::{vector_product, vector_sum};
use crate::reactive::{Argument, Descriptor};

/// Library version, for hosts that report it.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A descriptor constructor: argument list in, installable blueprint out.
pub type MacroFn = fn(Vec<Argument>) -> Result<Descriptor, Error>;

/// Registry of named macro constructors.
#[derive(Default)]
pub struct MacroRegistry {
    macros: IndexMap<String, MacroFn>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self {
            macros: IndexMap::new(),
        }
    }

    /// Registry pre-loaded with the standard vector macros.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("vector-sum", vector_sum);
        registry.register("vector-product", vector_product);
        registry
    }

    /// Register a constructor under `name`. An already-registered name is
    /// kept; returns whether the registration took effect.
    pub fn register(&mut self, name: impl Into<String>, constructor: MacroFn) -> bool {
        let name = name.into();
        if self.macros.contains_key(&name) {
            return false;
        }
        self.macros.insert(name, constructor);
        true
    }

    /// Look up a constructor by name.
    pub fn get(&self, name: &str) -> Option<MacroFn> {
        self.macros.get(name).copied()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.macros.keys().map(String::as_str)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
