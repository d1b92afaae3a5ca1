//! Alias
//!
//! A derivation that reads and writes through another key unchanged. The
//! main use is composition: an alias carries its target as a dependency
//! key, so reductions over aliased properties invalidate correctly.

use crate::reactive::Descriptor;

/// Build a derivation aliasing `key`.
pub fn alias(key: impl Into<String>) -> Descriptor {
    Descriptor::alias(key)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
