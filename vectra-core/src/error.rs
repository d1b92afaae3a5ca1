//! Error Types
//!
//! Every fallible operation in the crate surfaces one of these variants.
//! Null and missing values are never errors anywhere in resolution or
//! reduction; they are ordinary values with policy-defined combine
//! behavior.

use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A macro or reduction was invoked with an empty argument list.
    /// Raised at construction time; the derivation is never created.
    #[error("at least one argument is required")]
    Arity,

    /// A write-back value could not be coerced to the dependency's
    /// boolean type. The dependency is left unchanged.
    #[error("cannot transform value of type {kind} into a boolean")]
    TypeMismatch { kind: ValueKind },

    /// A write was attempted on a derivation that does not wrap exactly
    /// one dependency key.
    #[error("cannot write through a derivation with {deps} dependency keys")]
    ReadOnly { deps: usize },
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
