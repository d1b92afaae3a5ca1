//! Derivation Macros
//!
//! Constructors for the installable derivations: the two vector
//! reductions, the alias, and the parse-through family. Each returns a
//! [`Descriptor`](crate::reactive::Descriptor) a host installs on a store
//! or passes as a composite argument to another macro.

mod alias;
mod parse;
mod vector_product;
mod vector_sum;

pub use alias::alias;
pub use parse::{parse_float, parse_int, parsed};
pub use vector_product::vector_product;
pub use vector_sum::vector_sum;
