//! Dependency Collector
//!
//! Scans an argument list and produces the subset of named references that
//! must trigger recomputation when their value changes. The result becomes
//! the invalidation trigger set of the derivation built from those
//! arguments.

use indexmap::IndexSet;

use crate::reactive::argument::Argument;

/// Collect the trackable dependency keys of an argument list.
///
/// Order follows first appearance, duplicates collapse. Rules per
/// argument:
///
/// - a key without an embedded space is a dependency;
/// - a key with an embedded space is a literal string and is excluded;
/// - literals of every kind are excluded;
/// - a composite derivation contributes all of its own dependency keys.
///   Flattening is one level deep: composites are only as flat as the key
///   set they computed for themselves at construction.
pub fn dependent_keys(args: &[Argument]) -> IndexSet<String> {
    let mut keys = IndexSet::new();
    for arg in args {
        match arg {
            Argument::Key(key) if !key.contains(' ') => {
                keys.insert(key.clone());
            }
            Argument::Key(_) | Argument::Literal(_) => {}
            Argument::Derived(descriptor) => {
                keys.extend(descriptor.dependent_keys().iter().cloned());
            }
        }
    }
    keys
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::macros::{alias, vector_sum};
    use crate::value::Value;

    fn keys_of(args: &[Argument]) -> Vec<String> {
        dependent_keys(args).into_iter().collect()
    }

    #[test]
    fn plain_keys_are_collected_in_order() {
        let args = args!["a", "b", "c"];
        assert_eq!(keys_of(&args), vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicates_collapse() {
        let args = args!["d", "d", "d", "d", "d"];
        assert_eq!(keys_of(&args), vec!["d"]);
    }

    #[test]
    fn literals_are_excluded() {
        let args = args!["a", 2, true, Value::Null, vec![1.0, 2.0], "b"];
        assert_eq!(keys_of(&args), vec!["a", "b"]);
    }

    #[test]
    fn keys_with_spaces_are_excluded() {
        let args = args!["a", "not a key", "b"];
        assert_eq!(keys_of(&args), vec!["a", "b"]);
    }

    #[test]
    fn composites_contribute_their_own_keys() {
        let inner = vector_sum(args!["x", "y"]).expect("two arguments");
        let args = args!["a", inner, "y"];
        assert_eq!(keys_of(&args), vec!["a", "x", "y"]);
    }

    #[test]
    fn aliases_contribute_their_target() {
        let args = args![alias("b"), "a"];
        assert_eq!(keys_of(&args), vec!["b", "a"]);
    }
}
