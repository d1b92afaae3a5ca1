//! Vector Product
//!
//! A derivation whose value is the element-wise product of its arguments.
//! Unlike the sum, a missing operand is not an identity here: it zeroes
//! the slot. The asymmetry is deliberate and tested.

use crate::error::Error;
use crate::reactive::{Argument, Descriptor};

/// Multiplicative combine policy: a missing operand on either side
/// zeroes the slot.
fn multiply(prev: Option<f64>, item: Option<f64>) -> Option<f64> {
    match (prev, item) {
        (Some(prev), Some(item)) => Some(prev * item),
        _ => Some(0.0),
    }
}

/// Build a derivation that is the vector product of its arguments.
/// Arguments can be vectors, scalars, property keys, or other
/// derivations.
///
/// Vector arguments need not share a length; the result has the length of
/// the longest one, and slots past a shorter argument's end are zeroed. A
/// scalar argument multiplies every element.
///
/// ```rust,ignore
/// let store = Store::new();
/// store.set("a", Value::from(vec![2.0, 5.0]))?;
/// store.set("b", Value::from(7.0))?;
///
/// store.install("e", vector_product(args!["a", "b"])?);   // [14, 35]
/// store.install("g", vector_product(args!["a"])?);        // [2, 5]
/// ```
pub fn vector_product(args: Vec<Argument>) -> Result<Descriptor, Error> {
    Descriptor::reduce(args, multiply)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::macros::alias;
    use crate::reactive::{Context, Store};
    use crate::value::Value;

    fn fixture() -> Store {
        let store = Store::new();
        store
            .set("a", Value::from(vec![1.0, 2.0, 3.0, 4.0]))
            .expect("plain set");
        store.set("b", Value::from(1.0)).expect("plain set");
        store
            .set("c", Value::from(vec![2.0, 2.0, 2.0]))
            .expect("plain set");
        store.set("d", Value::from(vec![1.0; 6])).expect("plain set");
        store.set("e", Value::Null).expect("plain set");
        store.install("aa", alias("a"));
        store
    }

    fn read(store: &Store, key: &str) -> Vec<f64> {
        match store.get(key) {
            Some(Value::Vector(v)) => v.to_vec(),
            other => panic!("expected a vector at {key}, got {other:?}"),
        }
    }

    #[test]
    fn multiplies_the_same_array_five_times() {
        let store = fixture();
        store.install(
            "out",
            vector_product(args!["d", "d", "d", "d", "d"]).expect("arguments"),
        );
        assert_eq!(read(&store, "out"), vec![1.0; 6]);
    }

    #[test]
    fn a_null_value_zeroes_every_slot() {
        let store = fixture();
        store.install(
            "out",
            vector_product(args!["a", Value::Null, "a"]).expect("arguments"),
        );
        assert_eq!(read(&store, "out"), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn multiplies_an_array_with_a_composite_value_then_another_array() {
        let store = fixture();
        store.install(
            "out",
            vector_product(args!["a", alias("b"), "a"]).expect("arguments"),
        );
        assert_eq!(read(&store, "out"), vec![1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn multiplies_an_array_with_a_single_value_then_another_array() {
        let store = fixture();
        store.install(
            "out",
            vector_product(args!["a", 2, "a"]).expect("arguments"),
        );
        assert_eq!(read(&store, "out"), vec![2.0, 8.0, 18.0, 32.0]);
    }

    #[test]
    fn multiplies_a_single_null_value_to_an_empty_vector() {
        let store = fixture();
        store.install("out", vector_product(args!["e"]).expect("arguments"));
        assert_eq!(read(&store, "out"), Vec::<f64>::new());
    }

    #[test]
    fn multiplies_an_array_with_itself_passed_in() {
        let store = fixture();
        store.install(
            "out",
            vector_product(args![alias("aa"), "aa"]).expect("arguments"),
        );
        assert_eq!(read(&store, "out"), vec![1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn multiplies_an_array_with_itself_through_an_alias() {
        let store = fixture();
        store.install(
            "out",
            vector_product(args!["aa", "aa"]).expect("arguments"),
        );
        assert_eq!(read(&store, "out"), vec![1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn multiplies_an_array_with_a_larger_then_a_smaller_array() {
        let store = fixture();
        store.install(
            "out",
            vector_product(args!["a", "d", "c"]).expect("arguments"),
        );
        assert_eq!(read(&store, "out"), vec![2.0, 4.0, 6.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn multiplies_an_array_with_a_smaller_array() {
        let store = fixture();
        store.install("out", vector_product(args!["a", "c"]).expect("arguments"));
        assert_eq!(read(&store, "out"), vec![2.0, 4.0, 6.0, 0.0]);
    }

    #[test]
    fn multiplies_an_array_with_a_larger_array() {
        let store = fixture();
        store.install("out", vector_product(args!["a", "d"]).expect("arguments"));
        assert_eq!(read(&store, "out"), vec![1.0, 2.0, 3.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn returns_a_single_array_argument_as_is() {
        let store = fixture();
        store.install("out", vector_product(args!["a"]).expect("arguments"));
        assert_eq!(read(&store, "out"), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn returns_a_single_value_as_a_one_element_vector() {
        let store = fixture();
        store.install("out", vector_product(args!["b"]).expect("arguments"));
        assert_eq!(read(&store, "out"), vec![1.0]);
    }

    #[test]
    fn multiplies_an_array_with_itself() {
        let store = fixture();
        store.install("out", vector_product(args!["c", "c"]).expect("arguments"));
        assert_eq!(read(&store, "out"), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn rejects_an_empty_argument_list() {
        assert!(matches!(vector_product(Vec::new()), Err(Error::Arity)));
    }
}
