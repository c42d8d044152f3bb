//! Shape classification over stand-ins and std types.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, LinkedList, VecDeque};

use tola_shape::prelude::*;
use tola_shape::{is_associative_like, is_sequence_like, Classification, HasCallOperator};

/// Minimal dynamic-array stand-in: the nine sequence members.
#[derive(Introspect)]
#[introspect(value_type = T, reference = &'a mut T, const_reference = &'a T)]
#[introspect(iterator = std::slice::IterMut<'a, T>, const_iterator = std::slice::Iter<'a, T>)]
#[introspect(pointer = *mut T, const_pointer = *const T)]
#[introspect(size_type = usize, difference_type = isize)]
struct Array<T>(Vec<T>);

/// The same stand-in plus `key_type` and `mapped_type`.
#[derive(Introspect)]
#[introspect(value_type = (K, V), reference = &'a mut (K, V), const_reference = &'a (K, V))]
#[introspect(iterator = std::slice::IterMut<'a, (K, V)>)]
#[introspect(const_iterator = std::slice::Iter<'a, (K, V)>)]
#[introspect(pointer = *mut (K, V), const_pointer = *const (K, V))]
#[introspect(size_type = usize, difference_type = isize)]
#[introspect(key_type = K, mapped_type = V)]
struct Table<K, V>(Vec<(K, V)>);

/// Missing `difference_type`.
#[derive(Introspect)]
#[introspect(value_type = T, reference = &'a mut T, const_reference = &'a T)]
#[introspect(iterator = std::slice::IterMut<'a, T>, const_iterator = std::slice::Iter<'a, T>)]
#[introspect(pointer = *mut T, const_pointer = *const T)]
#[introspect(size_type = usize)]
struct AlmostArray<T>(Vec<T>);

#[derive(Introspect)]
#[introspect(call = fn(u32) -> bool)]
struct Filter;

#[test]
fn test_sequence_stand_in() {
    assert!(holds::<IsSequenceLike, Array<u8>>());
    assert!(!holds::<IsAssociativeLike, Array<u8>>());
}

#[test]
fn test_key_and_mapped_flip_associative() {
    assert!(holds::<IsSequenceLike, Table<u8, u8>>());
    assert!(holds::<IsAssociativeLike, Table<u8, u8>>());
}

#[test]
fn test_single_absence_disqualifies() {
    assert!(!holds::<IsSequenceLike, AlmostArray<u8>>());
    assert_eq!(classify::<AlmostArray<u8>>().shape, ShapeClass::None);
}

#[test]
fn test_products() {
    assert!(holds::<IsPairLike, (u8, String)>());
    assert!(!holds::<IsTupleLike, (u8, String)>());
    assert!(holds::<IsTupleLike, (u8, String, char)>());
    assert!(!holds::<IsPairLike, (u8, String, char)>());
    // Product recognition is structural, never by member probing.
    assert!(!holds::<IsPairLike, Table<u8, u8>>());
}

#[test]
fn test_std_collections() {
    assert!(holds::<IsSequenceLike, Vec<u8>>());
    assert!(holds::<IsSequenceLike, VecDeque<u8>>());
    assert!(holds::<IsSequenceLike, LinkedList<u8>>());
    assert!(holds::<IsSequenceLike, String>());
    assert!(holds::<IsSequenceLike, [u8; 4]>());
    assert!(holds::<IsSequenceLike, [u8]>());
    assert!(holds::<IsAssociativeLike, BTreeMap<u8, u8>>());
    assert!(holds::<IsAssociativeLike, HashMap<u8, u8>>());
    assert!(holds::<IsSequenceLike, BTreeSet<u8>>());
    assert!(!holds::<IsAssociativeLike, BTreeSet<u8>>());
    assert!(!holds::<IsSequenceLike, BinaryHeap<u8>>());
}

#[test]
fn test_references_classify_like_pointee() {
    assert_eq!(classify::<&Vec<u8>>(), classify::<Vec<u8>>());
    assert_eq!(classify::<&mut BTreeMap<u8, u8>>(), classify::<BTreeMap<u8, u8>>());
    assert_eq!(classify::<Box<(u8, u8)>>().shape, ShapeClass::Pair);
}

#[test]
fn test_associative_implies_sequence() {
    fn check<T: Introspect + ?Sized>() {
        if holds::<IsAssociativeLike, T>() {
            assert!(holds::<IsSequenceLike, T>());
        }
    }
    check::<Array<u8>>();
    check::<Table<u8, u8>>();
    check::<BTreeMap<u8, u8>>();
    check::<HashMap<u8, u8>>();
    check::<BTreeSet<u8>>();
    check::<(u8, u8)>();
    check::<u8>();
}

#[test]
fn test_double_negation() {
    fn check<T: Introspect + ?Sized>() {
        assert_eq!(holds::<Not<IsSequenceLike>, T>(), !holds::<IsSequenceLike, T>());
        assert_eq!(holds::<Not<Not<IsSequenceLike>>, T>(), holds::<IsSequenceLike, T>());
    }
    check::<Array<u8>>();
    check::<AlmostArray<u8>>();
    check::<str>();
    check::<(u8, u8, u8)>();
}

#[test]
fn test_negating_a_downstream_predicate() {
    struct IsZeroSized;
    impl<T> Predicate<T> for IsZeroSized {
        const VALUE: bool = std::mem::size_of::<T>() == 0;
    }

    assert!(holds::<IsZeroSized, ()>());
    assert!(holds::<Not<IsZeroSized>, u8>());
    assert!(holds::<Or<IsZeroSized, IsSequenceLike>, Vec<u8>>());
    assert!(!holds::<And<IsZeroSized, IsSequenceLike>, Vec<u8>>());
}

#[test]
fn test_callable_dimension_is_independent() {
    let c = classify::<Filter>();
    assert_eq!(
        c,
        Classification {
            shape: ShapeClass::None,
            callable: true
        }
    );
    assert!(holds::<HasCallOperator, Filter>());
    assert!(holds::<IsCallable, fn(u8)>());
    assert!(!holds::<IsCallable, Vec<u8>>());
}

#[test]
fn test_structural_macros_agree() {
    assert!(is_sequence_like!(Array<u8>));
    assert!(!is_associative_like!(Array<u8>));
    assert!(is_associative_like!(Table<u8, u8>));
    assert!(!is_sequence_like!(AlmostArray<u8>));
}
