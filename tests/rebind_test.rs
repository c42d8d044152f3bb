//! Rebinding: default deleter, declared rule, identity fallback.

use std::marker::PhantomData;

use tola_shape::prelude::*;
use tola_shape::{has_typedef, rebind_rule, HasRebind, IsDefaultDeleter};

/// Allocator-like type that names its own rebinding.
#[derive(Introspect)]
#[introspect(value_type = T, rebind)]
struct Arena<T>(PhantomData<T>);

impl<T> Rebindable for Arena<T> {
    type Other<U> = Arena<U>;
}

/// Plain value type.
#[derive(Introspect)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn test_default_delete_rebinds_its_parameter() {
    assert!(same_type::<Rebound<DefaultDelete<u8>, String>, DefaultDelete<String>>());
    assert!(same_type::<Rebound<DefaultDelete<[u8]>, u64>, DefaultDelete<u64>>());
    assert!(same_type::<Rebound<DefaultDelete<u8>, [u8]>, DefaultDelete<[u8]>>());
    assert_eq!(rebind_rule::<DefaultDelete<u8>>(), RebindRule::DefaultDeleter);
    assert!(holds::<IsDefaultDeleter, DefaultDelete<str>>());
}

#[test]
fn test_declared_rebind() {
    assert!(same_type::<Rebound<Arena<u8>, String>, Arena<String>>());
    assert_eq!(rebind_rule::<Arena<u8>>(), RebindRule::Declared);
    assert!(holds::<HasRebind, Arena<u8>>());
    assert!(has_typedef!(Arena<u8>, rebind));
}

#[test]
fn test_identity_fallback() {
    assert!(same_type::<Rebound<Point, String>, Point>());
    assert!(same_type::<Rebound<i32, String>, i32>());
    assert!(same_type::<Rebound<Vec<u8>, String>, Vec<u8>>());
    assert!(same_type::<Rebound<(u8, u8), String>, (u8, u8)>());
    assert_eq!(rebind_rule::<Point>(), RebindRule::Identity);
    assert!(!holds::<HasRebind, Point>());

    let p = Point { x: 1, y: 2 };
    assert_eq!(p.x + p.y, 3);
}

#[test]
fn test_default_delete_releases() {
    let deleter = DefaultDelete::<String>::default();
    deleter.delete(Box::new(String::from("owned")));
    let copy = deleter;
    assert_eq!(format!("{copy:?}"), format!("{deleter:?}"));
}

#[test]
fn test_std_value_types_rebind_to_themselves() {
    use std::borrow::Cow;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    assert!(same_type::<Rebound<Option<u8>, u16>, Option<u8>>());
    assert!(same_type::<Rebound<Result<u8, String>, u16>, Result<u8, String>>());
    assert!(same_type::<Rebound<Rc<str>, u16>, Rc<str>>());
    assert!(same_type::<Rebound<Arc<Vec<u8>>, u16>, Arc<Vec<u8>>>());
    assert!(same_type::<Rebound<PhantomData<u8>, u16>, PhantomData<u8>>());
    assert!(same_type::<Rebound<Cow<'static, str>, u16>, Cow<'static, str>>());
    assert!(same_type::<Rebound<Duration, u16>, Duration>());
    assert_eq!(rebind_rule::<Option<u8>>(), RebindRule::Identity);
}
