//! One-time registration pass and run-time queries.

use std::collections::BTreeMap;

use tola_shape::registry::{Registry, TypeInfo};
use tola_shape::{type_info, CallShape, Introspect, IntrospectError, RebindRule, ShapeClass};

#[derive(Introspect)]
#[introspect(call = fn(i32) -> i32, call = fn(&'static str) -> i32)]
struct Overloaded;

#[derive(Introspect)]
#[introspect(function_type = fn(u8, u8, u8) -> u8, arity_value = 1)]
struct Curried;

fn registry() -> Registry {
    Registry::builder()
        .register(type_info!(Vec<u8>))
        .register(type_info!(BTreeMap<String, u32>))
        .register(type_info!((u8, u8)))
        .register(type_info!(String))
        .register(type_info!(fn(i32, i32) -> i32, callable))
        .register(type_info!(Curried, callable))
        .register(type_info!(Overloaded))
        .build()
}

#[test]
fn test_lookup_and_classify() {
    let registry = registry();
    assert_eq!(registry.len(), 7);
    assert_eq!(registry.classify::<Vec<u8>>().unwrap().shape, ShapeClass::Sequence);
    assert_eq!(
        registry.classify::<BTreeMap<String, u32>>().unwrap().shape,
        ShapeClass::Associative
    );
    assert_eq!(registry.classify::<(u8, u8)>().unwrap().shape, ShapeClass::Pair);
    assert!(registry.detect::<BTreeMap<String, u32>>("mapped_type").unwrap());
    assert!(!registry.detect::<Vec<u8>>("key_type").unwrap());
}

#[test]
fn test_unknown_capability_name() {
    let registry = registry();
    assert_eq!(
        registry.detect::<Vec<u8>>("keytype"),
        Err(IntrospectError::UnknownCapability("keytype".to_string()))
    );
}

#[test]
fn test_unregistered_type() {
    let registry = registry();
    assert!(matches!(
        registry.get::<u64>(),
        Err(IntrospectError::NotRegistered("u64"))
    ));
}

#[test]
fn test_signatures() {
    let registry = registry();
    let sig = registry.signature::<fn(i32, i32) -> i32>().unwrap();
    assert_eq!(sig.arity(), 2);
    assert_eq!(sig.return_type(), "i32");
    assert_eq!(sig.to_string(), "fn(i32, i32) -> i32");

    let curried = registry.get::<Curried>().unwrap();
    assert_eq!(curried.arity(), Ok(1));
    assert_eq!(curried.signature().map(|s| s.arity()), Ok(3));
    assert_eq!(curried.call_shape(), CallShape::Declared);
}

#[test]
fn test_indeterminate_callable() {
    let registry = registry();
    let info = registry.get::<Overloaded>().unwrap();
    assert!(info.classification().is_callable());
    match info.signature() {
        Err(IntrospectError::IndeterminateCallable { entity, overloads }) => {
            assert!(entity.ends_with("Overloaded"));
            assert_eq!(overloads, 2);
        }
        other => panic!("expected IndeterminateCallable, got {other:?}"),
    }
    assert!(matches!(
        info.drop_leading(0),
        Err(IntrospectError::IndeterminateCallable { .. })
    ));
}

#[test]
fn test_not_callable() {
    let registry = registry();
    assert!(matches!(
        registry.signature::<Vec<u8>>(),
        Err(IntrospectError::NotCallable { .. })
    ));
}

#[test]
fn test_drop_leading_domain() {
    let registry = registry();
    let info = registry.get::<fn(i32, i32) -> i32>().unwrap();
    assert_eq!(info.drop_leading(0).unwrap().arity(), 2);
    assert_eq!(info.drop_leading(2).unwrap().to_string(), "fn() -> i32");
    assert_eq!(
        info.drop_leading(3),
        Err(IntrospectError::OutOfDomainDrop {
            requested: 3,
            arity: 2
        })
    );
}

#[test]
fn test_stream_flags() {
    let registry = registry();
    let string = registry.get::<String>().unwrap();
    assert!(string.can_insert());
    assert!(string.can_extract());
    let vec = registry.get::<Vec<u8>>().unwrap();
    assert!(!vec.can_insert());
    assert!(!vec.can_extract());
}

#[test]
fn test_snapshot_matches_compile_time() {
    let info = TypeInfo::of::<BTreeMap<String, u32>>();
    assert_eq!(info.rebind_rule(), RebindRule::Identity);
    assert_eq!(info.slots(), None);
    assert!(info.detect_typedef(tola_shape::CapabilityName::KeyType));
}

// The only test touching the global slot.
#[test]
fn test_global_install_once() {
    let installed = registry().install().unwrap();
    assert_eq!(installed.len(), 7);
    assert!(Registry::global().is_some());
    assert_eq!(
        registry().install().unwrap_err(),
        IntrospectError::AlreadyInstalled
    );
}
