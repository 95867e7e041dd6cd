//! Name cache behaviour seen through the converter.

use crate::*;
use std::sync::Arc;
use std::thread;

#[test]
fn test_name_cache_built_on_first_conversion() {
    let f = Fixture::new();
    let registry = f.converter.registry();
    assert_eq!(registry.rebuild_count(), 0);

    f.converter.to_plain(&f.the_error("kek")).unwrap();
    assert_eq!(registry.rebuild_count(), 1);

    f.converter.to_json(&f.the_struct(1, 2)).unwrap();
    f.converter.to_plain(&f.the_enum("First")).unwrap();
    assert_eq!(registry.rebuild_count(), 1);
}

#[test]
fn test_types_registered_later_are_found() {
    let f = Fixture::new();
    f.converter.to_plain(&f.the_error("kek")).unwrap();

    let late = f
        .converter
        .registry()
        .define(|c| c.define_enum("Test.Late", [("Only", 0)]))
        .unwrap();
    let value = Value::Enum(EnumValue::new(late, "Only", 0));

    let plain = f.converter.to_plain(&value).unwrap();
    assert_eq!(as_json(&plain), json!({"@ice-type": "Test.Late", "value": "Only"}));
    assert_eq!(f.converter.from_plain(&plain).unwrap(), value);
    assert_eq!(f.converter.registry().rebuild_count(), 2);
}

#[test]
fn test_reset_caches() {
    let f = Fixture::new();
    f.converter.to_json(&f.the_struct(1, 2)).unwrap();
    assert!(f.converter.shape_count() >= 2);

    f.converter.reset_caches();
    assert_eq!(f.converter.shape_count(), 0);
    assert_eq!(f.converter.registry().rebuild_count(), 0);

    let plain = f.converter.to_plain(&f.the_struct(1, 2)).unwrap();
    assert_eq!(f.converter.from_plain(&plain).unwrap(), f.the_struct(1, 2));
}

#[test]
fn test_concurrent_conversions_share_caches() {
    let f = Arc::new(Fixture::new());
    let expected = f.converter.to_json(&f.the_struct(42, 24)).unwrap();
    f.converter.reset_caches();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let f = Arc::clone(&f);
            thread::spawn(move || {
                (0..50)
                    .map(|_| f.converter.to_json(&f.the_struct(42, 24)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for text in handle.join().expect("thread should not panic") {
            assert_eq!(text, expected);
        }
    }
    assert_eq!(f.converter.shape_count(), 2);
}

#[test]
fn test_ice_ids_of_fixture_hierarchy() {
    let f = Fixture::new();
    let registry = f.converter.registry();
    assert_eq!(
        registry.ice_ids(f.rich_class).unwrap(),
        vec!["::Test::RichClass", "::Test::SmallClass"]
    );
    assert_eq!(
        registry.ice_ids(f.catch_error).unwrap(),
        vec!["::Test::Keywords::Catch"]
    );
}
