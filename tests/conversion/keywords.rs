//! Reserved-word names on types, fields and enumerators.

use crate::*;

fn keyword_object(f: &Fixture) -> Value {
    Value::record([
        ("await", f.construct(f.await_struct, vec![("_for", Value::from(1))])),
        ("break", f.construct(f.break_class, vec![])),
        ("try", Value::Enum(EnumValue::new(f.keyword_enum, "_TRY", 0))),
        ("catch", f.construct(f.catch_error, vec![("_finally", Value::from(true))])),
    ])
}

#[test]
fn test_keywords_plain_form() {
    let f = Fixture::new();
    let plain = f.converter.to_plain(&keyword_object(&f)).unwrap();

    assert_eq!(
        as_json(&plain),
        json!({
            "await": {"@ice-type": "Test.Keywords.Await", "for": 1},
            "break": {"@ice-type": "Test.Keywords.Break", "case": ""},
            "try": {"@ice-type": "Test.Keywords.E", "value": "TRY"},
            "catch": {"@ice-type": "Test.Keywords.Catch", "finally": true}
        })
    );
}

#[test]
fn test_keywords_round_trip() {
    let f = Fixture::new();
    let value = keyword_object(&f);
    let plain = f.converter.to_plain(&value).unwrap();
    assert_eq!(f.converter.from_plain(&plain).unwrap(), value);
}

#[test]
fn test_keywords_json_parity() {
    let f = Fixture::new();
    let value = keyword_object(&f);
    let plain = f.converter.to_plain(&value).unwrap();
    assert_eq!(f.converter.to_json(&value).unwrap(), stringify(&plain).unwrap());
}

#[test]
fn test_marked_type_names_resolve_both_ways() {
    let f = Fixture::new();
    let registry = f.converter.registry();

    assert_eq!(&*registry.name_of(f.await_struct).unwrap(), "Test.Keywords.Await");
    assert_eq!(registry.constructor_of("Test.Keywords.Await").unwrap().key(), f.await_struct);
    assert_eq!(registry.constructor_of("Test.Keywords._Await").unwrap().key(), f.await_struct);
    assert_eq!(
        registry.entry(f.catch_error).unwrap().ice_id(),
        "::Test::Keywords::Catch"
    );
}

#[test]
fn test_reserved_check_is_case_insensitive_on_decode() {
    let f = Fixture::new();
    // "TRY" lower-cases to a reserved word, so the marked enumerator is found
    let plain = Value::from(json!({"@ice-type": "Test.Keywords.E", "value": "TRY"}));
    assert_eq!(
        f.converter.from_plain(&plain).unwrap(),
        Value::Enum(EnumValue::new(f.keyword_enum, "_TRY", 0))
    );

    // Field names: "For" is reserved when lower-cased and becomes "_For"
    let plain = Value::from(json!({"@ice-type": "Test.Keywords.Await", "For": 2}));
    let value = f.converter.from_plain(&plain).unwrap();
    let instance = value.as_instance().unwrap();
    assert_eq!(instance.get("_For"), Some(&Value::from(2)));
    assert_eq!(instance.get("_for"), Some(&Value::from(0)));
}

#[test]
fn test_leading_marker_always_stripped_on_encode() {
    init_tracing();
    let registry = Registry::new();
    let key = registry
        .define(|c| c.define_struct("Test._Private", [FieldDef::new("_count", 0)]))
        .unwrap();
    let converter = Converter::new(std::sync::Arc::new(registry));

    let value = converter
        .registry()
        .entry(key)
        .and_then(|entry| entry.construct())
        .unwrap();
    let plain = converter.to_plain(&value).unwrap();
    assert_eq!(as_json(&plain), json!({"@ice-type": "Test.Private", "count": 0}));

    // "count" is not reserved, so decoding does not restore the marker
    let rebuilt = converter.from_plain(&plain).unwrap();
    assert_eq!(rebuilt.as_instance().unwrap().get("count"), Some(&Value::from(0)));
}

#[test]
fn test_marker_spellings_cannot_share_a_plain_name() {
    init_tracing();
    let registry = Registry::new();
    let key = registry
        .define(|c| c.define_struct("Demo.Await", [FieldDef::new("a", 1)]))
        .unwrap();
    let clash = registry.define(|c| c.define_struct("Demo._Await", [FieldDef::new("b", 2)]));
    assert!(matches!(clash, Err(Error::Definition(_))));

    let converter = Converter::new(std::sync::Arc::new(registry));
    let value = converter.registry().entry(key).and_then(|e| e.construct()).unwrap();
    let plain = converter.to_plain(&value).unwrap();
    assert_eq!(as_json(&plain), json!({"@ice-type": "Demo.Await", "a": 1}));
    assert_eq!(converter.from_plain(&plain).unwrap(), value);
}
