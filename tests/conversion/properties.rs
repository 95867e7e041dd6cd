//! Generated round-trip and parity properties.

use crate::*;
use proptest::prelude::*;

/// Type keys of the fixture catalog. Registration is deterministic, so keys
/// taken from one fixture are valid in every other.
#[derive(Clone, Copy)]
struct Keys {
    small_class: TypeKey,
    the_struct: TypeKey,
    the_enum: TypeKey,
    the_error: TypeKey,
    rich_class: TypeKey,
    await_struct: TypeKey,
    break_class: TypeKey,
    catch_error: TypeKey,
    keyword_enum: TypeKey,
}

fn keys() -> Keys {
    let f = Fixture::new();
    Keys {
        small_class: f.small_class,
        the_struct: f.the_struct,
        the_enum: f.the_enum,
        the_error: f.the_error,
        rich_class: f.rich_class,
        await_struct: f.await_struct,
        break_class: f.break_class,
        catch_error: f.catch_error,
        keyword_enum: f.keyword_enum,
    }
}

fn fields<const N: usize>(pairs: [(&str, Value); N]) -> Record {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn small_class(keys: Keys, long: i64) -> Value {
    Value::Object(Instance::new(keys.small_class, fields([("longField", long_value(long))])))
}

fn enumerator(keys: Keys, second: bool) -> EnumValue {
    if second {
        EnumValue::new(keys.the_enum, "Second", 1)
    } else {
        EnumValue::new(keys.the_enum, "First", 0)
    }
}

fn the_struct(keys: Keys, long: i64, small: Option<i64>) -> Value {
    let class_field = match small {
        Some(n) => small_class(keys, n),
        None => Value::Null,
    };
    Value::Struct(Instance::new(
        keys.the_struct,
        fields([("longField", long_value(long)), ("classField", class_field)]),
    ))
}

/// A RichClass: inherited `longField` first, then every own field.
fn rich_class(
    keys: Keys,
    long: i64,
    second: bool,
    numbers: Vec<f64>,
    smalls: Vec<i64>,
    dict: Vec<(i32, String)>,
) -> Value {
    let dict: ScalarMap = dict
        .into_iter()
        .map(|(k, v)| (MapKey::from(k), Value::from(v)))
        .collect();
    Value::Object(Instance::new(
        keys.rich_class,
        fields([
            ("longField", long_value(long)),
            ("structField", the_struct(keys, -long, Some(long))),
            ("enumField", Value::Enum(enumerator(keys, second))),
            ("primitiveSeqField", Value::Array(numbers.into_iter().map(Value::from).collect())),
            (
                "smallClassSeqField",
                Value::Array(smalls.into_iter().map(|n| small_class(keys, n)).collect()),
            ),
            ("structSeqField", Value::Null),
            ("primitiveKeyDictField", Value::Map(dict)),
        ]),
    ))
}

/// Instances of registered types: class hierarchy, exceptions and types
/// whose names or fields are reserved words.
fn registered(keys: Keys) -> impl Strategy<Value = Value> {
    prop_oneof![
        (any::<i64>(), proptest::option::of(any::<i64>()))
            .prop_map(move |(long, small)| the_struct(keys, long, small)),
        any::<i64>().prop_map(move |long| small_class(keys, long)),
        (
            any::<i64>(),
            any::<bool>(),
            proptest::collection::vec(number(), 0..3),
            proptest::collection::vec(any::<i64>(), 0..3),
            proptest::collection::vec((any::<i32>(), "\\PC{0,4}"), 0..3),
        )
            .prop_map(move |(long, second, numbers, smalls, dict)| {
                rich_class(keys, long, second, numbers, smalls, dict)
            }),
        "\\PC{0,8}".prop_map(move |s| {
            Value::Exception(Instance::new(keys.the_error, fields([("stringField", Value::from(s))])))
        }),
        number().prop_map(move |n| {
            Value::Struct(Instance::new(keys.await_struct, fields([("_for", Value::from(n))])))
        }),
        "\\PC{0,8}".prop_map(move |s| {
            Value::Object(Instance::new(keys.break_class, fields([("_case", Value::from(s))])))
        }),
        any::<bool>().prop_map(move |b| {
            Value::Exception(Instance::new(keys.catch_error, fields([("_finally", Value::from(b))])))
        }),
        any::<bool>().prop_map(move |other| {
            let (name, ordinal) = if other { ("other", 1) } else { ("_TRY", 0) };
            Value::Enum(EnumValue::new(keys.keyword_enum, name, ordinal))
        }),
    ]
}

// Numbers with short exact decimal forms, so text round trips are exact
fn number() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i32>().prop_map(f64::from),
        any::<i32>().prop_map(|n| f64::from(n) / 8.0),
        Just(9_007_199_254_740_991.0),
    ]
}

fn map_key(keys: Keys) -> impl Strategy<Value = MapKey> {
    prop_oneof![
        "\\PC{0,6}".prop_map(MapKey::from),
        any::<i32>().prop_map(MapKey::from),
        any::<bool>().prop_map(MapKey::from),
        any::<bool>().prop_map(move |second| MapKey::from(enumerator(keys, second))),
    ]
}

fn leaf(keys: Keys) -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        number().prop_map(Value::from),
        "\\PC{0,8}".prop_map(Value::from),
        "[\\x00-\\x1f\"\\\\a]{0,4}".prop_map(Value::from),
        any::<i64>().prop_map(long_value),
        any::<bool>().prop_map(move |second| Value::Enum(enumerator(keys, second))),
        registered(keys),
    ]
}

/// Nested values. With `undefined`, `Undefined` may appear anywhere below
/// the top level, as JSON text cannot carry it.
fn value(keys: Keys, undefined: bool) -> impl Strategy<Value = Value> {
    let leaf = if undefined {
        prop_oneof![9 => leaf(keys), 1 => Just(Value::Undefined)].boxed()
    } else {
        leaf(keys).boxed()
    };
    leaf.prop_recursive(3, 32, 4, move |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec(("[a-z]{1,5}", inner.clone()), 0..4)
                .prop_map(Value::record),
            proptest::collection::vec((map_key(keys), inner.clone()), 0..4)
                .prop_map(|entries| Value::Map(entries.into_iter().collect())),
            proptest::collection::vec((inner.clone(), inner.clone()), 0..3)
                .prop_map(|entries| Value::HashMap(entries.into_iter().collect())),
            proptest::collection::vec(inner, 0..4)
                .prop_map(|items| Value::Set(items.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_plain_round_trip(v in value(keys(), true)) {
        let f = Fixture::new();
        let plain = f.converter.to_plain(&v).unwrap();
        prop_assert_eq!(f.converter.from_plain(&plain).unwrap(), v);
    }

    #[test]
    fn prop_direct_json_matches_plain(v in value(keys(), true)) {
        let f = Fixture::new();
        let plain = f.converter.to_plain(&v).unwrap();
        prop_assert_eq!(f.converter.to_json(&v).unwrap(), stringify(&plain).unwrap());
    }

    #[test]
    fn prop_json_text_round_trip(v in value(keys(), false)) {
        let f = Fixture::new();
        let text = f.converter.to_json(&v).unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(f.converter.from_plain(&Value::from(parsed)).unwrap(), v);
    }

    #[test]
    fn prop_long_round_trip(n in any::<i64>()) {
        let f = Fixture::new();
        let plain = f.converter.to_plain(&long_value(n)).unwrap();
        prop_assert_eq!(f.converter.from_plain(&plain).unwrap(), long_value(n));
    }
}
