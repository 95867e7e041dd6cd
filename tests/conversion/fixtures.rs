//! Fixture catalog: the `Test` module used across the conversion tests.
//!
//! | Type | Kind | Fields |
//! |------|------|--------|
//! | `Test.SmallClass` | class | `longField` |
//! | `Test.TheStruct` | struct | `longField`, `classField` |
//! | `Test.TheEnum` | enum | `First`, `Second` |
//! | `Test.KeyStruct` | struct | `intField`, `stringField`, `enumField` |
//! | `Test.TheError` | exception | `stringField` |
//! | `Test.RichClass` | class < SmallClass | struct, enum, sequence and dictionary fields |
//! | `Test.Keywords._Await` | struct | `_for` |
//! | `Test.Keywords._Break` | class | `_case` |
//! | `Test.Keywords._Catch` | exception | `_finally` |
//! | `Test.Keywords.E` | enum | `_TRY`, `other` |
//! | `Ice.LocatorPrx` | proxy | |

use ice_plain::{Converter, EnumValue, FieldDef, Long, Proxy, Registry, TypeKey, Value};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .try_init();
    });
}

pub struct Fixture {
    pub converter: Converter,
    pub small_class: TypeKey,
    pub the_struct: TypeKey,
    pub the_enum: TypeKey,
    pub key_struct: TypeKey,
    pub the_error: TypeKey,
    pub rich_class: TypeKey,
    pub await_struct: TypeKey,
    pub break_class: TypeKey,
    pub catch_error: TypeKey,
    pub keyword_enum: TypeKey,
    pub locator: TypeKey,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let registry = Registry::new();
        let keys = registry
            .define(|c| {
                let small_class = c.define_class(
                    "Test.SmallClass",
                    None,
                    [FieldDef::new("longField", Long::default())],
                )?;
                let the_struct = c.define_struct(
                    "Test.TheStruct",
                    [
                        FieldDef::new("longField", Long::default()),
                        FieldDef::new("classField", Value::Null),
                    ],
                )?;
                let the_enum = c.define_enum("Test.TheEnum", [("First", 0), ("Second", 1)])?;
                let first = EnumValue::new(the_enum, "First", 0);
                let key_struct = c.define_struct(
                    "Test.KeyStruct",
                    [
                        FieldDef::new("intField", 0),
                        FieldDef::new("stringField", ""),
                        FieldDef::new("enumField", first.clone()),
                    ],
                )?;
                let the_error = c.define_exception(
                    "Test.TheError",
                    None,
                    [FieldDef::new("stringField", "")],
                )?;
                let default_struct = c
                    .entry(the_struct)
                    .map(|entry| entry.construct())
                    .transpose()?
                    .unwrap_or(Value::Null);
                let rich_class = c.define_class(
                    "Test.RichClass",
                    Some(small_class),
                    [
                        FieldDef::new("structField", default_struct),
                        FieldDef::new("enumField", first),
                        FieldDef::new("primitiveSeqField", Value::Null),
                        FieldDef::new("smallClassSeqField", Value::Null),
                        FieldDef::new("structSeqField", Value::Null),
                        FieldDef::new("primitiveKeyDictField", Value::Null),
                    ],
                )?;
                let await_struct =
                    c.define_struct("Test.Keywords._Await", [FieldDef::new("_for", 0)])?;
                let break_class =
                    c.define_class("Test.Keywords._Break", None, [FieldDef::new("_case", "")])?;
                let catch_error = c.define_exception(
                    "Test.Keywords._Catch",
                    None,
                    [FieldDef::new("_finally", false)],
                )?;
                let keyword_enum = c.define_enum("Test.Keywords.E", [("_TRY", 0), ("other", 1)])?;
                let locator = c.define_proxy("Ice.LocatorPrx")?;

                Ok([
                    small_class,
                    the_struct,
                    the_enum,
                    key_struct,
                    the_error,
                    rich_class,
                    await_struct,
                    break_class,
                    catch_error,
                    keyword_enum,
                    locator,
                ])
            })
            .expect("fixture catalog should register");

        let [
            small_class,
            the_struct,
            the_enum,
            key_struct,
            the_error,
            rich_class,
            await_struct,
            break_class,
            catch_error,
            keyword_enum,
            locator,
        ] = keys;

        Fixture {
            converter: Converter::new(Arc::new(registry)),
            small_class,
            the_struct,
            the_enum,
            key_struct,
            the_error,
            rich_class,
            await_struct,
            break_class,
            catch_error,
            keyword_enum,
            locator,
        }
    }

    /// Zero-argument construction followed by field assignment.
    pub fn construct(&self, key: TypeKey, fields: Vec<(&str, Value)>) -> Value {
        self.converter
            .registry()
            .entry(key)
            .and_then(|entry| entry.construct_with(fields))
            .expect("fixture type should be constructible")
    }

    pub fn small_class(&self, long: i64) -> Value {
        self.construct(self.small_class, vec![("longField", long_value(long))])
    }

    pub fn the_struct(&self, long: i64, small: i64) -> Value {
        self.construct(
            self.the_struct,
            vec![("longField", long_value(long)), ("classField", self.small_class(small))],
        )
    }

    pub fn key_struct(&self, int: i32, string: &str, enumerator: &str) -> Value {
        self.construct(
            self.key_struct,
            vec![
                ("intField", Value::from(int)),
                ("stringField", Value::from(string)),
                ("enumField", self.the_enum(enumerator)),
            ],
        )
    }

    pub fn the_error(&self, string: &str) -> Value {
        self.construct(self.the_error, vec![("stringField", Value::from(string))])
    }

    pub fn the_enum(&self, name: &str) -> Value {
        let ordinal = if name == "First" { 0 } else { 1 };
        Value::Enum(EnumValue::new(self.the_enum, name, ordinal))
    }

    pub fn locator(&self, text: &str) -> Value {
        Value::Proxy(Proxy::new(self.locator, text))
    }
}

pub fn long_value(n: i64) -> Value {
    Value::Long(Long::from_i64(n))
}

/// Plain tree as a `serde_json::Value`, for comparison against `json!`.
pub fn as_json(plain: &Value) -> serde_json::Value {
    serde_json::to_value(plain).expect("plain tree should serialize")
}
