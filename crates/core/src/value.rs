//! Value types for ice-plain
//!
//! [`Value`] is the closed set of categories the converters recognise. The
//! same type carries both sides of a conversion: domain values produced by
//! generated code, and the JSON-safe plain form made only of
//! `Undefined | Null | Bool | Number | String | Array | Record`.
//!
//! ## Categories
//!
//! | Variant | Category |
//! |---------|----------|
//! | `Undefined`, `Null`, `Bool`, `Number`, `String` | scalars |
//! | `Long` | 64-bit integer |
//! | `Enum` | enumerator of a registered enum |
//! | `Struct`, `Object`, `Exception` | instances of registered types |
//! | `Proxy` | remote reference (encode only) |
//! | `Map` | scalar-keyed dictionary |
//! | `HashMap` | dictionary keyed by arbitrary values |
//! | `Set` | unordered collection |
//! | `Array` | ordered sequence |
//! | `Record` | generic string-keyed record |
//!
//! ## Equality Rules
//!
//! - Equality is structural and includes the runtime type (`TypeKey`)
//! - `Struct`, `Object` and `Exception` never equal each other
//! - `Map`, `HashMap`, `Set` and `Record` compare without regard to order
//! - Numbers use IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`

use crate::catalog::TypeKey;
use crate::long::Long;
use indexmap::{IndexMap, IndexSet};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generic string-keyed record, in insertion order.
pub type Record = IndexMap<String, Value>;

/// Dictionary with scalar keys.
pub type ScalarMap = IndexMap<MapKey, Value>;

/// Dictionary keyed by arbitrary values under structural equality.
pub type ValueMap = IndexMap<Value, Value>;

/// Unordered collection of values.
pub type ValueSet = IndexSet<Value>;

/// A domain or plain value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value. Dropped from records, `null` inside arrays.
    Undefined,

    /// JSON null
    Null,

    /// Boolean
    Bool(bool),

    /// Double precision number
    Number(f64),

    /// UTF-8 string
    String(String),

    /// 64-bit integer
    Long(Long),

    /// Enumerator
    Enum(EnumValue),

    /// Ordered sequence
    Array(Vec<Value>),

    /// Scalar-keyed dictionary
    Map(ScalarMap),

    /// Value-keyed dictionary with application-level equality
    HashMap(ValueMap),

    /// Unordered collection
    Set(ValueSet),

    /// Struct instance (value type, no inheritance)
    Struct(Instance),

    /// Class instance
    Object(Instance),

    /// User exception instance
    Exception(Instance),

    /// Remote reference
    Proxy(Proxy),

    /// Generic record
    Record(Record),
}

impl Value {
    /// Returns the category name (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Long(_) => "Long",
            Value::Enum(_) => "Enum",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
            Value::HashMap(_) => "HashMap",
            Value::Set(_) => "Set",
            Value::Struct(_) => "Struct",
            Value::Object(_) => "Object",
            Value::Exception(_) => "Exception",
            Value::Proxy(_) => "Proxy",
            Value::Record(_) => "Record",
        }
    }

    /// Runtime type of values that belong to a registered type.
    pub fn type_key(&self) -> Option<TypeKey> {
        match self {
            Value::Enum(e) => Some(e.type_key()),
            Value::Struct(i) | Value::Object(i) | Value::Exception(i) => Some(i.type_key()),
            Value::Proxy(p) => Some(p.type_key()),
            _ => None,
        }
    }

    /// Build a record from key/value pairs.
    pub fn record<K, I>(pairs: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Record(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check if this value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as record reference
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Try to get the instance of a struct, class or exception
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Struct(i) | Value::Object(i) | Value::Exception(i) => Some(i),
            _ => None,
        }
    }

    /// Mutable access to the instance of a struct, class or exception
    pub fn as_instance_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Value::Struct(i) | Value::Object(i) | Value::Exception(i) => Some(i),
            _ => None,
        }
    }
}

// ============================================================================
// Registered-type payloads
// ============================================================================

/// Fields of a struct, class or exception together with its runtime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    type_key: TypeKey,
    fields: Record,
}

impl Instance {
    /// Instance of `type_key` with the given fields, keyed by internal name.
    pub fn new(type_key: TypeKey, fields: Record) -> Self {
        Instance { type_key, fields }
    }

    /// Runtime type
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Field by internal name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Assign a field by internal name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// All fields, keyed by internal name
    pub fn fields(&self) -> &Record {
        &self.fields
    }
}

impl Hash for Instance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_key.hash(state);
        hash_unordered(self.fields.iter(), state);
    }
}

/// One enumerator of a registered enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    type_key: TypeKey,
    name: String,
    ordinal: i32,
}

impl EnumValue {
    /// Enumerator `name` (internal form) of enum `type_key`.
    pub fn new(type_key: TypeKey, name: impl Into<String>, ordinal: i32) -> Self {
        EnumValue {
            type_key,
            name: name.into(),
            ordinal,
        }
    }

    /// Runtime type
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Symbolic name, possibly carrying the reserved-word marker
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordinal value
    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }
}

/// A remote reference in its canonical stringified form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Proxy {
    type_key: TypeKey,
    text: String,
}

impl Proxy {
    /// Reference of interface `type_key` with stringified form `text`.
    pub fn new(type_key: TypeKey, text: impl Into<String>) -> Self {
        Proxy {
            type_key,
            text: text.into(),
        }
    }

    /// Runtime type
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Canonical string form, e.g. `Category/Name:tcp -h host -p 1234`
    pub fn text(&self) -> &str {
        &self.text
    }
}

// ============================================================================
// Scalar map keys
// ============================================================================

/// Key of a scalar-keyed [`Value::Map`].
#[derive(Debug, Clone)]
pub enum MapKey {
    /// String key
    String(String),
    /// Numeric key (any Slice integer or floating type)
    Number(f64),
    /// Boolean key
    Bool(bool),
    /// Enumerator key
    Enum(EnumValue),
}

impl MapKey {
    /// Key for a value of a scalar category, `None` otherwise.
    pub fn from_value(value: Value) -> Option<MapKey> {
        match value {
            Value::String(s) => Some(MapKey::String(s)),
            Value::Number(n) => Some(MapKey::Number(n)),
            Value::Bool(b) => Some(MapKey::Bool(b)),
            Value::Enum(e) => Some(MapKey::Enum(e)),
            _ => None,
        }
    }

    /// The key as a value
    pub fn to_value(&self) -> Value {
        match self {
            MapKey::String(s) => Value::String(s.clone()),
            MapKey::Number(n) => Value::Number(*n),
            MapKey::Bool(b) => Value::Bool(*b),
            MapKey::Enum(e) => Value::Enum(e.clone()),
        }
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MapKey::String(a), MapKey::String(b)) => a == b,
            (MapKey::Number(a), MapKey::Number(b)) => a == b,
            (MapKey::Bool(a), MapKey::Bool(b)) => a == b,
            (MapKey::Enum(a), MapKey::Enum(b)) => a == b,
            _ => false,
        }
    }
}

// Same caveat as Value: NaN keys never compare equal.
impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            MapKey::String(s) => s.hash(state),
            MapKey::Number(n) => hash_f64(*n, state),
            MapKey::Bool(b) => b.hash(state),
            MapKey::Enum(e) => e.hash(state),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::String(s.to_string())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::String(s)
    }
}

impl From<f64> for MapKey {
    fn from(n: f64) -> Self {
        MapKey::Number(n)
    }
}

impl From<i32> for MapKey {
    fn from(n: i32) -> Self {
        MapKey::Number(n as f64)
    }
}

impl From<bool> for MapKey {
    fn from(b: bool) -> Self {
        MapKey::Bool(b)
    }
}

impl From<EnumValue> for MapKey {
    fn from(e: EnumValue) -> Self {
        MapKey::Enum(e)
    }
}

// ============================================================================
// Eq and Hash (IEEE-754 semantics, order-insensitive collections)
// ============================================================================

// Eq is implemented even though Number does not satisfy reflexivity, so that
// values can key a HashMap and populate a Set. NaN keys never match.
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => hash_f64(*n, state),
            Value::String(s) => s.hash(state),
            Value::Long(l) => l.hash(state),
            Value::Enum(e) => e.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Map(m) => hash_unordered(m.iter(), state),
            Value::HashMap(m) => hash_unordered(m.iter(), state),
            Value::Set(s) => hash_unordered(s.iter(), state),
            Value::Struct(i) | Value::Object(i) | Value::Exception(i) => i.hash(state),
            Value::Proxy(p) => p.hash(state),
            Value::Record(r) => hash_unordered(r.iter(), state),
        }
    }
}

fn hash_f64<H: Hasher>(n: f64, state: &mut H) {
    // -0.0 == 0.0, so both hash as zero
    if n == 0.0 {
        0u64.hash(state);
    } else {
        n.to_bits().hash(state);
    }
}

/// Hash a collection whose equality ignores order by summing entry hashes.
fn hash_unordered<T, I, H>(items: I, state: &mut H)
where
    T: Hash,
    I: ExactSizeIterator<Item = T>,
    H: Hasher,
{
    items.len().hash(state);
    let mut acc = 0u64;
    for item in items {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        acc = acc.wrapping_add(hasher.finish());
    }
    acc.hash(state);
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Long> for Value {
    fn from(l: Long) -> Self {
        Value::Long(l)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl From<Proxy> for Value {
    fn from(p: Proxy) -> Self {
        Value::Proxy(p)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<ScalarMap> for Value {
    fn from(m: ScalarMap) -> Self {
        Value::Map(m)
    }
}

impl From<ValueMap> for Value {
    fn from(m: ValueMap) -> Self {
        Value::HashMap(m)
    }
}

impl From<ValueSet> for Value {
    fn from(s: ValueSet) -> Self {
        Value::Set(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => {
                Value::Record(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// JSON number for a double, or `None` when it has no JSON form (NaN, ±Inf).
///
/// Integral values in the safe range are written without a fractional part,
/// the way JSON.stringify writes them. Everything else takes serde_json's
/// shortest round-trip text, which differs from JSON.stringify for large
/// and tiny magnitudes (`1e21` rather than `1e+21`, `1.152921504606847e18`
/// rather than `1152921504606847000`). The value read back is the same.
pub fn json_number(n: f64) -> Option<serde_json::Number> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() <= crate::long::MAX_SAFE_INTEGER {
        return Some(serde_json::Number::from(n as i64));
    }
    serde_json::Number::from_f64(n)
}

/// Serialization of the plain subset.
///
/// Undefined record members are skipped and undefined array slots are written
/// as `null`. Domain categories are rejected; convert them to plain first.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match json_number(*n) {
                Some(number) => number.serialize(serializer),
                None => serializer.serialize_unit(),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in fields {
                    if !value.is_undefined() {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
            other => Err(S::Error::custom(format!(
                "{} is not a plain value",
                other.type_name()
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
