//! Plain form to value

use super::{HASH_MAP_TYPE, LONG_TYPE, MAP_TYPE, PROXY_SUFFIX, SET_TYPE};
use crate::converter::Converter;
use crate::hooks::{self, PlainHook};
use ice_plain_core::keywords;
use ice_plain_core::{
    Error, Long, Record, Result, ScalarMap, TypeEntry, TypeKind, Value, ValueMap, ValueSet,
};

impl Converter {
    /// Rebuild a value, and everything it contains, from plain form.
    pub fn from_plain(&self, plain: &Value) -> Result<Value> {
        self.from_plain_with(plain, &|child| self.from_plain(child))
    }

    /// Rebuild only the top level; children are left as they are.
    pub fn from_plain_shallow(&self, plain: &Value) -> Result<Value> {
        self.from_plain_with(plain, &hooks::shallow)
    }

    /// Rebuild the top level of `plain`, passing every child through
    /// `customize`.
    ///
    /// Records carrying the tag key are rebuilt as the tagged category;
    /// other records stay records. Non-plain input is returned as is.
    pub fn from_plain_with(&self, plain: &Value, customize: &PlainHook<'_>) -> Result<Value> {
        match plain {
            Value::Array(items) => items
                .iter()
                .map(customize)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Record(fields) => match fields.get(&self.config.tag_key) {
                None => fields
                    .iter()
                    .map(|(name, field)| Ok((name.clone(), customize(field)?)))
                    .collect::<Result<Record>>()
                    .map(Value::Record),
                Some(Value::String(tag)) => self.tagged_from_plain(tag, fields, customize),
                Some(other) => Err(Error::InvalidPlain(format!(
                    "{} must be a string, found {}",
                    self.config.tag_key,
                    other.type_name()
                ))),
            },
            _ => Ok(plain.clone()),
        }
    }

    fn tagged_from_plain(
        &self,
        tag: &str,
        plain: &Record,
        customize: &PlainHook<'_>,
    ) -> Result<Value> {
        match tag {
            LONG_TYPE => long_from_plain(plain).map(Value::Long),
            MAP_TYPE => self.map_from_plain(plain, customize),
            HASH_MAP_TYPE => self.hash_map_from_plain(plain, customize),
            SET_TYPE => self.set_from_plain(plain, customize),
            _ if tag.ends_with(PROXY_SUFFIX) => Err(proxy_unsupported(tag)),
            _ => {
                let entry = self.registry.constructor_of(tag)?;
                match entry.kind() {
                    TypeKind::Enum => enum_from_plain(&entry, tag, plain),
                    TypeKind::Proxy => Err(proxy_unsupported(tag)),
                    TypeKind::Struct | TypeKind::Class | TypeKind::Exception => {
                        self.instance_from_plain(&entry, plain, customize)
                    }
                }
            }
        }
    }

    fn map_from_plain(&self, plain: &Record, customize: &PlainHook<'_>) -> Result<Value> {
        let entries = match plain.get("entries") {
            Some(Value::Record(entries)) => entries,
            _ => return Err(missing(MAP_TYPE, "entries", "record")),
        };
        let mut map = ScalarMap::with_capacity(entries.len());
        for (key, value) in entries {
            map.insert(self.parse_map_key(key)?, customize(value)?);
        }
        Ok(Value::Map(map))
    }

    fn hash_map_from_plain(&self, plain: &Record, customize: &PlainHook<'_>) -> Result<Value> {
        let entries = match plain.get("entries") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(missing(HASH_MAP_TYPE, "entries", "array")),
        };
        let mut map = ValueMap::with_capacity(entries.len());
        for entry in entries {
            let entry = entry
                .as_record()
                .ok_or_else(|| missing(HASH_MAP_TYPE, "entries[]", "record"))?;
            let key = entry.get("key").unwrap_or(&Value::Undefined);
            let value = entry.get("value").unwrap_or(&Value::Undefined);
            map.insert(customize(key)?, customize(value)?);
        }
        Ok(Value::HashMap(map))
    }

    fn set_from_plain(&self, plain: &Record, customize: &PlainHook<'_>) -> Result<Value> {
        let items = match plain.get("value") {
            Some(Value::Array(items)) => items,
            _ => return Err(missing(SET_TYPE, "value", "array")),
        };
        let set = items.iter().map(customize).collect::<Result<ValueSet>>()?;
        Ok(Value::Set(set))
    }

    // Construct with defaults, then assign every plain member under its
    // internal (marker-prefixed when reserved) name.
    fn instance_from_plain(
        &self,
        entry: &TypeEntry,
        plain: &Record,
        customize: &PlainHook<'_>,
    ) -> Result<Value> {
        let mut value = entry.construct()?;
        if let Some(instance) = value.as_instance_mut() {
            for (name, field) in plain {
                if *name == self.config.tag_key {
                    continue;
                }
                instance.set(keywords::mangle(name).into_owned(), customize(field)?);
            }
        }
        Ok(value)
    }
}

/// A present, non-null `value` wins; otherwise the two words are used.
fn long_from_plain(plain: &Record) -> Result<Long> {
    match plain.get("value") {
        Some(Value::Number(n)) => Long::from_number(*n).ok_or_else(|| {
            Error::InvalidPlain(format!("{LONG_TYPE} value {n} is not a safe integer"))
        }),
        Some(Value::Null) | Some(Value::Undefined) | None => {
            Ok(Long::new(word(plain, "high")?, word(plain, "low")?))
        }
        Some(other) => Err(Error::InvalidPlain(format!(
            "{LONG_TYPE} value must be a number, found {}",
            other.type_name()
        ))),
    }
}

fn word(plain: &Record, name: &str) -> Result<u32> {
    match plain.get(name) {
        Some(Value::Number(n))
            if n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= u32::MAX as f64 =>
        {
            Ok(*n as i64 as u32)
        }
        _ => Err(missing(LONG_TYPE, name, "32-bit integer")),
    }
}

fn enum_from_plain(entry: &TypeEntry, tag: &str, plain: &Record) -> Result<Value> {
    let name = plain
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| missing(tag, "value", "string"))?;
    entry
        .enumerator(name)
        .map(Value::Enum)
        .ok_or_else(|| Error::InvalidPlain(format!("{tag} has no enumerator {name}")))
}

fn missing(tag: &str, member: &str, expected: &str) -> Error {
    Error::InvalidPlain(format!("{tag} requires {member} to be a {expected}"))
}

fn proxy_unsupported(tag: &str) -> Error {
    Error::Unsupported(format!("cannot rebuild proxy {tag} from plain form"))
}
