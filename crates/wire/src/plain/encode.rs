//! Value to plain form

use super::{HASH_MAP_TYPE, LONG_TYPE, MAP_TYPE, SET_TYPE};
use crate::converter::Converter;
use crate::hooks::{self, PlainHook};
use ice_plain_core::keywords;
use ice_plain_core::{
    EnumValue, Instance, Long, Proxy, Record, Result, ScalarMap, Value, ValueMap, ValueSet,
};

impl Converter {
    /// Convert `value` and everything it contains to plain form.
    pub fn to_plain(&self, value: &Value) -> Result<Value> {
        self.to_plain_with(value, &|child| self.to_plain(child))
    }

    /// Convert only the top level of `value`; children are left as they are.
    pub fn to_plain_shallow(&self, value: &Value) -> Result<Value> {
        self.to_plain_with(value, &hooks::shallow)
    }

    /// Convert the top level of `value`, passing every child through
    /// `customize`.
    ///
    /// Scalars pass through unchanged. A value whose runtime type is not
    /// registered fails with a lookup error.
    pub fn to_plain_with(&self, value: &Value, customize: &PlainHook<'_>) -> Result<Value> {
        match value {
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_) => Ok(value.clone()),
            Value::Long(long) => Ok(self.long_to_plain(long)),
            Value::Enum(e) => self.enum_to_plain(e),
            Value::Array(items) => items
                .iter()
                .map(customize)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Map(map) => self.map_to_plain(map, customize),
            Value::HashMap(map) => self.hash_map_to_plain(map, customize),
            Value::Set(set) => self.set_to_plain(set, customize),
            Value::Struct(instance) | Value::Object(instance) | Value::Exception(instance) => {
                self.instance_to_plain(instance, customize)
            }
            Value::Proxy(proxy) => self.proxy_to_plain(proxy),
            Value::Record(fields) => fields
                .iter()
                .map(|(name, field)| Ok((name.clone(), customize(field)?)))
                .collect::<Result<Record>>()
                .map(Value::Record),
        }
    }

    fn tagged(&self, tag: &str) -> Record {
        let mut plain = Record::new();
        plain.insert(self.config.tag_key.clone(), Value::String(tag.to_string()));
        plain
    }

    fn long_to_plain(&self, long: &Long) -> Value {
        let mut plain = self.tagged(LONG_TYPE);
        let number = long.to_number();
        if number.is_finite() {
            plain.insert("value".to_string(), Value::Number(number));
        } else {
            plain.insert("high".to_string(), Value::Number(long.high() as f64));
            plain.insert("low".to_string(), Value::Number(long.low() as f64));
        }
        Value::Record(plain)
    }

    fn enum_to_plain(&self, e: &EnumValue) -> Result<Value> {
        let name = self.registry.name_of(e.type_key())?;
        let mut plain = self.tagged(&name);
        plain.insert(
            "value".to_string(),
            Value::String(keywords::unmangle(e.name()).to_string()),
        );
        Ok(Value::Record(plain))
    }

    fn map_to_plain(&self, map: &ScalarMap, customize: &PlainHook<'_>) -> Result<Value> {
        let mut entries = Record::with_capacity(map.len());
        for (key, value) in map {
            entries.insert(self.render_map_key(key)?, customize(value)?);
        }
        let mut plain = self.tagged(MAP_TYPE);
        plain.insert("entries".to_string(), Value::Record(entries));
        Ok(Value::Record(plain))
    }

    fn hash_map_to_plain(&self, map: &ValueMap, customize: &PlainHook<'_>) -> Result<Value> {
        let entries = map
            .iter()
            .map(|(key, value)| {
                Ok(Value::record([
                    ("key", customize(key)?),
                    ("value", customize(value)?),
                ]))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut plain = self.tagged(HASH_MAP_TYPE);
        plain.insert("entries".to_string(), Value::Array(entries));
        Ok(Value::Record(plain))
    }

    fn set_to_plain(&self, set: &ValueSet, customize: &PlainHook<'_>) -> Result<Value> {
        let items = set.iter().map(customize).collect::<Result<Vec<_>>>()?;
        let mut plain = self.tagged(SET_TYPE);
        plain.insert("value".to_string(), Value::Array(items));
        Ok(Value::Record(plain))
    }

    // Declared fields only, in declaration order. Anything else on the
    // instance is bookkeeping and stays out of the plain form.
    fn instance_to_plain(&self, instance: &Instance, customize: &PlainHook<'_>) -> Result<Value> {
        let name = self.registry.name_of(instance.type_key())?;
        let entry = self.registry.entry(instance.type_key())?;

        let mut plain = self.tagged(&name);
        for field in entry.fields() {
            if let Some(value) = instance.get(field.name()) {
                plain.insert(
                    keywords::unmangle(field.name()).to_string(),
                    customize(value)?,
                );
            }
        }
        Ok(Value::Record(plain))
    }

    fn proxy_to_plain(&self, proxy: &Proxy) -> Result<Value> {
        let name = self.registry.name_of(proxy.type_key())?;
        let mut plain = self.tagged(&name);
        plain.insert("value".to_string(), Value::String(proxy.text().to_string()));
        Ok(Value::Record(plain))
    }
}
