//! Direct JSON encoding
//!
//! Writes the JSON text of a value's plain form without materializing the
//! plain tree. Output is byte-identical to serializing `to_plain(value)`:
//! the same member order, the same number text and the same string escapes.

use super::escape;
use crate::converter::Converter;
use crate::hooks::JsonHook;
use crate::plain::{HASH_MAP_TYPE, LONG_TYPE, MAP_TYPE, SET_TYPE};
use ice_plain_core::keywords;
use ice_plain_core::{json_number, EnumValue, Long, Proxy, Result, ScalarMap, Value, ValueMap};
use indexmap::IndexMap;

impl Converter {
    /// JSON text of `value`, or `None` when the value is undefined.
    pub fn to_json(&self, value: &Value) -> Result<Option<String>> {
        self.to_json_with(value, &|child| self.to_json(child))
    }

    /// JSON text of `value`, rendering every child with `stringify`.
    ///
    /// A child rendered as `None` is omitted from objects and written as
    /// `null` inside arrays.
    pub fn to_json_with(&self, value: &Value, stringify: &JsonHook<'_>) -> Result<Option<String>> {
        let mut out = String::new();
        match value {
            Value::Undefined => return Ok(None),
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write_number(&mut out, *n),
            Value::String(s) => self.write_str(&mut out, s),
            Value::Long(long) => self.write_long(&mut out, long),
            Value::Enum(e) => self.write_enum(&mut out, e)?,
            Value::Array(items) => write_array(&mut out, items.iter(), stringify)?,
            Value::Map(map) => self.write_map(&mut out, map, stringify)?,
            Value::HashMap(map) => self.write_hash_map(&mut out, map, stringify)?,
            Value::Set(set) => {
                self.open_tagged(&mut out, SET_TYPE);
                out.push_str(r#","value":"#);
                write_array(&mut out, set.iter(), stringify)?;
                out.push('}');
            }
            Value::Struct(instance) | Value::Object(instance) | Value::Exception(instance) => {
                let encoder = self.shapes.get_or_build(self, instance.type_key())?;
                encoder.encode(instance, stringify, &mut out)?;
            }
            Value::Proxy(proxy) => self.write_proxy(&mut out, proxy)?,
            Value::Record(fields) => {
                out.push('{');
                let mut first = true;
                for (name, field) in fields {
                    if let Some(text) = stringify(field)? {
                        self.write_member(&mut out, &mut first, name, &text);
                    }
                }
                out.push('}');
            }
        }
        Ok(Some(out))
    }

    fn write_str(&self, out: &mut String, s: &str) {
        escape::write_quoted(out, s, self.config.fast_escape_limit);
    }

    /// `{"<tag key>":"<tag>"`, left open for further members.
    fn open_tagged(&self, out: &mut String, tag: &str) {
        out.push_str(&self.tag_prefix);
        self.write_str(out, tag);
    }

    fn write_member(&self, out: &mut String, first: &mut bool, name: &str, text: &str) {
        if !*first {
            out.push(',');
        }
        *first = false;
        self.write_str(out, name);
        out.push(':');
        out.push_str(text);
    }

    fn write_long(&self, out: &mut String, long: &Long) {
        self.open_tagged(out, LONG_TYPE);
        let number = long.to_number();
        if number.is_finite() {
            out.push_str(r#","value":"#);
            write_number(out, number);
        } else {
            out.push_str(r#","high":"#);
            out.push_str(&long.high().to_string());
            out.push_str(r#","low":"#);
            out.push_str(&long.low().to_string());
        }
        out.push('}');
    }

    fn write_enum(&self, out: &mut String, e: &EnumValue) -> Result<()> {
        let name = self.registry.name_of(e.type_key())?;
        self.open_tagged(out, &name);
        out.push_str(r#","value":"#);
        self.write_str(out, keywords::unmangle(e.name()));
        out.push('}');
        Ok(())
    }

    fn write_proxy(&self, out: &mut String, proxy: &Proxy) -> Result<()> {
        let name = self.registry.name_of(proxy.type_key())?;
        self.open_tagged(out, &name);
        out.push_str(r#","value":"#);
        self.write_str(out, proxy.text());
        out.push('}');
        Ok(())
    }

    fn write_map(&self, out: &mut String, map: &ScalarMap, stringify: &JsonHook<'_>) -> Result<()> {
        self.open_tagged(out, MAP_TYPE);
        out.push_str(r#","entries":{"#);
        // Keys rendering to the same text (NaN) collapse as in the plain
        // record: first position, last value.
        let mut entries: IndexMap<String, Option<String>> = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            let key = self.render_map_key(key)?;
            entries.insert(key, stringify(value)?);
        }
        let mut first = true;
        for (key, text) in &entries {
            if let Some(text) = text {
                self.write_member(out, &mut first, key, text);
            }
        }
        out.push_str("}}");
        Ok(())
    }

    fn write_hash_map(
        &self,
        out: &mut String,
        map: &ValueMap,
        stringify: &JsonHook<'_>,
    ) -> Result<()> {
        self.open_tagged(out, HASH_MAP_TYPE);
        out.push_str(r#","entries":["#);
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('{');
            let mut first = true;
            if let Some(text) = stringify(key)? {
                self.write_member(out, &mut first, "key", &text);
            }
            if let Some(text) = stringify(value)? {
                self.write_member(out, &mut first, "value", &text);
            }
            out.push('}');
        }
        out.push_str("]}");
        Ok(())
    }
}

fn write_number(out: &mut String, n: f64) {
    match json_number(n) {
        Some(number) => out.push_str(&number.to_string()),
        None => out.push_str("null"),
    }
}

fn write_array<'v>(
    out: &mut String,
    items: impl Iterator<Item = &'v Value>,
    stringify: &JsonHook<'_>,
) -> Result<()> {
    out.push('[');
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(',');
        }
        match stringify(item)? {
            Some(text) => out.push_str(&text),
            None => out.push_str("null"),
        }
    }
    out.push(']');
    Ok(())
}
