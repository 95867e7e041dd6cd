//! Plain-object conversion
//!
//! Turns values into trees built only from undefined, null, booleans,
//! numbers, strings, arrays and records, and back. Categories JSON cannot
//! express become records tagged with the converter's tag key:
//!
//! | Input | Plain form |
//! |-------|------------|
//! | Long (safe) | `{"@ice-type":"Ice.Long","value":n}` |
//! | Long (unsafe) | `{"@ice-type":"Ice.Long","high":h,"low":l}` |
//! | Enum | `{"@ice-type":"<Name>","value":"<enumerator>"}` |
//! | Map | `{"@ice-type":"Map","entries":{"<json key>":v}}` |
//! | HashMap | `{"@ice-type":"Ice.HashMap","entries":[{"key":k,"value":v}]}` |
//! | Set | `{"@ice-type":"Set","value":[v]}` |
//! | Struct / Class / Exception | `{"@ice-type":"<Name>","<field>":v}` |
//! | Proxy | `{"@ice-type":"<Name>Prx","value":"<text>"}` |
//!
//! Map keys are scalars rendered to JSON text, so `"a"` and `1` stay distinct
//! after becoming record keys.

mod decode;
mod encode;

use crate::converter::Converter;
use crate::json::escape;
use ice_plain_core::{json_number, Error, MapKey, Result, Value};

/// Tag of 64-bit integers
pub const LONG_TYPE: &str = "Ice.Long";
/// Tag of maps with scalar keys
pub const MAP_TYPE: &str = "Map";
/// Tag of maps with structured keys
pub const HASH_MAP_TYPE: &str = "Ice.HashMap";
/// Tag of sets
pub const SET_TYPE: &str = "Set";
/// Suffix of every proxy type name
pub const PROXY_SUFFIX: &str = "Prx";

/// JSON text of a plain tree, or `None` when the tree is undefined.
///
/// Serializes the same way the direct encoder writes, so
/// `stringify(&c.to_plain(v)?)` equals `c.to_json(v)`.
pub fn stringify(plain: &Value) -> Result<Option<String>> {
    if plain.is_undefined() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(plain)?))
}

/// Number as a map key: JSON text, or the JavaScript spelling of a
/// non-finite value.
pub(crate) fn number_key(n: f64) -> String {
    match json_number(n) {
        Some(number) => number.to_string(),
        None if n.is_nan() => "NaN".to_string(),
        None if n > 0.0 => "Infinity".to_string(),
        None => "-Infinity".to_string(),
    }
}

impl Converter {
    /// Render a map key as the JSON text of its plain form.
    pub(crate) fn render_map_key(&self, key: &MapKey) -> Result<String> {
        match key {
            MapKey::String(s) => Ok(escape::quote(s)),
            MapKey::Number(n) => Ok(number_key(*n)),
            MapKey::Bool(b) => Ok(b.to_string()),
            MapKey::Enum(e) => {
                let plain = self.to_plain(&Value::Enum(e.clone()))?;
                Ok(serde_json::to_string(&plain)?)
            }
        }
    }

    /// Inverse of [`Converter::render_map_key`].
    pub(crate) fn parse_map_key(&self, text: &str) -> Result<MapKey> {
        let value = match text {
            "NaN" => Value::Number(f64::NAN),
            "Infinity" => Value::Number(f64::INFINITY),
            "-Infinity" => Value::Number(f64::NEG_INFINITY),
            _ => {
                let json: serde_json::Value = serde_json::from_str(text)
                    .map_err(|e| Error::InvalidPlain(format!("map key {text:?}: {e}")))?;
                self.from_plain(&Value::from(json))?
            }
        };
        let type_name = value.type_name();
        MapKey::from_value(value)
            .ok_or_else(|| Error::InvalidPlain(format!("map key {text:?} is a {type_name}")))
    }
}
