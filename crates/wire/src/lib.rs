//! Plain-object conversion and JSON encoding for ice-plain
//!
//! A [`Converter`] turns values produced by Slice-generated code into plain
//! trees that JSON can carry, rebuilds values from such trees, and writes
//! the JSON text of a value directly.
//!
//! ## Plain Encoding Rules
//!
//! | Value | Plain form |
//! |-------|------------|
//! | Undefined, Null, Bool, Number, String | unchanged |
//! | Array | array of converted items |
//! | Record | record of converted members |
//! | Long | `{"@ice-type":"Ice.Long","value":n}` or `"high"`/`"low"` words |
//! | Enum | `{"@ice-type":"<Name>","value":"<enumerator>"}` |
//! | Map | `{"@ice-type":"Map","entries":{...}}` |
//! | HashMap | `{"@ice-type":"Ice.HashMap","entries":[...]}` |
//! | Set | `{"@ice-type":"Set","value":[...]}` |
//! | Struct, Class, Exception | `{"@ice-type":"<Name>", <fields>}` |
//! | Proxy | `{"@ice-type":"<Name>Prx","value":"<text>"}` (encode only) |
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use ice_plain_core::{Long, Registry, Value};
//! use ice_plain_wire::Converter;
//!
//! let converter = Converter::new(Arc::new(Registry::new()));
//! let value = Value::Long(Long::from_i64(42));
//!
//! let plain = converter.to_plain(&value).unwrap();
//! assert_eq!(converter.from_plain(&plain).unwrap(), value);
//! assert_eq!(
//!     converter.to_json(&value).unwrap().as_deref(),
//!     Some(r#"{"@ice-type":"Ice.Long","value":42}"#)
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod converter;
pub mod hooks;
pub mod json;
pub mod plain;

pub use config::ConverterConfig;
pub use converter::Converter;
pub use hooks::{JsonHook, PlainHook};
pub use plain::stringify;
