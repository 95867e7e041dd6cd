//! # ice-plain
//!
//! Conversion between values of Slice-generated types and plain,
//! JSON-safe trees, with a direct JSON encoder that skips the intermediate
//! tree.
//!
//! ## Quick Start
//!
//! ```
//! use ice_plain::prelude::*;
//!
//! let converter = ConverterBuilder::new()
//!     .define(|c| {
//!         c.define_struct("Demo.Point", [FieldDef::new("x", 0), FieldDef::new("y", 0)])?;
//!         Ok(())
//!     })
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let point = converter.registry().constructor_of("Demo.Point").unwrap();
//! let value = point.construct_with([("x", Value::from(3))]).unwrap();
//!
//! let plain = converter.to_plain(&value).unwrap();
//! assert_eq!(
//!     stringify(&plain).unwrap().as_deref(),
//!     Some(r#"{"@ice-type":"Demo.Point","x":3,"y":0}"#)
//! );
//! assert_eq!(converter.to_json(&value).unwrap(), stringify(&plain).unwrap());
//! assert_eq!(converter.from_plain(&plain).unwrap(), value);
//! ```
//!
//! ## Crates
//!
//! - [`ice_plain_core`]: value model, type catalog and registry
//! - [`ice_plain_wire`]: plain converter, JSON encoder, hooks and config

#![warn(missing_docs)]

mod builder;

pub mod prelude;

pub use builder::ConverterBuilder;

pub use ice_plain_core::{
    json_number, keywords, EnumValue, Error, FieldDef, Instance, Long, MapKey, Proxy, Record,
    Registry, Result, ScalarMap, TypeCatalog, TypeEntry, TypeKey, TypeKind, Value, ValueMap,
    ValueSet,
};
pub use ice_plain_wire::{hooks, json, stringify, Converter, ConverterConfig, JsonHook, PlainHook};
