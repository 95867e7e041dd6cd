//! Core types for ice-plain
//!
//! This crate defines the value model shared by the plain converter and the
//! direct JSON encoder:
//!
//! - [`Value`]: every category produced by Slice-generated code, plus the
//!   JSON-safe subset used as the plain form
//! - [`Long`]: 64-bit integers as two 32-bit words
//! - [`TypeCatalog`] / [`Registry`]: explicit type registration and the
//!   name <-> type lookups built on it
//! - [`keywords`]: reserved-word mangling rules
//! - [`Error`]: the error surface of every conversion

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod error;
pub mod keywords;
pub mod long;
pub mod registry;
pub mod value;

pub use catalog::{FieldDef, TypeCatalog, TypeEntry, TypeKey, TypeKind};
pub use error::{Error, Result};
pub use long::Long;
pub use registry::Registry;
pub use value::{
    json_number, EnumValue, Instance, MapKey, Proxy, Record, ScalarMap, Value, ValueMap, ValueSet,
};
