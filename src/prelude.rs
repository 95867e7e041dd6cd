//! Convenient imports for ice-plain.
//!
//! ```
//! use ice_plain::prelude::*;
//!
//! let converter = ConverterBuilder::new().build().unwrap();
//! assert_eq!(converter.to_json(&Value::from(1)).unwrap().as_deref(), Some("1"));
//! ```

// Entry points
pub use crate::builder::ConverterBuilder;
pub use ice_plain_wire::{stringify, Converter, ConverterConfig};

// Error handling
pub use ice_plain_core::{Error, Result};

// Values
pub use ice_plain_core::{EnumValue, Instance, Long, MapKey, Proxy, Record, Value};
pub use ice_plain_core::{ScalarMap, ValueMap, ValueSet};

// Type registration
pub use ice_plain_core::{FieldDef, Registry, TypeCatalog, TypeKey, TypeKind};
