//! Direct JSON encoding of values
//!
//! [`Converter::to_json`](crate::Converter::to_json) writes the text that
//! serializing the plain form would produce, skipping the intermediate tree.
//!
//! - [`escape`]: string quoting with a fast path for short clean strings
//! - [`shape`]: per-type templates for structs, classes and exceptions

pub mod escape;
mod encode;
pub mod shape;

pub use shape::{ShapeCache, ShapeEncoder};
