//! Per-type JSON shape encoders
//!
//! The first time an instance of a type is encoded, the encoder for its shape
//! is built once: the object opening with the tag already written, and for
//! each declared field the `,"<plain name>":` text that precedes its value.
//! Later instances of the type only splice field values into that template.

use super::escape;
use crate::converter::Converter;
use crate::hooks::JsonHook;
use ice_plain_core::keywords;
use ice_plain_core::{Instance, Result, TypeKey};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Precomputed JSON template of one registered struct, class or exception.
#[derive(Debug)]
pub struct ShapeEncoder {
    type_key: TypeKey,
    /// `{"<tag key>":"<type name>"`
    prefix: String,
    /// (internal field name, `,"<plain field name>":`), inherited fields first
    fields: Vec<(String, String)>,
}

impl ShapeEncoder {
    fn build(converter: &Converter, type_key: TypeKey) -> Result<Self> {
        let name = converter.registry.name_of(type_key)?;
        let entry = converter.registry.entry(type_key)?;

        let mut prefix = converter.tag_prefix.clone();
        escape::write_quoted_full(&mut prefix, &name);

        let fields = entry
            .fields()
            .iter()
            .map(|field| {
                let mut key = String::from(",");
                escape::write_quoted_full(&mut key, keywords::unmangle(field.name()));
                key.push(':');
                (field.name().to_string(), key)
            })
            .collect();

        Ok(ShapeEncoder {
            type_key,
            prefix,
            fields,
        })
    }

    /// Runtime type this encoder was built for
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Number of declared fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Write `instance` into `out`, rendering each field value with
    /// `stringify`. Fields that are missing or render as undefined are
    /// omitted.
    pub fn encode(
        &self,
        instance: &Instance,
        stringify: &JsonHook<'_>,
        out: &mut String,
    ) -> Result<()> {
        out.push_str(&self.prefix);
        for (name, key) in &self.fields {
            let Some(value) = instance.get(name) else {
                continue;
            };
            if let Some(text) = stringify(value)? {
                out.push_str(key);
                out.push_str(&text);
            }
        }
        out.push('}');
        Ok(())
    }
}

/// Shape encoders by runtime type, filled on first use.
#[derive(Debug, Default)]
pub struct ShapeCache {
    encoders: RwLock<HashMap<TypeKey, Arc<ShapeEncoder>>>,
}

impl ShapeCache {
    /// Encoder for `type_key`, building and caching it on a miss.
    pub fn get_or_build(&self, converter: &Converter, type_key: TypeKey) -> Result<Arc<ShapeEncoder>> {
        if let Some(encoder) = self.encoders.read().get(&type_key) {
            return Ok(Arc::clone(encoder));
        }

        let encoder = Arc::new(ShapeEncoder::build(converter, type_key)?);
        trace!(%type_key, fields = encoder.field_count(), "built shape encoder");

        let mut encoders = self.encoders.write();
        Ok(Arc::clone(encoders.entry(type_key).or_insert(encoder)))
    }

    /// Number of cached encoders
    pub fn len(&self) -> usize {
        self.encoders.read().len()
    }

    /// Check if no encoder is cached
    pub fn is_empty(&self) -> bool {
        self.encoders.read().is_empty()
    }

    /// Drop every encoder
    pub fn clear(&self) {
        self.encoders.write().clear();
    }
}
