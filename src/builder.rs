//! Converter construction.
//!
//! [`ConverterBuilder`] gathers a registry and configuration and produces a
//! ready [`Converter`].

use ice_plain_core::{Registry, Result, TypeCatalog};
use ice_plain_wire::{Converter, ConverterConfig};
use std::sync::Arc;
use tracing::debug;

/// Builder for a [`Converter`].
///
/// # Example
///
/// ```
/// use ice_plain::prelude::*;
///
/// let converter = ConverterBuilder::new()
///     .define(|c| c.define_enum("Demo.Color", [("red", 0)]).map(|_| ()))
///     .unwrap()
///     .tag_key("$type")
///     .build()
///     .unwrap();
///
/// assert_eq!(converter.config().tag_key, "$type");
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    registry: Option<Arc<Registry>>,
    catalog: TypeCatalog,
    config: ConverterConfig,
}

impl ConverterBuilder {
    /// Builder with an empty catalog and the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing registry, shared with other converters.
    ///
    /// Types registered through [`ConverterBuilder::define`] are added to it
    /// on [`ConverterBuilder::build`].
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register types.
    pub fn define<F>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&mut TypeCatalog) -> Result<()>,
    {
        f(&mut self.catalog)?;
        Ok(self)
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from JSON text.
    pub fn config_json(self, text: &str) -> Result<Self> {
        let config = ConverterConfig::from_json(text)?;
        Ok(self.config(config))
    }

    /// Discriminator key of tagged plain objects
    pub fn tag_key(mut self, key: impl Into<String>) -> Self {
        self.config.tag_key = key.into();
        self
    }

    /// Length bound of the fast string escaper
    pub fn fast_escape_limit(mut self, limit: usize) -> Self {
        self.config.fast_escape_limit = limit;
        self
    }

    /// Build the converter.
    ///
    /// Fails if the configuration is invalid, or if a type defined on this
    /// builder clashes with one already in the supplied registry.
    pub fn build(self) -> Result<Converter> {
        self.config.validate()?;

        let registry = match self.registry {
            None => Arc::new(Registry::with_catalog(self.catalog)),
            Some(registry) => {
                if !self.catalog.is_empty() {
                    let staged = self.catalog;
                    registry.define(|catalog| catalog.merge(staged))?;
                }
                registry
            }
        };

        debug!(tag_key = %self.config.tag_key, "converter ready");
        Ok(Converter::with_config(registry, self.config))
    }
}
