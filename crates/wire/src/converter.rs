//! Conversion context

use crate::config::ConverterConfig;
use crate::json::escape;
use crate::json::shape::ShapeCache;
use ice_plain_core::Registry;
use std::sync::Arc;

/// Entry point of every conversion.
///
/// Holds the type registry, the per-type JSON shape encoders and the
/// configuration. Plain conversion lives in [`crate::plain`], direct JSON
/// encoding in [`crate::json`]; both are methods on this type.
///
/// A converter is `Send + Sync`. Caches fill lazily behind read-write locks,
/// so concurrent conversions may share one instance.
#[derive(Debug)]
pub struct Converter {
    pub(crate) registry: Arc<Registry>,
    pub(crate) shapes: ShapeCache,
    pub(crate) config: ConverterConfig,
    /// `{"<tag key>":`, the opening of every tagged JSON object
    pub(crate) tag_prefix: String,
}

impl Converter {
    /// Converter over `registry` with the default configuration
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, ConverterConfig::default())
    }

    /// Converter over `registry` with an explicit configuration
    pub fn with_config(registry: Arc<Registry>, config: ConverterConfig) -> Self {
        let mut tag_prefix = String::from("{");
        escape::write_quoted_full(&mut tag_prefix, &config.tag_key);
        tag_prefix.push(':');

        Converter {
            registry,
            shapes: ShapeCache::default(),
            config,
            tag_prefix,
        }
    }

    /// Type registry
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Number of cached JSON shape encoders
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Drop the registry name cache and every shape encoder.
    pub fn reset_caches(&self) {
        self.registry.reset();
        self.shapes.clear();
    }
}
