//! Converter configuration

use ice_plain_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default discriminator key of tagged plain objects.
pub const DEFAULT_TAG_KEY: &str = "@ice-type";

/// Strings shorter than this many UTF-16 code units take the fast escaper.
pub const DEFAULT_FAST_ESCAPE_LIMIT: usize = 100;

/// Settings shared by the plain converter and the JSON encoder.
///
/// The tag key must not collide with a real field name of any registered
/// type. A field literally named like the tag key makes the plain form
/// ambiguous and is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Discriminator key present on every tagged plain object
    pub tag_key: String,
    /// Length bound (UTF-16 code units, exclusive) of the fast string path
    pub fast_escape_limit: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            fast_escape_limit: DEFAULT_FAST_ESCAPE_LIMIT,
        }
    }
}

impl ConverterConfig {
    /// Load from JSON text; missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: ConverterConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no converter can work with.
    pub fn validate(&self) -> Result<()> {
        if self.tag_key.is_empty() {
            return Err(Error::Json("tag_key must not be empty".to_string()));
        }
        Ok(())
    }
}
