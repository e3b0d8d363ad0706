//! Resource configuration.
//!
//! Resource ceilings bound how much work a single key value may perform
//! before it has to be replaced. They are passed explicitly to the key
//! constructors; [`ResourceConfig::default`] carries the library defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::PrimitivesError;

/// Default number of 64-bit blocks a Magma key may process.
pub const DEFAULT_MAGMA_RESOURCE: i64 = 4_194_304;

/// Default number of 128-bit blocks a Kuznyechik key may process.
pub const DEFAULT_KUZNYECHIK_RESOURCE: i64 = 33_554_432;

/// Default number of tags an HMAC key may compute.
pub const DEFAULT_HMAC_RESOURCE: i64 = 65_536;

/// Per-algorithm resource ceilings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Blocks per Magma key.
    pub magma_cipher_resource: i64,
    /// Blocks per Kuznyechik key.
    pub kuznyechik_cipher_resource: i64,
    /// Computations per HMAC key.
    pub hmac_key_resource: i64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        ResourceConfig {
            magma_cipher_resource: DEFAULT_MAGMA_RESOURCE,
            kuznyechik_cipher_resource: DEFAULT_KUZNYECHIK_RESOURCE,
            hmac_key_resource: DEFAULT_HMAC_RESOURCE,
        }
    }
}

impl ResourceConfig {
    /// Parse a configuration from a JSON document.
    ///
    /// Fields that are absent keep their default values.
    ///
    /// # Arguments
    /// * `json` - The JSON text.
    ///
    /// # Returns
    /// `Ok(ResourceConfig)` on success, or `Config` if the document is
    /// malformed or holds a negative ceiling.
    pub fn from_json(json: &str) -> Result<Self, PrimitivesError> {
        let config: ResourceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PrimitivesError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PrimitivesError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "resource configuration loaded");
        Ok(config)
    }

    /// Reject negative ceilings.
    pub fn validate(&self) -> Result<(), PrimitivesError> {
        for (name, value) in self.options() {
            if value < 0 {
                return Err(PrimitivesError::Config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Named option values, in display order.
    pub fn options(&self) -> [(&'static str, i64); 3] {
        [
            ("magma_cipher_resource", self.magma_cipher_resource),
            ("kuznyechik_cipher_resource", self.kuznyechik_cipher_resource),
            ("hmac_key_resource", self.hmac_key_resource),
        ]
    }
}
