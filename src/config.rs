//! # Codec Configuration
//!
//! Knobs that change how frames are decoded and printed. The configuration
//! is plain data and can be loaded from JSON:
//!
//! ```json
//! { "length_policy": "lenient", "uppercase_hex": true }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::MaxError;

/// What to do with a payload whose length matches no known layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Fail with `UnsupportedPayloadLength`
    #[default]
    Strict,
    /// Decode the longest known layout that fits and ignore the rest
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Handling of payloads with unknown lengths
    pub length_policy: LengthPolicy,

    /// Print encoded frames in uppercase hex, as the CUL firmware does
    pub uppercase_hex: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            length_policy: LengthPolicy::Strict,
            uppercase_hex: true,
        }
    }
}

impl CodecConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, MaxError> {
        serde_json::from_str(json).map_err(|e| MaxError::Config(e.to_string()))
    }

    /// Loads a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MaxError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| MaxError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded codec configuration from {}", path.display());
        Ok(config)
    }
}
