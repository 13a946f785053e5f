#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::ConfigError;
use crate::prime::next_prime;

/// Construction-time settings for a registry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RegistryConfig {
    /// Requested slot count. Rounded up to a prime of at least 3.
    pub initial_capacity: usize,
    /// Fraction of occupied slots (live or tombstoned) that triggers a
    /// resize before the next insertion.
    pub max_load_factor: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 101,
            max_load_factor: 0.75,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(ConfigError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }

    /// The capacity a registry built from this config actually starts with.
    pub fn effective_capacity(&self) -> usize {
        next_prime(self.initial_capacity.max(3))
    }

    /// Parse and validate a TOML config.
    ///
    /// ```toml
    /// initial_capacity = 211
    /// max_load_factor = 0.5
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
