use std::{fs, path::Path};

use crate::ConfigResult;

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// A configuration that is read from TOML once at startup.
pub trait MainConfig {
    /// Checks the values serde cannot check on its own.
    fn validate(&self) -> ConfigResult<()>;

    /// Parses the configuration from a TOML file without validating it.
    fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self>
    where
        Self: Sized + for<'de> serde::Deserialize<'de>,
    {
        let config = fs::read_to_string(path)?;
        Self::from_string(config)
    }

    /// Parses the configuration from a TOML string without validating it.
    fn from_string(config: impl AsRef<str>) -> ConfigResult<Self>
    where
        Self: Sized + for<'de> serde::Deserialize<'de>,
    {
        let config = toml::from_str(config.as_ref())?;
        Ok(config)
    }

    /// Parses and validates the configuration from a TOML file.
    fn load(path: impl AsRef<Path>) -> ConfigResult<Self>
    where
        Self: Sized + for<'de> serde::Deserialize<'de>,
    {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
