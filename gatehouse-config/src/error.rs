use gatehouse_rules::ResourceFamily;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A type alias for a `Result` that uses `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The main error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No rule provider is configured.
    #[error("At least one rule provider must be configured")]
    NoProviders,

    /// A rule provider is listed twice.
    #[error("Rule provider listed more than once: {0}")]
    DuplicateProvider(ResourceFamily),

    /// A namespace field list is empty.
    #[error("Field list cannot be empty: {0}")]
    EmptyFieldList(&'static str),

    /// An environment variable holds an invalid value.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnvValue {
        /// The variable name.
        var: &'static str,

        /// The rejected value.
        value: String,
    },

    /// Io error.
    #[error("Io error: {0}")]
    IoError(#[from] std::io::Error),

    /// Toml deserialization error.
    #[error("Toml deserialization error: {0}")]
    TomlError(#[from] toml::de::Error),
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `ConfigResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> ConfigResult<T> {
    Result::Ok(value)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
