use gatehouse_config::ConfigError;
use gatehouse_rules::RuleError;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A type alias for a `Result` that uses `AuthzError` as the error type.
pub type AuthzResult<T> = Result<T, AuthzError>;

/// The main error type.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A rule error, at startup or while authorizing a request.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// A configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AuthzError {
    /// Returns whether the error was caused by the request, e.g. an unknown namespace.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AuthzError::Rule(error) if error.is_client_error())
    }

    /// Returns whether the error happened while building the authorizer.
    pub fn is_startup_error(&self) -> bool {
        match self {
            AuthzError::Rule(error) => error.is_startup_error(),
            AuthzError::Config(_) => true,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `AuthzResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> AuthzResult<T> {
    Result::Ok(value)
}
