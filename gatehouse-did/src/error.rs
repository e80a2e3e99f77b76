//! Error types of the gatehouse-did crate.

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A type alias for a `Result` that uses `DidError` as the error type.
pub type DidResult<T> = Result<T, DidError>;

/// The main error type of the gatehouse-did crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DidError {
    /// Not a `did:<method>:<id>` identifier.
    #[error("Expected a `did:<method>:<id>` identifier: {0}")]
    InvalidDid(String),

    /// Not one of the known namespaces.
    #[error("Expected one of `testnet` or `mainnet`, got {0:?}")]
    InvalidNamespace(String),
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `DidResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> DidResult<T> {
    Result::Ok(value)
}
