use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a route template operation.
pub type PatternResult<T> = Result<T, PatternError>;

/// An error raised while compiling a route template.
///
/// Every variant describes a malformed template. These are startup-time errors: a rule table with
/// a template that fails to compile must not be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The template has more than one `(.*)` segment.
    #[error("Invalid route template {0:?}: more than one wildcard segment")]
    MultipleWildcards(String),

    /// The `(.*)` segment is followed by other segments.
    #[error("Invalid route template {0:?}: wildcard segment must be the last segment")]
    NonTerminalWildcard(String),

    /// A `:name` segment has an empty or malformed name.
    #[error("Invalid route parameter name: {0:?}")]
    InvalidParamName(String),

    /// The same parameter name is bound twice.
    #[error("Duplicate route parameter name: {0:?}")]
    DuplicateParamName(String),

    /// A literal segment contains reserved characters.
    #[error("Invalid literal route segment: {0:?}")]
    InvalidLiteral(String),
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `PatternResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> PatternResult<T> {
    Result::Ok(value)
}
