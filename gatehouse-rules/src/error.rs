//! Error types of the gatehouse-rules crate.

use gatehouse_path::PatternError;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for rule and authorization operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Defines the types of errors that can occur while building a rule table or authorizing a request.
///
/// Denials are not errors. A request that matches no rule, or whose caller lacks the permission,
/// yields an [`AuthorizationDecision`][crate::AuthorizationDecision] with `allowed` set to `false`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// Route template does not compile.
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    /// Permission template is not `action:resource[:namespace]`.
    #[error("Invalid permission: {0:?}")]
    InvalidPermission(String),

    /// Unknown HTTP method.
    #[error("Unsupported HTTP method: {0:?}")]
    UnsupportedMethod(String),

    /// Unknown resource family name.
    #[error("Unknown resource family: {0:?}")]
    UnknownResourceFamily(String),

    /// A provider registered the same route twice with different permissions.
    #[error("Provider {provider:?} registers {route} with both {existing:?} and {conflicting:?}")]
    DuplicateRule {
        /// The provider that holds both rules.
        provider: String,

        /// The method and template of the route.
        route: String,

        /// The permission registered first.
        existing: String,

        /// The permission registered second.
        conflicting: String,
    },

    /// The matched rule neither requires a permission nor allows unauthorized access.
    #[error("Rule for {0} neither requires a permission nor allows unauthorized access")]
    MisconfiguredRule(String),

    /// The request named a namespace outside the known set.
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RuleError {
    /// Returns whether the error was caused by the request rather than the rule table.
    ///
    /// Hosts map these to a 4xx response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RuleError::InvalidNamespace(_))
    }

    /// Returns whether the error can only come from building the rule table.
    ///
    /// A process that hits one of these while starting up must not serve requests.
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            RuleError::InvalidPattern(_)
                | RuleError::InvalidPermission(_)
                | RuleError::UnsupportedMethod(_)
                | RuleError::UnknownResourceFamily(_)
                | RuleError::DuplicateRule { .. }
        )
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `RuleResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> RuleResult<T> {
    Result::Ok(value)
}
