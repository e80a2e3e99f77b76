#![warn(missing_docs)]
#![allow(clippy::module_inception)]

//! The authorization rule engine.
//!
//! Rules bind an HTTP method and a route template to the permission a caller needs. Each resource
//! family contributes its rules through a [`RuleProvider`]; the providers are concatenated once,
//! in a fixed order, into a read-only [`RuleRegistry`]. For every request the
//! [`AuthorizationEngine`] takes the first matching rule, appends the namespace resolved by the
//! [`NamespaceResolver`] unless the rule opts out, and checks the result against the caller's
//! granted permissions.
//!
//! Permission scopes have the form `action:resource` or `action:resource:namespace`, for example
//! `create:resource:testnet`.

mod engine;
mod error;
mod method;
mod permission;
mod registry;
mod request;
mod resolver;
mod rules;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use engine::*;
pub use error::*;
pub use method::*;
pub use permission::*;
pub use registry::*;
pub use request::*;
pub use resolver::*;
pub use rules::*;

pub use gatehouse_did::Namespace;
pub use gatehouse_path::{PathPattern, RouteParams};
