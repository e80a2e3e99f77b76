//! # Gatehouse
//!
//! Route-level authorization for HTTP services.
//!
//! Every protected route is bound to the permission scope a caller needs, such as
//! `create:resource`. Most scopes are qualified by the namespace the request targets, so a caller
//! granted `create:resource:testnet` cannot create resources on `mainnet`. The [`Authorizer`] wires
//! the configured rule providers into a registry once at startup and then answers one question per
//! request: may this caller do this?
//!
//! ```
//! use std::collections::HashSet;
//!
//! use gatehouse::{config::authz::AuthzConfig, Authorizer};
//! use serde_json::json;
//!
//! let authorizer = Authorizer::from_config(&AuthzConfig::default()).unwrap();
//! let granted = HashSet::from(["create:resource:mainnet".to_owned()]);
//!
//! let decision = authorizer
//!     .authorize("POST", "/resource/create", &json!({ "network": "mainnet" }), Some(&granted))
//!     .unwrap();
//!
//! assert!(decision.allowed);
//! ```

#![warn(missing_docs)]

mod authorizer;
mod error;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use authorizer::*;
pub use error::*;

pub use gatehouse_config as config;
pub use gatehouse_did as did;
pub use gatehouse_path as path;
pub use gatehouse_rules as rules;

pub use gatehouse_rules::{
    AuthorizationDecision, AuthorizationEngine, Identity, Method, Namespace, RequestDescriptor,
    RuleRegistry,
};
