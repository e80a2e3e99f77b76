//! Default configuration values.

use gatehouse_did::Namespace;
use gatehouse_rules::{ResourceFamily, DEFAULT_DID_FIELDS, DEFAULT_EXPLICIT_FIELDS};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The namespace used when a request does not name or imply one.
pub const DEFAULT_NAMESPACE: Namespace = Namespace::Testnet;

/// The environment variable that overrides the default namespace.
pub const DEFAULT_NAMESPACE_ENV: &str = "GATEHOUSE_DEFAULT_NAMESPACE";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

pub(crate) const fn default_namespace() -> Namespace {
    DEFAULT_NAMESPACE
}

pub(crate) fn default_providers() -> Vec<ResourceFamily> {
    ResourceFamily::ALL.to_vec()
}

pub(crate) fn default_explicit_fields() -> Vec<String> {
    DEFAULT_EXPLICIT_FIELDS.map(String::from).to_vec()
}

pub(crate) fn default_did_fields() -> Vec<String> {
    DEFAULT_DID_FIELDS.map(String::from).to_vec()
}
