//! The startup configuration of the authorization core.

use std::collections::HashSet;

use gatehouse_did::Namespace;
use gatehouse_rules::ResourceFamily;
use serde::{Deserialize, Serialize};
use structstruck::strike;
use typed_builder::TypedBuilder;

use crate::{ConfigError, ConfigResult, MainConfig};

use super::default::DEFAULT_NAMESPACE_ENV;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

strike! {
    #[strikethrough[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, TypedBuilder)]]
    /// The startup configuration of the authorization core.
    ///
    /// Every field has a default, so an empty file is a valid configuration that registers all
    /// built-in rule providers and resolves namespaces against `testnet`.
    pub struct AuthzConfig {
        /// The namespace used when a request does not name or imply one.
        #[serde(default = "super::default::default_namespace")]
        #[builder(default = super::default::default_namespace())]
        pub default_namespace: Namespace,

        /// The rule providers to register, in order. Earlier providers win on overlapping routes.
        #[serde(default = "super::default::default_providers")]
        #[builder(default = super::default::default_providers())]
        pub providers: Vec<ResourceFamily>,

        /// Where the namespace of a request is looked for.
        #[serde(default)]
        #[builder(default)]
        pub namespace:
            /// Where the namespace of a request is looked for.
            pub struct NamespaceConfig {
                /// The hint fields that name a namespace explicitly.
                #[serde(default = "super::default::default_explicit_fields")]
                #[builder(default = super::default::default_explicit_fields())]
                pub explicit_fields: Vec<String>,

                /// The hint fields and route parameters that may carry a DID.
                #[serde(default = "super::default::default_did_fields")]
                #[builder(default = super::default::default_did_fields())]
                pub did_fields: Vec<String>,
            }
    }
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AuthzConfig {
    /// Applies overrides from the process environment.
    ///
    /// `GATEHOUSE_DEFAULT_NAMESPACE` replaces the default namespace.
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides read through `lookup`, which maps a variable name to its value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        if let Some(value) = lookup(DEFAULT_NAMESPACE_ENV) {
            self.default_namespace = value.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
                var: DEFAULT_NAMESPACE_ENV,
                value,
            })?;
        }

        Ok(self)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl MainConfig for AuthzConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }

        let mut seen = HashSet::new();
        if let Some(family) = self.providers.iter().find(|family| !seen.insert(**family)) {
            return Err(ConfigError::DuplicateProvider(*family));
        }

        if self.namespace.explicit_fields.is_empty() {
            return Err(ConfigError::EmptyFieldList("namespace.explicit_fields"));
        }

        if self.namespace.did_fields.is_empty() {
            return Err(ConfigError::EmptyFieldList("namespace.did_fields"));
        }

        Ok(())
    }
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            default_namespace: super::default::default_namespace(),
            providers: super::default::default_providers(),
            namespace: Default::default(),
        }
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            explicit_fields: super::default::default_explicit_fields(),
            did_fields: super::default::default_did_fields(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
