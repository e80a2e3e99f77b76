use std::{collections::HashSet, sync::Arc};

use gatehouse_config::{authz::AuthzConfig, MainConfig};
use gatehouse_rules::{
    AuthorizationDecision, AuthorizationEngine, Identity, Method, NamespaceResolver,
    RequestDescriptor, RuleProvider, RuleRegistry, RuleResult, REASON_NO_MATCHING_RULE,
};
use serde_json::Value;

use crate::AuthzResult;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The entry point for hosts.
///
/// An `Authorizer` is built once at startup and then shared. Cloning it is cheap because the rule
/// registry lives behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Authorizer {
    engine: AuthorizationEngine,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Authorizer {
    /// Creates an authorizer around an engine.
    pub fn new(engine: AuthorizationEngine) -> Self {
        Self { engine }
    }

    /// Builds an authorizer from a configuration.
    ///
    /// The configuration is validated, then the providers it lists are built and registered in the
    /// listed order.
    pub fn from_config(config: &AuthzConfig) -> AuthzResult<Self> {
        config.validate()?;

        let providers = config
            .providers
            .iter()
            .map(|family| family.provider())
            .collect::<RuleResult<Vec<RuleProvider>>>()?;

        let registry = RuleRegistry::from_providers(providers);
        let resolver = NamespaceResolver::new(config.default_namespace)
            .with_explicit_fields(config.namespace.explicit_fields.iter().cloned())
            .with_did_fields(config.namespace.did_fields.iter().cloned());

        tracing::info!(
            default_namespace = %config.default_namespace,
            providers = config.providers.len(),
            "authorizer ready"
        );

        Ok(Self::new(AuthorizationEngine::new(
            Arc::new(registry),
            resolver,
        )))
    }

    /// Authorizes a request given as plain values.
    ///
    /// `hints` is the request body and query merged into a JSON object. `granted` is the caller's
    /// set of permission scopes, or `None` for an unauthenticated caller. A method that no rule can
    /// use is denied like any other unmatched request.
    pub fn authorize(
        &self,
        method: &str,
        path: &str,
        hints: &Value,
        granted: Option<&HashSet<String>>,
    ) -> AuthzResult<AuthorizationDecision> {
        let Ok(method) = method.parse::<Method>() else {
            tracing::debug!(method, path, "unsupported method");
            return Ok(AuthorizationDecision::deny(REASON_NO_MATCHING_RULE));
        };

        let request = RequestDescriptor::new(method, path).with_borrowed_hints(hints);
        Ok(self.engine.authorize_granted(&request, granted)?)
    }

    /// Authorizes a typed request.
    pub fn authorize_request(
        &self,
        request: &RequestDescriptor<'_>,
        identity: Option<&Identity>,
    ) -> AuthzResult<AuthorizationDecision> {
        Ok(self.engine.authorize(request, identity)?)
    }

    /// Gets the engine.
    pub fn engine(&self) -> &AuthorizationEngine {
        &self.engine
    }

    /// Gets the rule registry.
    pub fn registry(&self) -> &RuleRegistry {
        self.engine.registry()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
