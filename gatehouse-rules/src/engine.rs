use std::{collections::HashSet, sync::Arc};

use gatehouse_did::Namespace;
use serde::Serialize;

use crate::{Identity, NamespaceResolver, RequestDescriptor, RuleError, RuleRegistry, RuleResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The denial reason when no rule matches the request.
pub const REASON_NO_MATCHING_RULE: &str = "no matching rule";

/// The denial reason when the rule needs an identity and there is none.
pub const REASON_UNAUTHENTICATED: &str = "unauthenticated";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Decides whether a request may proceed.
///
/// The engine is a pure function of its registry, its resolver, the request and the identity. It
/// never writes anything, so it can be cloned freely and called from any number of threads.
#[derive(Debug, Clone)]
pub struct AuthorizationEngine {
    registry: Arc<RuleRegistry>,
    resolver: NamespaceResolver,
}

/// The outcome of [`AuthorizationEngine::authorize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationDecision {
    /// Whether the request may proceed.
    pub allowed: bool,

    /// The permission scope the caller needed, when a permission check took place.
    pub required_permission: Option<String>,

    /// Why the request was denied.
    pub reason: Option<String>,

    /// The namespace resolved for the request, when one was needed.
    pub namespace: Option<Namespace>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AuthorizationEngine {
    /// Creates an engine over a registry.
    pub fn new(registry: Arc<RuleRegistry>, resolver: NamespaceResolver) -> Self {
        Self { registry, resolver }
    }

    /// Gets the registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Gets the namespace resolver.
    pub fn resolver(&self) -> &NamespaceResolver {
        &self.resolver
    }

    /// Authorizes a request.
    ///
    /// The first matching rule decides. Rules that allow unauthorized access grant it without
    /// looking at `identity`. Otherwise the caller needs the rule's permission, with the request's
    /// namespace appended unless the rule skips it.
    ///
    /// Fails with [`RuleError::MisconfiguredRule`] when the matched rule neither requires a
    /// permission nor allows unauthorized access, and with [`RuleError::InvalidNamespace`] when the
    /// request names an unknown namespace. A request that matches no rule is denied, not failed.
    pub fn authorize(
        &self,
        request: &RequestDescriptor<'_>,
        identity: Option<&Identity>,
    ) -> RuleResult<AuthorizationDecision> {
        let _span = identity
            .map(|identity| tracing::debug_span!("authorize", subject = %identity.subject_id).entered());

        self.authorize_granted(request, identity.map(|identity| &identity.granted_permissions))
    }

    /// Authorizes a request for a caller known only by its granted permission scopes.
    ///
    /// `None` is an unauthenticated caller. Decides exactly like [`AuthorizationEngine::authorize`].
    pub fn authorize_granted(
        &self,
        request: &RequestDescriptor<'_>,
        granted: Option<&HashSet<String>>,
    ) -> RuleResult<AuthorizationDecision> {
        let Some(matched) = self
            .registry
            .first_match(request.method(), request.path())
        else {
            tracing::debug!(method = %request.method(), path = request.path(), "no matching rule");
            return Ok(AuthorizationDecision::deny(REASON_NO_MATCHING_RULE));
        };

        let rule = matched.rule();
        if rule.allow_unauthorized() {
            tracing::debug!(route = %rule.route(), "unauthorized access allowed");
            return Ok(AuthorizationDecision::allow(None, None));
        }

        let Some(permission) = rule.permission() else {
            tracing::error!(
                provider = matched.provider(),
                route = %rule.route(),
                "matched a rule that neither requires a permission nor allows unauthorized access"
            );
            return Err(RuleError::MisconfiguredRule(rule.route()));
        };

        let Some(granted) = granted.filter(|granted| !granted.is_empty()) else {
            tracing::debug!(route = %rule.route(), "no identity");
            return Ok(AuthorizationDecision::deny(REASON_UNAUTHENTICATED));
        };

        let (required, namespace) = if rule.skip_namespace() {
            (permission.to_string(), None)
        } else {
            let namespace = self.resolver.resolve(request, &matched.params)?;
            (permission.with_namespace(namespace).to_string(), Some(namespace))
        };

        let allowed = granted.contains(&required);
        tracing::debug!(
            route = %rule.route(),
            required = %required,
            allowed,
            "authorization decision"
        );

        let decision = if allowed {
            AuthorizationDecision::allow(Some(required), namespace)
        } else {
            AuthorizationDecision {
                allowed: false,
                reason: Some(format!("missing permission {}", required)),
                required_permission: Some(required),
                namespace,
            }
        };

        Ok(decision)
    }
}

impl AuthorizationDecision {
    /// Creates an allowing decision.
    pub fn allow(required_permission: Option<String>, namespace: Option<Namespace>) -> Self {
        Self {
            allowed: true,
            required_permission,
            reason: None,
            namespace,
        }
    }

    /// Creates a denying decision without a permission check.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            required_permission: None,
            reason: Some(reason.into()),
            namespace: None,
        }
    }

    /// Returns whether the request may proceed.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Method, ResourceFamily, RuleOptions, RuleProvider};

    use super::*;

    fn engine(providers: Vec<RuleProvider>, default_namespace: Namespace) -> AuthorizationEngine {
        AuthorizationEngine::new(
            Arc::new(RuleRegistry::from_providers(providers)),
            NamespaceResolver::new(default_namespace),
        )
    }

    fn builtin_engine() -> anyhow::Result<AuthorizationEngine> {
        let providers = ResourceFamily::ALL
            .into_iter()
            .map(|family| family.provider())
            .collect::<RuleResult<Vec<_>>>()?;

        Ok(engine(providers, Namespace::Testnet))
    }

    #[test_log::test]
    fn test_skip_namespace_rule_allows_exact_permission() -> anyhow::Result<()> {
        let mut provider = RuleProvider::new("key");
        provider.register_rule("/key/create", Method::POST, "create:key", RuleOptions::SKIP_NAMESPACE)?;
        let engine = engine(vec![provider], Namespace::Testnet);

        let identity = Identity::new("customer", ["create:key"]);
        let request = RequestDescriptor::new(Method::POST, "/key/create");

        let decision = engine.authorize(&request, Some(&identity))?;
        assert_eq!(
            decision,
            AuthorizationDecision::allow(Some("create:key".to_owned()), None)
        );

        Ok(())
    }

    #[test_log::test]
    fn test_namespace_mismatch_is_denied() -> anyhow::Result<()> {
        let mut provider = RuleProvider::new("resource");
        provider.register_rule("/resource/create", Method::POST, "create:resource", RuleOptions::NONE)?;
        let engine = engine(vec![provider], Namespace::Testnet);

        let identity = Identity::new("customer", ["create:resource:testnet"]);
        let request = RequestDescriptor::new(Method::POST, "/resource/create")
            .with_hint("namespace", "mainnet");

        let decision = engine.authorize(&request, Some(&identity))?;
        assert!(!decision.allowed);
        assert_eq!(
            decision.required_permission.as_deref(),
            Some("create:resource:mainnet")
        );
        assert!(decision
            .reason
            .as_deref()
            .is_some_and(|reason| reason.contains("create:resource:mainnet")));
        assert_eq!(decision.namespace, Some(Namespace::Mainnet));

        // The same caller on its own namespace.
        let request = RequestDescriptor::new(Method::POST, "/resource/create");
        assert!(engine.authorize(&request, Some(&identity))?.allowed);

        Ok(())
    }

    #[test_log::test]
    fn test_unauthorized_rule_needs_no_identity() -> anyhow::Result<()> {
        let mut provider = RuleProvider::new("resource");
        provider.register_rule(
            "/resource/search/(.*)",
            Method::GET,
            "",
            RuleOptions {
                skip_namespace: false,
                allow_unauthorized: true,
            },
        )?;
        let engine = engine(vec![provider], Namespace::Testnet);

        let request = RequestDescriptor::new(Method::GET, "/resource/search/abc123");
        assert!(engine.authorize(&request, None)?.allowed);

        let nobody = Identity::new("nobody", Vec::<String>::new());
        assert!(engine.authorize(&request, Some(&nobody))?.allowed);

        // Not even a bad namespace is looked at.
        let request = request.with_hint("namespace", "lunanet");
        assert!(engine.authorize(&request, None)?.allowed);

        Ok(())
    }

    #[test_log::test]
    fn test_no_matching_rule_is_denied() -> anyhow::Result<()> {
        let engine = builtin_engine()?;
        let identity = Identity::new("admin", ["read:account", "create:account"]);

        let request = RequestDescriptor::new(Method::DELETE, "/account");
        let decision = engine.authorize(&request, Some(&identity))?;
        assert_eq!(decision, AuthorizationDecision::deny("no matching rule"));

        Ok(())
    }

    #[test_log::test]
    fn test_invalid_namespace_fails() -> anyhow::Result<()> {
        let engine = builtin_engine()?;
        let identity = Identity::new("customer", ["create:resource:testnet"]);

        let request = RequestDescriptor::new(Method::POST, "/resource/create")
            .with_hints(json!({ "namespace": "lunanet" }));
        let result = engine.authorize(&request, Some(&identity));
        assert_eq!(result, Err(RuleError::InvalidNamespace("lunanet".to_owned())));
        assert!(result.unwrap_err().is_client_error());

        Ok(())
    }

    #[test_log::test]
    fn test_missing_identity_is_unauthenticated() -> anyhow::Result<()> {
        let engine = builtin_engine()?;
        let request = RequestDescriptor::new(Method::GET, "/account");

        let decision = engine.authorize(&request, None)?;
        assert_eq!(decision, AuthorizationDecision::deny("unauthenticated"));

        let empty = Identity::new("customer", Vec::<String>::new());
        let decision = engine.authorize(&request, Some(&empty))?;
        assert_eq!(decision.reason.as_deref(), Some("unauthenticated"));

        Ok(())
    }

    #[test_log::test]
    fn test_skip_namespace_ignores_request_namespace() -> anyhow::Result<()> {
        let engine = builtin_engine()?;
        let identity = Identity::new("customer", ["read:account"]);

        let request = RequestDescriptor::new(Method::GET, "/account")
            .with_hints(json!({ "network": "mainnet", "did": "did:cheqd:mainnet:abc" }));
        let decision = engine.authorize(&request, Some(&identity))?;
        assert!(decision.allowed);
        assert_eq!(decision.required_permission.as_deref(), Some("read:account"));
        assert_eq!(decision.namespace, None);

        // A namespaced grant does not stand in for the bare one.
        let identity = Identity::new("customer", ["read:account:mainnet"]);
        assert!(!engine.authorize(&request, Some(&identity))?.allowed);

        Ok(())
    }

    #[test_log::test]
    fn test_namespace_from_route_did() -> anyhow::Result<()> {
        let engine = builtin_engine()?;
        let identity = Identity::new("customer", ["deactivate:did:mainnet"]);

        let request = RequestDescriptor::new(Method::POST, "/did/deactivate/did:cheqd:mainnet:abc");
        let decision = engine.authorize(&request, Some(&identity))?;
        assert!(decision.allowed);
        assert_eq!(decision.namespace, Some(Namespace::Mainnet));

        Ok(())
    }

    #[test_log::test]
    fn test_misconfigured_rule_fails() -> anyhow::Result<()> {
        let mut provider = RuleProvider::new("broken");
        provider.register_rule("/account", Method::GET, "", RuleOptions::SKIP_NAMESPACE)?;
        let engine = engine(vec![provider], Namespace::Testnet);

        let request = RequestDescriptor::new(Method::GET, "/account");
        let identity = Identity::new("admin", ["read:account"]);

        assert_eq!(
            engine.authorize(&request, Some(&identity)),
            Err(RuleError::MisconfiguredRule("GET /account".to_owned()))
        );
        assert_eq!(
            engine.authorize(&request, None),
            Err(RuleError::MisconfiguredRule("GET /account".to_owned()))
        );

        Ok(())
    }

    #[test_log::test]
    fn test_authorize_granted_matches_identity() -> anyhow::Result<()> {
        let engine = builtin_engine()?;
        let identity = Identity::new("customer", ["create:resource:mainnet", "list:resource"]);

        let requests = [
            RequestDescriptor::new(Method::POST, "/resource/create").with_hint("network", "mainnet"),
            RequestDescriptor::new(Method::POST, "/resource/create"),
            RequestDescriptor::new(Method::GET, "/resource/list"),
            RequestDescriptor::new(Method::DELETE, "/resource/list"),
        ];

        for request in &requests {
            assert_eq!(
                engine.authorize_granted(request, Some(&identity.granted_permissions))?,
                engine.authorize(request, Some(&identity))?
            );
        }

        let request = &requests[0];
        assert_eq!(
            engine.authorize_granted(request, None)?,
            AuthorizationDecision::deny(REASON_UNAUTHENTICATED)
        );

        Ok(())
    }

    #[test]
    fn test_engine_is_shareable_across_threads() -> anyhow::Result<()> {
        let engine = builtin_engine()?;
        let identity = Arc::new(Identity::new("customer", ["create:key"]));

        let handles = (0..4)
            .map(|_| {
                let engine = engine.clone();
                let identity = Arc::clone(&identity);
                std::thread::spawn(move || {
                    let request = RequestDescriptor::new(Method::POST, "/key/create");
                    engine.authorize(&request, Some(identity.as_ref())).map(|d| d.allowed)
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(true));
        }

        Ok(())
    }
}
