use gatehouse_path::RouteParams;
use serde::Serialize;

use crate::{Method, Rule, RuleProvider};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The process-wide, read-only rule table.
///
/// The registry is the concatenation of its providers' rules in the order the providers were given.
/// That order is part of the contract: when several rules match a request, the first one wins, so a
/// more specific provider has to come before a more general one.
///
/// Building the registry is the only time rules are added. Afterwards it is only read and can be
/// shared across threads behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    entries: Vec<RegistryEntry>,
    shadowed: Vec<Shadowed>,
}

/// A rule together with the provider that registered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    /// The registering provider's name.
    pub provider: String,

    /// The rule.
    pub rule: Rule,
}

/// A rule that can never be selected because an earlier rule matches every request it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shadowed {
    /// The index of the unreachable rule.
    pub index: usize,

    /// The index of the earlier rule that wins.
    pub by: usize,
}

/// A rule that matched a request, with the values bound by its pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// The matching entry.
    pub entry: &'a RegistryEntry,

    /// The bound route parameters.
    pub params: RouteParams,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RuleRegistry {
    /// Builds the registry from providers, in order.
    pub fn from_providers(providers: impl IntoIterator<Item = RuleProvider>) -> Self {
        let mut registry = RuleRegistry::default();
        let mut provider_count = 0;

        for provider in providers {
            provider_count += 1;
            let name = provider.name().to_owned();
            for rule in provider.into_rules() {
                registry.push(name.clone(), rule);
            }
        }

        tracing::info!(
            rules = registry.entries.len(),
            providers = provider_count,
            shadowed = registry.shadowed.len(),
            "built rule registry"
        );

        registry
    }

    fn push(&mut self, provider: String, rule: Rule) {
        let index = self.entries.len();

        if rule.is_misconfigured() {
            tracing::warn!(
                provider = %provider,
                route = %rule.route(),
                "rule neither requires a permission nor allows unauthorized access"
            );
        }

        if let Some(by) = self
            .entries
            .iter()
            .position(|entry| entry.rule.shadows(&rule))
        {
            let winner = &self.entries[by];
            tracing::warn!(
                route = %rule.route(),
                provider = %provider,
                permission = %rule.permission_str(),
                winning_provider = %winner.provider,
                winning_permission = %winner.rule.permission_str(),
                "rule is shadowed by an earlier rule"
            );
            self.shadowed.push(Shadowed { index, by });
        }

        self.entries.push(RegistryEntry { provider, rule });
    }

    /// Returns every rule matching the request, in registration order.
    pub fn lookup(&self, method: Method, path: &str) -> Vec<RuleMatch<'_>> {
        self.entries
            .iter()
            .filter(|entry| entry.rule.method() == method)
            .filter_map(|entry| {
                let params = entry.rule.pattern().matches(path)?;
                Some(RuleMatch { entry, params })
            })
            .collect()
    }

    /// Returns the authoritative rule for the request: the first one that matches.
    pub fn first_match(&self, method: Method, path: &str) -> Option<RuleMatch<'_>> {
        self.entries
            .iter()
            .filter(|entry| entry.rule.method() == method)
            .find_map(|entry| {
                let params = entry.rule.pattern().matches(path)?;
                Some(RuleMatch { entry, params })
            })
    }

    /// Returns all entries in registration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Returns the rules that are unreachable because an earlier rule matches all of their requests.
    pub fn shadowed(&self) -> &[Shadowed] {
        &self.shadowed
    }

    /// Returns the entries whose rule neither requires a permission nor allows unauthorized access.
    pub fn misconfigured(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.rule.is_misconfigured())
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry has no rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RuleMatch<'_> {
    /// Gets the matching rule.
    pub fn rule(&self) -> &Rule {
        &self.entry.rule
    }

    /// Gets the name of the provider that registered the rule.
    pub fn provider(&self) -> &str {
        &self.entry.provider
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{ResourceFamily, RuleOptions, RuleResult};

    use super::*;

    fn providers() -> RuleResult<Vec<RuleProvider>> {
        let specific = crate::rules! {
            "specific" => {
                GET "/resource/search/:did" => "search:resource", SKIP_NAMESPACE;
                POST "/resource/create" => "create:resource";
            }
        }?;

        let fallback = crate::rules! {
            "fallback" => {
                GET "/resource/search/(.*)" => "", PUBLIC;
                POST "/resource/create" => "create:anything";
            }
        }?;

        Ok(vec![specific, fallback])
    }

    #[test_log::test]
    fn test_registry_lookup_preserves_registration_order() -> anyhow::Result<()> {
        let registry = RuleRegistry::from_providers(providers()?);
        assert_eq!(registry.len(), 4);

        let matches = registry.lookup(Method::GET, "/resource/search/abc123");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].provider(), "specific");
        assert_eq!(matches[0].params.get("did"), Some("abc123"));
        assert_eq!(matches[1].provider(), "fallback");
        assert_eq!(matches[1].params.tail(), Some("abc123"));

        // Only the wildcard covers deeper paths.
        let matches = registry.lookup(Method::GET, "/resource/search/abc/123");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].rule().allow_unauthorized());

        Ok(())
    }

    #[test_log::test]
    fn test_registry_first_match_wins() -> anyhow::Result<()> {
        for _ in 0..3 {
            let registry = RuleRegistry::from_providers(providers()?);
            let winner = registry
                .first_match(Method::POST, "/resource/create")
                .unwrap();
            assert_eq!(winner.provider(), "specific");
            assert_eq!(winner.rule().permission_str(), "create:resource");
        }

        // Reversing the providers reverses the winner.
        let registry = RuleRegistry::from_providers(providers()?.into_iter().rev());
        let winner = registry
            .first_match(Method::POST, "/resource/create")
            .unwrap();
        assert_eq!(winner.provider(), "fallback");

        Ok(())
    }

    #[test_log::test]
    fn test_registry_reports_shadowed_rules() -> anyhow::Result<()> {
        let registry = RuleRegistry::from_providers(providers()?);
        assert_eq!(registry.shadowed(), &[Shadowed { index: 3, by: 1 }]);

        Ok(())
    }

    #[test_log::test]
    fn test_registry_reports_broader_earlier_rules() -> anyhow::Result<()> {
        let general = crate::rules! {
            "general" => {
                GET "/resource/search/(.*)" => "", PUBLIC;
            }
        }?;

        let specific = crate::rules! {
            "specific" => {
                GET "/resource/search/:did" => "search:resource";
                GET "/resource/list" => "list:resource", SKIP_NAMESPACE;
            }
        }?;

        let registry = RuleRegistry::from_providers([general, specific]);
        assert_eq!(registry.shadowed(), &[Shadowed { index: 1, by: 0 }]);

        let winner = registry
            .first_match(Method::GET, "/resource/search/abc123")
            .unwrap();
        assert_eq!(winner.provider(), "general");

        Ok(())
    }

    #[test]
    fn test_registry_no_match() -> anyhow::Result<()> {
        let registry = RuleRegistry::from_providers(providers()?);
        assert!(registry.lookup(Method::DELETE, "/resource/create").is_empty());
        assert!(registry.first_match(Method::GET, "/resource/list").is_none());
        assert!(RuleRegistry::default().first_match(Method::GET, "/").is_none());

        Ok(())
    }

    #[test]
    fn test_registry_misconfigured() -> anyhow::Result<()> {
        let mut provider = RuleProvider::new("broken");
        provider.register_rule("/account", Method::GET, "", RuleOptions::NONE)?;

        let registry = RuleRegistry::from_providers([provider]);
        assert_eq!(registry.misconfigured().count(), 1);

        Ok(())
    }

    #[test]
    fn test_registry_builtin_families() -> anyhow::Result<()> {
        let providers = ResourceFamily::ALL
            .into_iter()
            .map(|family| family.provider())
            .collect::<RuleResult<Vec<_>>>()?;

        let registry = RuleRegistry::from_providers(providers);
        assert!(registry.shadowed().is_empty());
        assert_eq!(registry.misconfigured().count(), 0);

        let winner = registry.first_match(Method::GET, "/event/list").unwrap();
        assert_eq!(winner.rule().permission_str(), "list:event");

        let winner = registry.first_match(Method::GET, "/event/1234").unwrap();
        assert_eq!(winner.rule().permission_str(), "read:event");

        Ok(())
    }
}
