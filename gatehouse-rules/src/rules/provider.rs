use crate::{Method, Rule, RuleError, RuleOptions, RuleResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The ordered rules of one resource family, e.g. everything under `/key`.
///
/// Providers are filled once at startup and then handed over to the
/// [`RuleRegistry`][crate::RuleRegistry]. Within a provider a route can only be bound to one
/// permission; across providers, the provider registered first wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleProvider {
    name: String,
    rules: Vec<Rule>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RuleProvider {
    /// Creates an empty provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Gets the provider name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiles and appends a rule.
    ///
    /// Registering a route this provider already has is a no-op when the permission is the same,
    /// and fails with [`RuleError::DuplicateRule`] when it differs. Routes are compared by shape, so
    /// `/key/:kid` and `/key/:id` are the same route.
    pub fn register_rule(
        &mut self,
        template: impl AsRef<str>,
        method: Method,
        permission: impl AsRef<str>,
        options: RuleOptions,
    ) -> RuleResult<&mut Self> {
        let rule = Rule::new(template, method, permission, options)?;

        if let Some(existing) = self.rules.iter().find(|existing| existing.same_route(&rule)) {
            if existing.permission() != rule.permission() {
                return Err(RuleError::DuplicateRule {
                    provider: self.name.clone(),
                    route: rule.route(),
                    existing: existing.permission_str(),
                    conflicting: rule.permission_str(),
                });
            }

            tracing::trace!(provider = %self.name, route = %rule.route(), "rule already registered");
            return Ok(self);
        }

        self.rules.push(rule);
        Ok(self)
    }

    /// Gets the rules in registration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Consumes the provider and returns its rules in registration order.
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the provider has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
