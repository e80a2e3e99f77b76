use std::{fmt::Display, str::FromStr};

use gatehouse_did::Namespace;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{RuleError, RuleResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Represents the character used to separate the parts of a permission scope.
pub const SCOPE_SEPARATOR: char = ':';

lazy_static! {
    static ref RE_SCOPE_PART: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A permission scope such as `create:key` or `create:resource:testnet`.
///
/// A scope names an `action` and a `resource`, both lower-kebab-case, and optionally the
/// [`Namespace`] the action applies to. This is the format other services use when granting
/// permissions, so a scope always displays back to the string it was parsed from (with the
/// namespace in lowercase).
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug, Hash)]
pub struct Permission {
    action: String,
    resource: String,
    namespace: Option<Namespace>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Permission {
    /// Creates a permission scope without a namespace.
    pub fn new(action: impl Into<String>, resource: impl Into<String>) -> RuleResult<Self> {
        let action = action.into();
        let resource = resource.into();

        for part in [&action, &resource] {
            if !RE_SCOPE_PART.is_match(part) {
                return Err(RuleError::InvalidPermission(format!("{action}:{resource}")));
            }
        }

        Ok(Self {
            action,
            resource,
            namespace: None,
        })
    }

    /// Gets the action, e.g. `create`.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Gets the resource, e.g. `resource`.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Gets the namespace, if the scope has one.
    pub fn namespace(&self) -> Option<Namespace> {
        self.namespace
    }

    /// Returns whether the scope has a namespace.
    pub fn is_namespaced(&self) -> bool {
        self.namespace.is_some()
    }

    /// Returns the scope narrowed to a namespace, replacing any namespace it already had.
    pub fn with_namespace(&self, namespace: Namespace) -> Permission {
        Permission {
            action: self.action.clone(),
            resource: self.resource.clone(),
            namespace: Some(namespace),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Serialize and Deserialize
//--------------------------------------------------------------------------------------------------

impl Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Permission, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Froms
//--------------------------------------------------------------------------------------------------

impl FromStr for Permission {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RuleError::InvalidPermission(s.to_owned());
        let mut parts = s.split(SCOPE_SEPARATOR);

        let (Some(action), Some(resource)) = (parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let namespace = parts
            .next()
            .map(|namespace| namespace.parse::<Namespace>().map_err(|_| invalid()))
            .transpose()?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        let permission = Permission::new(action, resource).map_err(|_| invalid())?;
        Ok(Self {
            namespace,
            ..permission
        })
    }
}

impl TryFrom<&str> for Permission {
    type Error = RuleError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Permission {
    type Error = RuleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.as_str().parse()
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.action, SCOPE_SEPARATOR, self.resource)?;
        if let Some(namespace) = self.namespace {
            write!(f, "{}{}", SCOPE_SEPARATOR, namespace)?;
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_constructor() -> anyhow::Result<()> {
        let permission = Permission::from_str("create:key")?;
        assert_eq!(permission, Permission::new("create", "key")?);
        assert_eq!(permission.action(), "create");
        assert_eq!(permission.resource(), "key");
        assert!(!permission.is_namespaced());

        let permission = Permission::from_str("create:resource:testnet")?;
        assert_eq!(permission.namespace(), Some(Namespace::Testnet));

        let permission = Permission::from_str("issue:trust-registry")?;
        assert_eq!(permission.resource(), "trust-registry");

        // Fails

        assert!(Permission::from_str("").is_err());
        assert!(Permission::from_str("create").is_err());
        assert!(Permission::from_str("create:").is_err());
        assert!(Permission::from_str("Create:key").is_err());
        assert!(Permission::from_str("create:key_pair").is_err());
        assert!(Permission::from_str("create:-key").is_err());
        assert!(Permission::from_str("create:resource:lunanet").is_err());
        assert!(Permission::from_str("create:resource:testnet:extra").is_err());

        Ok(())
    }

    #[test]
    fn test_permission_display() -> anyhow::Result<()> {
        for scope in ["read:account", "create:resource:mainnet", "list:trust-registry"] {
            assert_eq!(Permission::from_str(scope)?.to_string(), scope);
        }

        assert!(Permission::from_str("create:resource:TESTNET").is_err());

        Ok(())
    }

    #[test]
    fn test_permission_with_namespace() -> anyhow::Result<()> {
        let permission = Permission::from_str("create:resource")?;
        let narrowed = permission.with_namespace(Namespace::Mainnet);
        assert_eq!(narrowed.to_string(), "create:resource:mainnet");
        assert_eq!(
            narrowed.with_namespace(Namespace::Testnet).to_string(),
            "create:resource:testnet"
        );

        Ok(())
    }

    #[test]
    fn test_permission_serde() -> anyhow::Result<()> {
        let permission: Permission = serde_json::from_str(r#""verify:credential:testnet""#)?;
        assert_eq!(permission.namespace(), Some(Namespace::Testnet));
        assert_eq!(
            serde_json::to_string(&permission)?,
            r#""verify:credential:testnet""#
        );

        Ok(())
    }
}
