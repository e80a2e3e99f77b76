use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{RuleError, RuleProvider, RuleResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The resource families that ship with a built-in [`RuleProvider`].
///
/// Families are named in kebab-case in configuration files, e.g. `auth-info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceFamily {
    /// Public information about the authentication setup.
    AuthInfo,

    /// Customer accounts.
    Account,

    /// Keys held on behalf of the customer.
    Key,

    /// DIDs and DID documents.
    Did,

    /// DID-linked resources.
    Resource,

    /// Verifiable credentials and their status.
    Credential,

    /// Verifiable presentations.
    Presentation,

    /// Trust registry accreditations.
    Accreditation,

    /// Audit events.
    Event,

    /// Agent directory records in OASF format.
    Oasf,

    /// Generic stored records.
    Record,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ResourceFamily {
    /// All families, in the default registration order.
    pub const ALL: [ResourceFamily; 11] = [
        ResourceFamily::AuthInfo,
        ResourceFamily::Account,
        ResourceFamily::Key,
        ResourceFamily::Did,
        ResourceFamily::Resource,
        ResourceFamily::Credential,
        ResourceFamily::Presentation,
        ResourceFamily::Accreditation,
        ResourceFamily::Event,
        ResourceFamily::Oasf,
        ResourceFamily::Record,
    ];

    /// Returns the kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceFamily::AuthInfo => "auth-info",
            ResourceFamily::Account => "account",
            ResourceFamily::Key => "key",
            ResourceFamily::Did => "did",
            ResourceFamily::Resource => "resource",
            ResourceFamily::Credential => "credential",
            ResourceFamily::Presentation => "presentation",
            ResourceFamily::Accreditation => "accreditation",
            ResourceFamily::Event => "event",
            ResourceFamily::Oasf => "oasf",
            ResourceFamily::Record => "record",
        }
    }

    /// Builds the family's rule provider.
    pub fn provider(&self) -> RuleResult<RuleProvider> {
        let name = self.as_str();
        match self {
            ResourceFamily::AuthInfo => crate::rules! {
                name => {
                    GET "/auth/user-info" => "", PUBLIC;
                }
            },
            ResourceFamily::Account => crate::rules! {
                name => {
                    GET "/account" => "read:account", SKIP_NAMESPACE;
                    POST "/account" => "create:account", SKIP_NAMESPACE;
                    POST "/account/create" => "create:account", SKIP_NAMESPACE;
                    GET "/account/idtoken" => "read:account", SKIP_NAMESPACE;
                }
            },
            ResourceFamily::Key => crate::rules! {
                name => {
                    POST "/key/create" => "create:key", SKIP_NAMESPACE;
                    POST "/key/import" => "import:key", SKIP_NAMESPACE;
                    GET "/key/read/(.*)" => "read:key", SKIP_NAMESPACE;
                    GET "/key/list" => "list:key", SKIP_NAMESPACE;
                }
            },
            ResourceFamily::Did => crate::rules! {
                name => {
                    POST "/did/create" => "create:did";
                    POST "/did/update" => "update:did";
                    POST "/did/import" => "import:did";
                    POST "/did/deactivate/:did" => "deactivate:did";
                    GET "/did/list" => "list:did";
                    GET "/did/search/(.*)" => "", PUBLIC;
                }
            },
            ResourceFamily::Resource => crate::rules! {
                name => {
                    POST "/resource/create" => "create:resource";
                    POST "/resource/create/:did" => "create:resource";
                    GET "/resource/list" => "list:resource", SKIP_NAMESPACE;
                    GET "/resource/search/(.*)" => "", PUBLIC;
                }
            },
            ResourceFamily::Credential => crate::rules! {
                name => {
                    POST "/credential/issue" => "issue:credential";
                    POST "/credential/verify" => "verify:credential";
                    POST "/credential/revoke" => "revoke:credential";
                    POST "/credential/suspend" => "suspend:credential";
                    POST "/credential/reinstate" => "reinstate:credential";
                }
            },
            ResourceFamily::Presentation => crate::rules! {
                name => {
                    POST "/presentation/create" => "create:presentation", SKIP_NAMESPACE;
                    POST "/presentation/verify" => "verify:presentation";
                }
            },
            ResourceFamily::Accreditation => crate::rules! {
                name => {
                    POST "/trust-registry/accreditation/issue" => "issue:accreditation";
                    POST "/trust-registry/accreditation/verify" => "verify:accreditation";
                    POST "/trust-registry/accreditation/revoke" => "revoke:accreditation";
                    POST "/trust-registry/accreditation/suspend" => "suspend:accreditation";
                    POST "/trust-registry/accreditation/reinstate" => "reinstate:accreditation";
                    GET "/trust-registry/accreditation/list" => "list:accreditation", SKIP_NAMESPACE;
                }
            },
            ResourceFamily::Event => crate::rules! {
                name => {
                    GET "/event/list" => "list:event", SKIP_NAMESPACE;
                    GET "/event/:id" => "read:event", SKIP_NAMESPACE;
                }
            },
            ResourceFamily::Oasf => crate::rules! {
                name => {
                    POST "/oasf/publish" => "publish:oasf";
                    GET "/oasf/search" => "search:oasf", SKIP_NAMESPACE;
                    GET "/oasf/:cid" => "read:oasf", SKIP_NAMESPACE;
                }
            },
            ResourceFamily::Record => crate::rules! {
                name => {
                    POST "/record/create" => "create:record";
                    GET "/record/list" => "list:record", SKIP_NAMESPACE;
                    GET "/record/:id" => "read:record", SKIP_NAMESPACE;
                }
            },
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for ResourceFamily {
    type Err = RuleError;

    fn from_str(s: &str) -> RuleResult<Self> {
        ResourceFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| RuleError::UnknownResourceFamily(s.to_owned()))
    }
}

impl Display for ResourceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ResourceFamily {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceFamily {
    fn deserialize<D>(deserializer: D) -> Result<ResourceFamily, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::Method;

    use super::*;

    #[test]
    fn test_family_names() -> anyhow::Result<()> {
        for family in ResourceFamily::ALL {
            assert_eq!(family.to_string().parse::<ResourceFamily>()?, family);
        }

        assert_eq!(ResourceFamily::from_str("auth-info")?, ResourceFamily::AuthInfo);
        assert!(ResourceFamily::from_str("AuthInfo").is_err());
        assert!(ResourceFamily::from_str("webhook").is_err());

        Ok(())
    }

    #[test]
    fn test_every_family_builds() -> anyhow::Result<()> {
        for family in ResourceFamily::ALL {
            let provider = family.provider()?;
            assert_eq!(provider.name(), family.as_str());
            assert!(!provider.is_empty());
            assert!(provider.rules().iter().all(|rule| !rule.is_misconfigured()));
        }

        Ok(())
    }

    #[test]
    fn test_key_family() -> anyhow::Result<()> {
        let provider = ResourceFamily::Key.provider()?;

        let read = provider
            .rules()
            .iter()
            .find(|rule| rule.pattern().is_match("/key/read/abc123"))
            .unwrap();

        assert_eq!(read.method(), Method::GET);
        assert_eq!(read.permission_str(), "read:key");
        assert!(read.skip_namespace());

        Ok(())
    }

    #[test]
    fn test_public_routes() -> anyhow::Result<()> {
        let public = ResourceFamily::ALL
            .into_iter()
            .map(|family| family.provider())
            .collect::<RuleResult<Vec<_>>>()?
            .into_iter()
            .flat_map(RuleProvider::into_rules)
            .filter(|rule| rule.allow_unauthorized())
            .map(|rule| rule.route())
            .collect::<Vec<_>>();

        assert_eq!(
            public,
            vec![
                "GET /auth/user-info",
                "GET /did/search/(.*)",
                "GET /resource/search/(.*)",
            ]
        );

        Ok(())
    }
}
