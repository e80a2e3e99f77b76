use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DidError, DidResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The network an operation targets.
///
/// Namespaces only have a lowercase form, used both on the wire and as the last segment of a
/// permission scope, e.g. `create:resource:testnet`. Any other spelling is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// The test network.
    Testnet,

    /// The main network.
    Mainnet,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Namespace {
    /// All known namespaces.
    pub const ALL: [Namespace; 2] = [Namespace::Testnet, Namespace::Mainnet];

    /// Returns the namespace as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Testnet => "testnet",
            Namespace::Mainnet => "mainnet",
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for Namespace {
    type Err = DidError;

    fn from_str(s: &str) -> DidResult<Self> {
        Namespace::ALL
            .into_iter()
            .find(|namespace| namespace.as_str() == s)
            .ok_or_else(|| DidError::InvalidNamespace(s.to_owned()))
    }
}

impl TryFrom<&str> for Namespace {
    type Error = DidError;

    fn try_from(s: &str) -> DidResult<Self> {
        s.parse()
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Namespace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D>(deserializer: D) -> Result<Namespace, D::Error>
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
    use super::*;

    #[test]
    fn test_namespace_parse() -> anyhow::Result<()> {
        assert_eq!(Namespace::from_str("testnet")?, Namespace::Testnet);
        assert_eq!(Namespace::from_str("mainnet")?, Namespace::Mainnet);

        // Fails

        assert_eq!(
            Namespace::from_str("lunanet"),
            Err(DidError::InvalidNamespace("lunanet".to_owned()))
        );
        assert!(Namespace::from_str("").is_err());
        assert!(Namespace::from_str("MainNet").is_err());
        assert!(Namespace::from_str("TESTNET").is_err());
        assert!(Namespace::from_str(" testnet").is_err());

        Ok(())
    }

    #[test_log::test]
    fn test_namespace_serde() -> anyhow::Result<()> {
        let serialized = serde_json::to_string(&Namespace::Testnet)?;
        tracing::debug!(?serialized);
        assert_eq!(serialized, r#""testnet""#);

        let namespace: Namespace = serde_json::from_str(r#""mainnet""#)?;
        assert_eq!(namespace, Namespace::Mainnet);
        assert_eq!(namespace.to_string(), "mainnet");

        assert!(serde_json::from_str::<Namespace>(r#""devnet""#).is_err());
        assert!(serde_json::from_str::<Namespace>(r#""MAINNET""#).is_err());

        Ok(())
    }
}
