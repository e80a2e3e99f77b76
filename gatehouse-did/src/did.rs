use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DidError, DidResult, Namespace, RE_DID, RE_DID_URL_SUFFIX};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The scheme prefix every DID starts with.
pub const DID_PREFIX: &str = "did:";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [Decentralized Identifier][did-core] split into its method and method-specific id.
///
/// Some methods put the network in the first part of the method-specific id, for example
/// `did:cheqd:mainnet:zF7rhDBfUt9d1gJPjx7s1J`. [`Did::network`] returns that part and
/// [`Did::namespace`] interprets it.
///
/// [did-core]: https://www.w3.org/TR/did-core/#did-syntax
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did {
    method: String,
    id: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Did {
    /// Gets the DID method, e.g. `cheqd`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Gets the method-specific id, e.g. `testnet:7bf81a20`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the network segment of the method-specific id.
    ///
    /// Returns `None` when the id has a single part, as in `did:key:z6Mk...`.
    pub fn network(&self) -> Option<&str> {
        self.id
            .split_once(':')
            .map(|(network, _)| network)
            .filter(|network| !network.is_empty())
    }

    /// Gets the namespace named by the network segment, if it names a known one.
    pub fn namespace(&self) -> Option<Namespace> {
        self.network().and_then(|network| network.parse().ok())
    }

    /// Parses the DID at the start of a DID URL, ignoring any path, query or fragment.
    ///
    /// `did:cheqd:testnet:abc/resources/123#key-1` yields `did:cheqd:testnet:abc`.
    pub fn from_url(url: &str) -> DidResult<Self> {
        let end = RE_DID_URL_SUFFIX
            .find(url)
            .map_or(url.len(), |suffix| suffix.start());

        url[..end]
            .parse()
            .map_err(|_| DidError::InvalidDid(url.to_owned()))
    }

    /// Returns whether the string looks like a DID or DID URL without fully parsing it.
    pub fn is_did_like(s: &str) -> bool {
        s.starts_with(DID_PREFIX)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for Did {
    type Err = DidError;

    fn from_str(s: &str) -> DidResult<Self> {
        let captures = RE_DID
            .captures(s)
            .ok_or_else(|| DidError::InvalidDid(s.to_owned()))?;

        Ok(Did {
            method: captures["method"].to_owned(),
            id: captures["id"].to_owned(),
        })
    }
}

impl TryFrom<&str> for Did {
    type Error = DidError;

    fn try_from(s: &str) -> DidResult<Self> {
        s.parse()
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}:{}", DID_PREFIX, self.method, self.id)
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Did, D::Error>
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
    fn test_did_parse() -> anyhow::Result<()> {
        let did = Did::from_str("did:cheqd:testnet:7bf81a20-633c-4cc7-bc4a-5a45801005e0")?;
        assert_eq!(did.method(), "cheqd");
        assert_eq!(did.id(), "testnet:7bf81a20-633c-4cc7-bc4a-5a45801005e0");
        assert_eq!(did.network(), Some("testnet"));
        assert_eq!(did.namespace(), Some(Namespace::Testnet));

        let did = Did::from_str("did:cheqd:mainnet:zF7rhDBfUt9d1gJPjx7s1J")?;
        assert_eq!(did.namespace(), Some(Namespace::Mainnet));

        // Fails

        assert!(Did::from_str("did:cheqd").is_err());
        assert!(Did::from_str("cheqd:testnet:abc").is_err());
        assert!(Did::from_str("did:cheqd:testnet:abc#key-1").is_err());

        Ok(())
    }

    #[test]
    fn test_did_without_known_network() -> anyhow::Result<()> {
        let did = Did::from_str("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK")?;
        assert_eq!(did.network(), None);
        assert_eq!(did.namespace(), None);

        let did = Did::from_str("did:cheqd:devnet:abc")?;
        assert_eq!(did.network(), Some("devnet"));
        assert_eq!(did.namespace(), None);

        let did = Did::from_str("did:web::abc")?;
        assert_eq!(did.network(), None);

        Ok(())
    }

    #[test]
    fn test_did_from_url() -> anyhow::Result<()> {
        let did = Did::from_url("did:cheqd:testnet:abc/resources/123#key-1")?;
        assert_eq!(did.to_string(), "did:cheqd:testnet:abc");
        assert_eq!(did.namespace(), Some(Namespace::Testnet));

        let did = Did::from_url("did:cheqd:mainnet:abc?resourceName=logo")?;
        assert_eq!(did.namespace(), Some(Namespace::Mainnet));

        assert!(Did::from_url("/did:cheqd:testnet:abc").is_err());
        assert!(Did::is_did_like("did:cheqd:testnet:abc/resources"));
        assert!(!Did::is_did_like("abc123"));

        Ok(())
    }

    #[test_log::test]
    fn test_did_serde() -> anyhow::Result<()> {
        let did = Did::from_str("did:cheqd:testnet:abc")?;
        let serialized = serde_json::to_string(&did)?;
        tracing::debug!(?serialized);
        assert_eq!(serialized, r#""did:cheqd:testnet:abc""#);
        assert_eq!(serde_json::from_str::<Did>(&serialized)?, did);

        Ok(())
    }
}
