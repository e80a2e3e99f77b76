use gatehouse_did::{Did, Namespace};
use gatehouse_path::RouteParams;
use serde_json::Value;

use crate::{RequestDescriptor, RuleError, RuleResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The hint fields that name a namespace explicitly.
pub const DEFAULT_EXPLICIT_FIELDS: [&str; 2] = ["namespace", "network"];

/// The hint fields and route parameters that may carry a DID.
pub const DEFAULT_DID_FIELDS: [&str; 3] = ["did", "issuerDid", "subjectDid"];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Works out which namespace a request targets.
///
/// The resolver looks, in order, at:
/// 1. an explicit namespace field in the hints, which must name a known namespace;
/// 2. a DID in one of the DID fields of the hints, then in the route parameters or the wildcard
///    tail, whose network segment names a known namespace;
/// 3. the configured default.
///
/// The resolver is configured once and holds no per-request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceResolver {
    default_namespace: Namespace,
    explicit_fields: Vec<String>,
    did_fields: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl NamespaceResolver {
    /// Creates a resolver with the default field names.
    pub fn new(default_namespace: Namespace) -> Self {
        Self {
            default_namespace,
            explicit_fields: DEFAULT_EXPLICIT_FIELDS.map(String::from).to_vec(),
            did_fields: DEFAULT_DID_FIELDS.map(String::from).to_vec(),
        }
    }

    /// Replaces the fields that name a namespace explicitly.
    pub fn with_explicit_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.explicit_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the fields that may carry a DID.
    pub fn with_did_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.did_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Gets the default namespace.
    pub fn default_namespace(&self) -> Namespace {
        self.default_namespace
    }

    /// Resolves the namespace of a request.
    ///
    /// `params` are the values bound by the route that matched the request. Fails with
    /// [`RuleError::InvalidNamespace`] if an explicit namespace field is present but does not name
    /// a known namespace. A `null` field counts as absent.
    pub fn resolve(
        &self,
        request: &RequestDescriptor<'_>,
        params: &RouteParams,
    ) -> RuleResult<Namespace> {
        if let Some(namespace) = self.explicit(request)? {
            tracing::trace!(%namespace, "namespace from explicit field");
            return Ok(namespace);
        }

        if let Some(namespace) = self.from_did(request, params) {
            tracing::trace!(%namespace, "namespace from did");
            return Ok(namespace);
        }

        tracing::trace!(namespace = %self.default_namespace, "default namespace");
        Ok(self.default_namespace)
    }

    fn explicit(&self, request: &RequestDescriptor<'_>) -> RuleResult<Option<Namespace>> {
        let Some(value) = self
            .explicit_fields
            .iter()
            .filter_map(|field| request.hint(field))
            .find(|value| !value.is_null())
        else {
            return Ok(None);
        };

        match value {
            Value::String(s) => s
                .parse()
                .map(Some)
                .map_err(|_| RuleError::InvalidNamespace(s.clone())),
            other => Err(RuleError::InvalidNamespace(other.to_string())),
        }
    }

    fn from_did(&self, request: &RequestDescriptor<'_>, params: &RouteParams) -> Option<Namespace> {
        let hinted = self
            .did_fields
            .iter()
            .filter_map(|field| request.hint(field).and_then(Value::as_str));

        let bound = self
            .did_fields
            .iter()
            .filter_map(|field| params.get(field));

        let anywhere = params
            .iter()
            .map(|(_, value)| value)
            .chain(params.tail().into_iter().flat_map(|tail| tail.split('/')))
            .filter(|value| Did::is_did_like(value));

        hinted.chain(bound).chain(anywhere).find_map(infer_namespace)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn infer_namespace(did: &str) -> Option<Namespace> {
    Did::from_url(did).ok()?.namespace()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
