use std::{borrow::Cow, collections::HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Method;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// What the engine needs to know about an incoming request.
///
/// `hints` holds the body and query fields the host chose to expose, merged into one object. The
/// engine only reads the fields its [`NamespaceResolver`][crate::NamespaceResolver] is configured
/// with. The path and the hints can be borrowed from the host's request, so describing a request
/// does not copy its body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor<'a> {
    method: Method,
    path: Cow<'a, str>,
    hints: Cow<'a, Map<String, Value>>,
}

/// An already authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The subject the permissions were granted to.
    pub subject_id: String,

    /// The granted permission scopes, e.g. `create:resource:testnet`.
    #[serde(default)]
    pub granted_permissions: HashSet<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> RequestDescriptor<'a> {
    /// Creates a request descriptor without hints.
    pub fn new(method: Method, path: impl Into<Cow<'a, str>>) -> Self {
        Self {
            method,
            path: path.into(),
            hints: Cow::Owned(Map::new()),
        }
    }

    /// Sets the hints. Anything but a JSON object clears them.
    pub fn with_hints(mut self, hints: Value) -> Self {
        self.hints = match hints {
            Value::Object(map) => Cow::Owned(map),
            _ => Cow::Owned(Map::new()),
        };
        self
    }

    /// Sets the hints without copying them. Anything but a JSON object clears them.
    pub fn with_borrowed_hints(mut self, hints: &'a Value) -> Self {
        self.hints = match hints {
            Value::Object(map) => Cow::Borrowed(map),
            _ => Cow::Owned(Map::new()),
        };
        self
    }

    /// Adds a single hint. Borrowed hints are copied first.
    pub fn with_hint(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.hints.to_mut().insert(key.into(), value.into());
        self
    }

    /// Gets the method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Gets the path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Gets a hint.
    pub fn hint(&self, key: &str) -> Option<&Value> {
        self.hints.get(key)
    }

    /// Gets all hints.
    pub fn hints(&self) -> &Map<String, Value> {
        &self.hints
    }
}

impl Identity {
    /// Creates an identity.
    pub fn new<I>(subject_id: impl Into<String>, granted_permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            subject_id: subject_id.into(),
            granted_permissions: granted_permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether the permission scope was granted.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.granted_permissions.contains(permission)
    }

    /// Returns whether no permission was granted.
    pub fn is_empty(&self) -> bool {
        self.granted_permissions.is_empty()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
