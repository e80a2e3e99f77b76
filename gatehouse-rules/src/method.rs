use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{RuleError, RuleResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An HTTP request method.
///
/// Parsing is case-insensitive; the canonical form is uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    /// `GET`
    Get,

    /// `POST`
    Post,

    /// `PUT`
    Put,

    /// `PATCH`
    Patch,

    /// `DELETE`
    Delete,

    /// `HEAD`
    Head,

    /// `OPTIONS`
    Options,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Method {
    /// `GET`
    pub const GET: Method = Method::Get;

    /// `POST`
    pub const POST: Method = Method::Post;

    /// `PUT`
    pub const PUT: Method = Method::Put;

    /// `PATCH`
    pub const PATCH: Method = Method::Patch;

    /// `DELETE`
    pub const DELETE: Method = Method::Delete;

    /// `HEAD`
    pub const HEAD: Method = Method::Head;

    /// `OPTIONS`
    pub const OPTIONS: Method = Method::Options;

    /// All supported methods.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
    ];

    /// Returns the canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for Method {
    type Err = RuleError;

    fn from_str(s: &str) -> RuleResult<Self> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RuleError::UnsupportedMethod(s.to_owned()))
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D>(deserializer: D) -> Result<Method, D::Error>
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
