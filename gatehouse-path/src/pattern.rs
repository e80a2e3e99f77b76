use std::{
    collections::{BTreeMap, HashSet},
    convert::TryFrom,
    fmt::Display,
    str::FromStr,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{PatternError, PatternResult, PatternSegment};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The path separator.
pub const PATH_SEPARATOR: char = '/';

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A compiled route template such as `/key/create`, `/event/:id` or `/resource/search/(.*)`.
///
/// A pattern is an ordered sequence of [`PatternSegment`]s. At most one of them is a wildcard and,
/// if present, it is the last one.
///
/// Matching is syntactic. Empty segments are ignored in both the template and the request path, so
/// `/key/create/` and `/key/create` are the same route. No percent-decoding is done.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    segments: Vec<PatternSegment>,
}

/// The values bound while matching a request path against a [`PathPattern`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    named: BTreeMap<String, String>,
    tail: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl PathPattern {
    /// Compiles a route template.
    ///
    /// Fails if the template has more than one wildcard, a wildcard that is not the last segment,
    /// a malformed or repeated parameter name, or a literal with reserved characters.
    pub fn compile(template: impl AsRef<str>) -> PatternResult<Self> {
        let template = template.as_ref();
        let segments = split_path(template)
            .map(PatternSegment::try_from)
            .collect::<PatternResult<Vec<_>>>()?;

        match segments.iter().filter(|s| s.is_wildcard()).count() {
            0 => {}
            1 if segments.last().is_some_and(PatternSegment::is_wildcard) => {}
            1 => return Err(PatternError::NonTerminalWildcard(template.to_owned())),
            _ => return Err(PatternError::MultipleWildcards(template.to_owned())),
        }

        let mut seen = HashSet::new();
        for name in segments.iter().filter_map(PatternSegment::param_name) {
            if !seen.insert(name) {
                return Err(PatternError::DuplicateParamName(name.to_owned()));
            }
        }

        Ok(Self { segments })
    }

    /// Returns the segments of the pattern.
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Returns whether the pattern ends in a wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.segments.last().is_some_and(PatternSegment::is_wildcard)
    }

    /// Returns the names of the parameters in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(PatternSegment::param_name)
    }

    /// Returns whether both patterns accept exactly the same request paths.
    ///
    /// `/key/read/:kid` and `/key/read/:id` have the same shape.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a.same_shape(b))
    }

    /// Returns whether every request path `other` matches is also matched by this pattern.
    ///
    /// `/resource/search/(.*)` covers `/resource/search/:did`, and `/event/:id` covers
    /// `/event/list`. Patterns with the same shape cover each other.
    pub fn covers(&self, other: &PathPattern) -> bool {
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.is_wildcard() {
                return other.segments.len() > i;
            }

            match other.segments.get(i) {
                Some(theirs) if segment.covers(theirs) => {}
                _ => return false,
            }
        }

        self.segments.len() == other.segments.len()
    }

    /// Matches a request path against the pattern.
    ///
    /// Returns the bound parameters on a match and `None` otherwise.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts = split_path(path).collect::<Vec<_>>();
        let mut params = RouteParams::default();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PatternSegment::Literal(literal) => {
                    if *parts.get(i)? != literal.as_str() {
                        return None;
                    }
                }
                PatternSegment::Param(name) => {
                    params.named.insert(name.clone(), parts.get(i)?.to_string());
                }
                PatternSegment::Wildcard => {
                    let rest = parts.get(i..).filter(|rest| !rest.is_empty())?;
                    params.tail = Some(rest.join("/"));
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }

    /// Returns whether the request path matches the pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.matches(path).is_some()
    }
}

impl RouteParams {
    /// Gets the value bound to a named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    /// Returns the path remainder matched by a wildcard, joined with `/`.
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Returns an iterator over the named parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.tail.is_none()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR).filter(|segment| !segment.is_empty())
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        PathPattern::compile(template)
    }
}

impl TryFrom<&str> for PathPattern {
    type Error = PatternError;

    fn try_from(template: &str) -> Result<Self, Self::Error> {
        PathPattern::compile(template)
    }
}

impl TryFrom<String> for PathPattern {
    type Error = PatternError;

    fn try_from(template: String) -> Result<Self, Self::Error> {
        PathPattern::compile(template)
    }
}

impl Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.segments.iter().join("/"))
    }
}

impl Serialize for PathPattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PathPattern {
    fn deserialize<D>(deserializer: D) -> Result<PathPattern, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PathPattern::compile(s).map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
