use std::{convert::TryFrom, fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{PatternError, PatternResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The segment that matches the rest of a path.
pub const WILDCARD: &str = "(.*)";

/// The prefix that marks a segment as a named parameter, e.g. `:id`.
pub const PARAM_PREFIX: char = ':';

lazy_static! {
    static ref RE_VALID_PARAM_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A `PatternSegment` is a single part of a route template. For example, the template
/// `/key/read/(.*)` consists of the segments `key`, `read` and a wildcard, and `/event/:id` consists
/// of the literal `event` and the parameter `id`.
///
/// ## Important
///
/// Unlike filesystem path segments, literal route segments are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSegment {
    /// A segment that must be equal to the request segment.
    Literal(String),

    /// A segment that matches any single non-empty request segment and binds it to a name.
    Param(String),

    /// A terminal segment that matches one or more remaining request segments.
    Wildcard,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl PatternSegment {
    /// Returns whether the segment is the wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, PatternSegment::Wildcard)
    }

    /// Returns the parameter name if the segment is a named parameter.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegment::Param(name) => Some(name),
            _ => None,
        }
    }

    /// Returns whether this segment accepts every request segment `other` accepts.
    ///
    /// A wildcard is covered only by another wildcard, since it can span several segments.
    pub fn covers(&self, other: &PatternSegment) -> bool {
        match (self, other) {
            (PatternSegment::Literal(a), PatternSegment::Literal(b)) => a == b,
            (PatternSegment::Param(_), PatternSegment::Literal(_) | PatternSegment::Param(_)) => true,
            (PatternSegment::Wildcard, _) => true,
            _ => false,
        }
    }

    /// Returns whether both segments accept exactly the same request segments.
    ///
    /// Parameter names are ignored.
    pub fn same_shape(&self, other: &PatternSegment) -> bool {
        match (self, other) {
            (PatternSegment::Literal(a), PatternSegment::Literal(b)) => a == b,
            (PatternSegment::Param(_), PatternSegment::Param(_)) => true,
            (PatternSegment::Wildcard, PatternSegment::Wildcard) => true,
            _ => false,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for PatternSegment {
    type Err = PatternError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        PatternSegment::try_from(segment)
    }
}

impl TryFrom<&str> for PatternSegment {
    type Error = PatternError;

    fn try_from(segment: &str) -> PatternResult<Self> {
        if segment == WILDCARD {
            return Ok(PatternSegment::Wildcard);
        }

        if let Some(name) = segment.strip_prefix(PARAM_PREFIX) {
            if !RE_VALID_PARAM_NAME.is_match(name) {
                return Err(PatternError::InvalidParamName(name.to_owned()));
            }

            return Ok(PatternSegment::Param(name.to_owned()));
        }

        if segment.is_empty() || segment.contains(['(', ')', '*']) {
            return Err(PatternError::InvalidLiteral(segment.to_owned()));
        }

        Ok(PatternSegment::Literal(segment.to_owned()))
    }
}

impl TryFrom<String> for PatternSegment {
    type Error = PatternError;

    fn try_from(segment: String) -> PatternResult<Self> {
        segment.as_str().try_into()
    }
}

impl Display for PatternSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternSegment::Literal(literal) => write!(f, "{}", literal),
            PatternSegment::Param(name) => write!(f, "{}{}", PARAM_PREFIX, name),
            PatternSegment::Wildcard => write!(f, "{}", WILDCARD),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_parse() -> anyhow::Result<()> {
        assert_eq!(
            PatternSegment::from_str("key")?,
            PatternSegment::Literal("key".to_owned())
        );
        assert_eq!(
            PatternSegment::from_str(":kid")?,
            PatternSegment::Param("kid".to_owned())
        );
        assert_eq!(PatternSegment::from_str("(.*)")?, PatternSegment::Wildcard);

        // Fails

        assert_eq!(
            PatternSegment::from_str(":"),
            Err(PatternError::InvalidParamName("".to_owned()))
        );
        assert!(PatternSegment::from_str(":1st").is_err());
        assert!(PatternSegment::from_str(":a-b").is_err());
        assert!(PatternSegment::from_str("*").is_err());
        assert!(PatternSegment::from_str("(.+)").is_err());
        assert!(PatternSegment::from_str("").is_err());

        Ok(())
    }

    #[test]
    fn test_segment_display() -> anyhow::Result<()> {
        for segment in ["trust-registry", ":did", "(.*)"] {
            assert_eq!(PatternSegment::from_str(segment)?.to_string(), segment);
        }

        Ok(())
    }

    #[test]
    fn test_segment_covers() -> anyhow::Result<()> {
        let list = PatternSegment::from_str("list")?;
        let id = PatternSegment::from_str(":id")?;

        assert!(list.covers(&list));
        assert!(id.covers(&list));
        assert!(id.covers(&PatternSegment::from_str(":kid")?));
        assert!(PatternSegment::Wildcard.covers(&id));

        assert!(!list.covers(&id));
        assert!(!list.covers(&PatternSegment::from_str("create")?));
        assert!(!id.covers(&PatternSegment::Wildcard));

        Ok(())
    }

    #[test]
    fn test_segment_same_shape() -> anyhow::Result<()> {
        let kid = PatternSegment::from_str(":kid")?;
        let id = PatternSegment::from_str(":id")?;
        assert!(kid.same_shape(&id));
        assert_ne!(kid, id);

        let read = PatternSegment::from_str("read")?;
        assert!(read.same_shape(&PatternSegment::from_str("read")?));
        assert!(!read.same_shape(&PatternSegment::from_str("Read")?));
        assert!(!read.same_shape(&kid));
        assert!(!PatternSegment::Wildcard.same_shape(&kid));

        Ok(())
    }
}
