//! `gatehouse-path` compiles route templates and matches request paths against them.
//!
//! A template is made of literal segments, `:name` parameter segments and an optional terminal
//! `(.*)` wildcard segment:
//!
//! ```
//! use gatehouse_path::PathPattern;
//!
//! let pattern = PathPattern::compile("/did/deactivate/:did").unwrap();
//! let params = pattern.matches("/did/deactivate/did:cheqd:testnet:abc").unwrap();
//! assert_eq!(params.get("did"), Some("did:cheqd:testnet:abc"));
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod error;
mod pattern;
mod segment;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use error::*;
pub use pattern::*;
pub use segment::*;
