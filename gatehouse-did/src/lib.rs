//! `gatehouse-did` parses Decentralized Identifiers (DIDs) just far enough to tell which network
//! namespace they belong to.
//!
//! Only the generic `did:<method>:<method-specific-id>` syntax is understood. Methods that carry a
//! network segment, such as `did:cheqd:testnet:<id>`, yield a [`Namespace`].

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod did;
mod error;
mod namespace;
mod regex;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use did::*;
pub use error::*;
pub use namespace::*;
pub use self::regex::*;
