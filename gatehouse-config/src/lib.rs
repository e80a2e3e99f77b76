//! # Gatehouse Config
//!
//! This crate provides the startup configuration of the gatehouse authorization core: which rule
//! providers are registered and in which order, the default namespace, and where the namespace of
//! a request is looked for.

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod error;
mod traits;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod authz;
pub mod default;

pub use error::*;
pub use traits::*;
