mod families;
mod macros;
mod provider;
mod rule;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use families::*;
pub use provider::*;
pub use rule::*;
