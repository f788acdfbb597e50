//! Safe SQL builder: identifiers from validated resource definitions only, values as parameters.

mod builder;
pub use builder::*;
