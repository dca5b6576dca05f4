//! Safe SQL builder: identifiers are constants, values go in as parameters.

mod builder;
pub use builder::*;
