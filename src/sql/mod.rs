//! Safe SQL builder: identifiers are quoted, values always travel as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
