//! Domain types for BreachWatch.
//!
//! - [`EmailHash`]: Opaque, non-reversible key derived from a normalized email
//! - [`BreachRecord`]: One entry of the authoritative breach dataset
//! - [`CheckOutcome`]: Result of a cache-aside lookup

mod hash;
mod outcome;
mod record;

pub use hash::*;
pub use outcome::*;
pub use record::*;
