//! # BreachWatch Core
//!
//! Core types, errors, and traits for the BreachWatch lookup service.
//!
//! This crate provides the foundational building blocks used by all other BreachWatch crates:
//!
//! - **Types**: Opaque email keys, breach records, lookup outcomes
//! - **Errors**: The error taxonomy shared by every layer
//! - **Constants**: Cache timings and input bounds
//! - **Traits**: The authoritative store interface
//!
//! ## Example
//!
//! ```rust
//! use breachwatch_core::{CheckOutcome, EmailHash};
//!
//! let key = EmailHash::from_hex(
//!     "973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b",
//! ).unwrap();
//! assert_eq!(key.as_str().len(), 64);
//!
//! let outcome = CheckOutcome::Hit { compromised: true };
//! assert!(outcome.from_cache());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{BreachError, Result};
pub use traits::*;
pub use types::*;
