//! # BreachWatch Key Derivation
//!
//! Turns raw, user-supplied email strings into canonical, opaque lookup keys.
//!
//! This crate provides:
//!
//! - **Normalize**: Control-character stripping, trimming, lowercasing
//! - **Shape check**: Conservative syntactic email validation
//! - **Hash**: SHA-256 key derivation rendered as 64 hex chars
//!
//! ## Privacy Properties
//!
//! - Keys are one-way digests; the raw address is never stored or cached
//! - Equal addresses (after normalization) always map to the same key
//!
//! ## Example
//!
//! ```rust
//! use breachwatch_crypto::{normalize, validate_and_derive_key};
//!
//! assert_eq!(normalize("  Test@Example.COM\0"), "test@example.com");
//!
//! let key = validate_and_derive_key("  Test@Example.COM\0").unwrap();
//! assert_eq!(
//!     key.as_str(),
//!     "973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b"
//! );
//!
//! assert!(validate_and_derive_key("not-an-email").is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod hash;
pub mod normalize;

// Re-export main functions at crate root
pub use hash::{derive_key, hash_email, validate_and_derive_key};
pub use normalize::{is_well_formed, normalize};
