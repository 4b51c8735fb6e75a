//! Opaque email key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{EMAIL_HASH_HEX_LEN, EMAIL_HASH_SIZE};
use crate::error::{BreachError, Result};

/// SHA-256 digest of a normalized email, rendered as 64 lowercase hex chars.
///
/// Used in place of the raw address everywhere past input validation: as the
/// cache key, the store key, and in log fields. Only the derivation in
/// `breachwatch-crypto` produces these from user input.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailHash(String);

impl EmailHash {
    /// Wraps a raw digest.
    pub fn from_digest(digest: [u8; EMAIL_HASH_SIZE]) -> Self {
        Self(hex::encode(digest))
    }

    /// Parses a hex-encoded digest. Uppercase input is accepted and lowercased.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != EMAIL_HASH_HEX_LEN {
            return Err(BreachError::InvalidHash(format!(
                "expected {} hex chars, got {}",
                EMAIL_HASH_HEX_LEN,
                s.len()
            )));
        }
        let bytes = hex::decode(s)?;
        Ok(Self(hex::encode(bytes)))
    }

    /// Returns the hex rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a short prefix, suitable for log fields.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for EmailHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EmailHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmailHash({}...)", self.short())
    }
}

impl TryFrom<String> for EmailHash {
    type Error = BreachError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<EmailHash> for String {
    fn from(value: EmailHash) -> Self {
        value.0
    }
}

impl AsRef<str> for EmailHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
