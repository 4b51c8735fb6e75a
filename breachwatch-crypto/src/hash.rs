//! Opaque key derivation.
//!
//! Keys are SHA-256 digests of the normalized address bytes:
//!
//! ```text
//! key = hex(SHA256(normalize(raw)))
//! ```
//!
//! No domain separator is mixed in, so keys stay compatible with breach
//! datasets hashed the conventional way.

use sha2::{Digest, Sha256};

use breachwatch_core::types::EmailHash;

use crate::normalize::{is_well_formed, normalize};

/// Derives the opaque key of an already-normalized address.
///
/// Deterministic: the same input always yields the same key.
pub fn derive_key(normalized: &str) -> EmailHash {
    let digest: [u8; 32] = Sha256::digest(normalized.as_bytes()).into();
    EmailHash::from_digest(digest)
}

/// Normalizes and hashes `raw` without the shape check.
///
/// Used when loading datasets, where every input is trusted to be an address
/// and keys must match the ones derived at lookup time.
pub fn hash_email(raw: &str) -> EmailHash {
    derive_key(&normalize(raw))
}

/// Normalizes `raw`, checks its shape, and derives its key.
///
/// Returns `None` for malformed input; callers must then reject the request
/// without touching the cache or the store.
pub fn validate_and_derive_key(raw: &str) -> Option<EmailHash> {
    let normalized = normalize(raw);
    if !is_well_formed(&normalized) {
        return None;
    }
    Some(derive_key(&normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            derive_key("test@example.com").as_str(),
            "973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b"
        );
        assert_eq!(
            derive_key("user@domain.com").as_str(),
            "f7ee5ec7312165148b69fcca1d29075b14b8aef0b5048a332b18b88d09069fb7"
        );
        // Empty input still hashes
        assert_eq!(
            derive_key("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_key_is_fixed_length_lowercase_hex() {
        let key = derive_key("someone@somewhere.org");
        assert_eq!(key.as_str().len(), 64);
        assert!(key
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_validate_and_derive_key() {
        let key = validate_and_derive_key("  Test@Example.COM\0").unwrap();
        assert_eq!(key, derive_key("test@example.com"));
    }

    #[test]
    fn test_validate_and_derive_key_rejects() {
        assert!(validate_and_derive_key("not-an-email").is_none());
        assert!(validate_and_derive_key("   ").is_none());
        assert!(validate_and_derive_key("\0\0\0").is_none());
    }

    #[test]
    fn test_hash_email_matches_validated_key() {
        assert_eq!(
            hash_email("Victim@Company.CO"),
            validate_and_derive_key("victim@company.co").unwrap()
        );
    }

    #[test]
    fn test_different_inputs_different_keys() {
        assert_ne!(derive_key("a@b.co"), derive_key("a@b.com"));
    }

    proptest! {
        #[test]
        fn prop_derive_key_deterministic(local in "[a-z0-9._%+-]{1,20}", domain in "[a-z0-9-]{1,20}", tld in "[a-z]{2,6}") {
            let email = format!("{}@{}.{}", local, domain, tld);
            prop_assert_eq!(derive_key(&email), derive_key(&email));

            let validated = validate_and_derive_key(&email.to_uppercase());
            prop_assert_eq!(validated, Some(derive_key(&email)));
        }
    }
}
