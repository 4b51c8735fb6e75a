//! Service constants for BreachWatch.
//!
//! Cache timings, input bounds, and key sizes shared across crates.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE TIMINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a cached verdict stays fresh, in seconds (15 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 15 * 60;

/// Interval between background sweeps of expired entries, in seconds (5 minutes).
///
/// Much coarser than reads; the sweep only reclaims memory, it never decides
/// whether a read hits.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;

// ═══════════════════════════════════════════════════════════════════════════════
// INPUT BOUNDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Shortest accepted normalized email, in bytes.
pub const MIN_EMAIL_LEN: usize = 3;

/// Longest accepted normalized email, in bytes (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

// ═══════════════════════════════════════════════════════════════════════════════
// KEY SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of the SHA-256 digest behind an [`EmailHash`](crate::EmailHash).
pub const EMAIL_HASH_SIZE: usize = 32;

/// Length of the hex rendering of an [`EmailHash`](crate::EmailHash).
pub const EMAIL_HASH_HEX_LEN: usize = EMAIL_HASH_SIZE * 2;

// ═══════════════════════════════════════════════════════════════════════════════
// SAMPLE DATASET
// ═══════════════════════════════════════════════════════════════════════════════

/// Addresses seeded into a fresh store so the service answers something
/// meaningful out of the box.
pub const SAMPLE_BREACHED_EMAILS: &[&str] = &[
    "test@example.com",
    "user@domain.com",
    "compromised@email.com",
    "breach@test.org",
    "victim@company.co",
];

/// Age of the seeded breach records, in days.
pub const SAMPLE_BREACH_AGE_DAYS: i64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_interval_below_ttl() {
        assert!(DEFAULT_SWEEP_INTERVAL_SECS > 0);
        assert!(DEFAULT_SWEEP_INTERVAL_SECS < DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn test_hash_hex_len() {
        assert_eq!(EMAIL_HASH_HEX_LEN, 64);
    }
}
