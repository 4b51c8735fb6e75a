//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use breachwatch_cache::CacheStats;
use breachwatch_lookup::LookupStats;

/// Request to check an email address.
#[derive(Debug, Deserialize)]
pub struct CheckEmailRequest {
    /// Raw address as typed by the user
    #[serde(default)]
    pub email: String,
}

/// Response for an email check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckEmailResponse {
    /// The address as submitted
    pub email: String,
    /// Whether the address appears in the breach dataset
    pub compromised: bool,
    /// Whether the verdict came from the cache
    pub cached: bool,
    /// Human-readable verdict
    pub message: String,
}

impl CheckEmailResponse {
    /// Builds the response, including the user-facing message.
    pub fn new(email: String, compromised: bool, cached: bool) -> Self {
        let mut message = if compromised {
            "This email address has been found in known data breaches".to_string()
        } else {
            "This email address was not found in known data breaches".to_string()
        };
        if cached {
            message.push_str(" (cached)");
        }
        Self {
            email,
            compromised,
            cached,
            message,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Summary line
    pub message: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Records in the breach dataset
    pub compromised_emails: u64,
}

/// Lookup counters with the derived hit ratio.
#[derive(Debug, Serialize)]
pub struct LookupStatsDto {
    /// Calls to the check endpoint, including rejected ones
    pub lookups: u64,
    /// Inputs rejected as malformed
    pub rejected: u64,
    /// Verdicts served from the cache
    pub cache_hits: u64,
    /// Verdicts fetched from the store
    pub cache_misses: u64,
    /// Failed store calls
    pub store_errors: u64,
    /// Cache hits over cache consultations
    pub hit_ratio: f64,
}

impl From<LookupStats> for LookupStatsDto {
    fn from(stats: LookupStats) -> Self {
        Self {
            lookups: stats.lookups,
            rejected: stats.rejected,
            cache_hits: stats.cache_hits,
            cache_misses: stats.cache_misses,
            store_errors: stats.store_errors,
            hit_ratio: stats.hit_ratio(),
        }
    }
}

/// Breach dataset summary.
#[derive(Debug, Serialize)]
pub struct DatabaseStatsDto {
    /// Records in the breach dataset
    pub compromised_emails: u64,
    /// Database file location
    pub database_path: String,
}

/// Admin status response.
#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    /// Service name
    pub service: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Breach dataset summary
    pub database: DatabaseStatsDto,
    /// Verdict cache occupancy
    pub cache: CacheStats,
    /// Lookup counters
    pub lookups: LookupStatsDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_email_messages() {
        let fresh = CheckEmailResponse::new("a@b.co".into(), true, false);
        assert_eq!(fresh.message, "This email address has been found in known data breaches");

        let cached = CheckEmailResponse::new("a@b.co".into(), false, true);
        assert_eq!(
            cached.message,
            "This email address was not found in known data breaches (cached)"
        );
    }

    #[test]
    fn test_missing_email_field_defaults_empty() {
        let req: CheckEmailRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
    }
}
