//! Breach dataset records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EmailHash;

/// One entry of the authoritative breach dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    /// Key of the breached address
    pub email_hash: EmailHash,
    /// When the breach happened
    pub breached_at: DateTime<Utc>,
}

impl BreachRecord {
    /// Creates a record.
    pub fn new(email_hash: EmailHash, breached_at: DateTime<Utc>) -> Self {
        Self {
            email_hash,
            breached_at,
        }
    }

    /// Creates a record for a breach that happened `days` ago.
    pub fn days_ago(email_hash: EmailHash, days: i64) -> Self {
        Self::new(email_hash, Utc::now() - chrono::Duration::days(days))
    }
}
