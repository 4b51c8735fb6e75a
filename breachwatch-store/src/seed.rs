//! Sample dataset seeding.

use tracing::info;

use breachwatch_core::constants::{SAMPLE_BREACHED_EMAILS, SAMPLE_BREACH_AGE_DAYS};
use breachwatch_core::error::Result;
use breachwatch_core::traits::BreachStore;
use breachwatch_core::types::BreachRecord;
use breachwatch_crypto::hash_email;

/// Inserts the sample breached addresses into `store`.
///
/// Keys go through the same normalization as lookups. Safe to run on every
/// start: records already present are skipped. Returns how many were new.
pub async fn seed_sample_data<S: BreachStore + ?Sized>(store: &S) -> Result<usize> {
    let mut inserted = 0;
    for email in SAMPLE_BREACHED_EMAILS {
        let record = BreachRecord::days_ago(hash_email(email), SAMPLE_BREACH_AGE_DAYS);
        if store.insert(record).await? {
            inserted += 1;
        }
    }

    info!(
        inserted,
        total = SAMPLE_BREACHED_EMAILS.len(),
        "Seeded sample breach records"
    );
    Ok(inserted)
}
