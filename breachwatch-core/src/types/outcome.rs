//! Lookup outcomes.

use serde::{Deserialize, Serialize};

/// Result of checking one raw input through the cache-aside path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Input was malformed. Neither the cache nor the store was consulted.
    Rejected,
    /// Verdict served from a fresh cache entry.
    Hit {
        /// Whether the address is in the breach dataset
        compromised: bool,
    },
    /// Verdict fetched from the store and written back to the cache.
    Miss {
        /// Whether the address is in the breach dataset
        compromised: bool,
    },
}

impl CheckOutcome {
    /// Returns the verdict, or `None` for a rejected input.
    pub fn compromised(&self) -> Option<bool> {
        match self {
            CheckOutcome::Rejected => None,
            CheckOutcome::Hit { compromised } | CheckOutcome::Miss { compromised } => {
                Some(*compromised)
            }
        }
    }

    /// Returns true if the verdict came from the cache.
    pub fn from_cache(&self) -> bool {
        matches!(self, CheckOutcome::Hit { .. })
    }

    /// Returns true if the input was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, CheckOutcome::Rejected)
    }
}
