use std::time::Duration;

use chrono::{DateTime, Utc};
use steamer_db::ProfileRow;

/// Default maximum age of a stored profile before it is re-fetched
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Age-based freshness policy for stored profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub ttl: Duration,
}

impl FreshnessPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// A profile is fresh iff it was checked less than `ttl` ago and is not
    /// empty. Never-checked profiles are always stale.
    pub fn is_fresh(&self, row: &ProfileRow, now: DateTime<Utc>) -> bool {
        let Some(last_checked) = row.last_checked else {
            return false;
        };
        if is_empty(row) {
            return false;
        }
        match (now - last_checked).to_std() {
            Ok(age) => age < self.ttl,
            // checked "in the future" (clock skew)
            Err(_) => true,
        }
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// Whether the presence/visibility/avatar group is entirely unset
pub fn is_empty(row: &ProfileRow) -> bool {
    [
        &row.online_state,
        &row.privacy_state,
        &row.visibility_state,
        &row.avatar_icon,
        &row.avatar_medium,
        &row.avatar_full,
    ]
    .iter()
    .all(|field| field.as_deref().map_or(true, str::is_empty))
}
