use std::sync::Arc;

use chrono::Utc;
use steamer_db::{NewProfile, ProfileRow, SteamProfile};
use steamer_id_parser::ParsedInput;
use tracing::{debug, info, instrument, warn};

use crate::error::{ResolveError, StoreError, FETCH_FAILED, INVALID_ID, PROFILE_NOT_FOUND};
use crate::fetcher::{FetchedProfile, ProfileFetcher};
use crate::freshness::FreshnessPolicy;
use crate::store::ProfileStore;

/// Outcome of [`ProfileResolver::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub profile: SteamProfile,
    /// Served from the store without contacting Steam
    pub cached: bool,
    /// Identifier exactly as received
    pub received_id: String,
}

/// Resolves identifiers to stored profiles, refreshing from Steam when the
/// stored copy is missing, stale or empty.
///
/// Holds no per-request state. Concurrent runs for the same identifier are
/// not serialized: two first-time resolutions of one SteamID64 can both
/// reach the insert, and the loser fails with [`ResolveError::Conflict`].
#[derive(Clone)]
pub struct ProfileResolver {
    store: Arc<dyn ProfileStore>,
    fetcher: Arc<dyn ProfileFetcher>,
    policy: FreshnessPolicy,
}

impl ProfileResolver {
    pub fn new(store: Arc<dyn ProfileStore>, fetcher: Arc<dyn ProfileFetcher>) -> Self {
        Self {
            store,
            fetcher,
            policy: FreshnessPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FreshnessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    pub fn policy(&self) -> FreshnessPolicy {
        self.policy
    }

    /// Resolve an identifier, serving the stored profile while it is fresh
    #[instrument(skip(self))]
    pub async fn resolve(&self, raw: &str) -> Result<Resolution, ResolveError> {
        let parsed = ParsedInput::parse(raw);
        let existing = self.lookup(&parsed).await?;

        if let Some(row) = &existing {
            if self.policy.is_fresh(row, Utc::now()) {
                debug!(steam_id64 = %row.steam_id64, "Serving stored profile");
                return Ok(Resolution {
                    profile: materialize(row.clone())?,
                    cached: true,
                    received_id: raw.to_string(),
                });
            }
        }

        // A stored record already knows its SteamID64; no need to go
        // through the custom URL again.
        let steam_id64 = match &existing {
            Some(row) => row.steam_id64.clone(),
            None => self.steam_id64_for(&parsed).await?,
        };

        let profile = self.fetch_and_reconcile(&steam_id64, existing.as_ref()).await?;

        Ok(Resolution {
            profile,
            cached: false,
            received_id: raw.to_string(),
        })
    }

    /// Re-fetch a stored profile regardless of its age. Never creates one.
    #[instrument(skip(self))]
    pub async fn refresh(&self, raw: &str) -> Result<SteamProfile, ResolveError> {
        let parsed = ParsedInput::parse(raw);
        let Some(existing) = self.lookup(&parsed).await? else {
            debug!(input = %parsed, "Refresh requested for unknown profile");
            return Err(ResolveError::NotFound(PROFILE_NOT_FOUND.to_string()));
        };

        self.fetch_and_reconcile(&existing.steam_id64, Some(&existing))
            .await
    }

    async fn lookup(&self, parsed: &ParsedInput) -> Result<Option<ProfileRow>, StoreError> {
        match parsed {
            ParsedInput::SteamId64(id) => self.store.find_by_steam_id64(id).await,
            ParsedInput::CustomUrl(custom_url) => self.store.find_by_custom_url(custom_url).await,
        }
    }

    async fn steam_id64_for(&self, parsed: &ParsedInput) -> Result<String, ResolveError> {
        let custom_url = match parsed {
            ParsedInput::SteamId64(id) => return Ok(id.clone()),
            ParsedInput::CustomUrl(custom_url) => custom_url,
        };

        match self.fetcher.custom_url_to_steam_id64(custom_url).await {
            Ok(Some(id)) => Ok(id),
            Ok(None) => {
                debug!(custom_url = %custom_url, "Custom URL does not resolve");
                Err(ResolveError::NotFound(INVALID_ID.to_string()))
            }
            Err(e) => {
                warn!(custom_url = %custom_url, error = %e, "Custom URL lookup failed");
                Err(ResolveError::Fetch(FETCH_FAILED.to_string()))
            }
        }
    }

    /// One profile document request. The document carries the current
    /// custom URL, so no separate alias call is made.
    async fn fetch(&self, steam_id64: &str) -> Result<FetchedProfile, ResolveError> {
        match self.fetcher.steam_id64_to_full_info(steam_id64).await {
            Ok(Some(info)) => Ok(FetchedProfile::from_raw(steam_id64, info)),
            Ok(None) => {
                warn!(steam_id64 = %steam_id64, "Steam returned no profile data");
                Err(ResolveError::Fetch(FETCH_FAILED.to_string()))
            }
            Err(e) => {
                warn!(steam_id64 = %steam_id64, error = %e, "Profile fetch failed");
                Err(ResolveError::Fetch(FETCH_FAILED.to_string()))
            }
        }
    }

    async fn fetch_and_reconcile(
        &self,
        steam_id64: &str,
        existing: Option<&ProfileRow>,
    ) -> Result<SteamProfile, ResolveError> {
        let fetched = self.fetch(steam_id64).await?;
        let changes = fetched.to_changes(Utc::now()).map_err(StoreError::from)?;

        let id = match existing {
            Some(row) => {
                let updated = self.store.update_by_id(row.id, changes).await?;
                info!(steam_id64 = %updated.steam_id64, id = updated.id, "Updated profile");
                updated.id
            }
            None => {
                let inserted = self
                    .store
                    .insert(NewProfile {
                        steam_id64: fetched.steam_id64.clone(),
                        changes,
                    })
                    .await?;
                info!(steam_id64 = %inserted.steam_id64, id = inserted.id, "Inserted profile");
                inserted.id
            }
        };

        // Re-read so bookkeeping columns reflect what was committed
        let stored = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResolveError::Store(format!("profile {id} missing after write")))?;

        materialize(stored)
    }
}

fn materialize(row: ProfileRow) -> Result<SteamProfile, ResolveError> {
    Ok(row.into_profile().map_err(StoreError::from)?)
}
