//! Scripted [`ProfileFetcher`] for exercising the engine without Steam

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use steamer_community::{RawGroup, RawGroups, RawInfo, RawMostPlayedGame, RawMostPlayedGames};
use tokio::sync::Barrier;

use crate::error::FetcherError;
use crate::fetcher::ProfileFetcher;

/// Serves profiles and custom URL mappings registered up front and counts
/// how often it is asked.
#[derive(Default)]
pub struct ScriptedFetcher {
    profiles: Mutex<HashMap<String, RawInfo>>,
    custom_urls: Mutex<HashMap<String, String>>,
    unavailable: Mutex<bool>,
    full_info_barrier: Option<Barrier>,
    full_info_calls: AtomicUsize,
    custom_url_lookups: AtomicUsize,
    custom_url_for_id_calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile document; its first `customURL` (if any) is also
    /// registered as a custom URL mapping.
    pub fn with_profile(self, raw: RawInfo) -> Self {
        let steam_id64 = raw.steam_id64.first().cloned().unwrap_or_default();
        if let Some(custom_url) = raw.custom_url.first() {
            self.custom_urls
                .lock()
                .unwrap()
                .insert(custom_url.clone(), steam_id64.clone());
        }
        self.profiles.lock().unwrap().insert(steam_id64, raw);
        self
    }

    /// Hold every full info request until `callers` requests are waiting
    pub fn with_full_info_barrier(mut self, callers: usize) -> Self {
        self.full_info_barrier = Some(Barrier::new(callers));
        self
    }

    /// Replace a registered profile document
    pub fn set_profile(&self, raw: RawInfo) {
        let steam_id64 = raw.steam_id64.first().cloned().unwrap_or_default();
        self.profiles.lock().unwrap().insert(steam_id64, raw);
    }

    /// Make every call fail as if Steam were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn full_info_calls(&self) -> usize {
        self.full_info_calls.load(Ordering::SeqCst)
    }

    pub fn custom_url_lookups(&self) -> usize {
        self.custom_url_lookups.load(Ordering::SeqCst)
    }

    pub fn custom_url_for_id_calls(&self) -> usize {
        self.custom_url_for_id_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), FetcherError> {
        if *self.unavailable.lock().unwrap() {
            return Err(FetcherError::Unavailable("scripted outage".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileFetcher for ScriptedFetcher {
    async fn custom_url_to_steam_id64(
        &self,
        custom_url: &str,
    ) -> Result<Option<String>, FetcherError> {
        self.custom_url_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.custom_urls.lock().unwrap().get(custom_url).cloned())
    }

    async fn steam_id64_to_custom_url(
        &self,
        steam_id64: &str,
    ) -> Result<Option<String>, FetcherError> {
        self.custom_url_for_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .get(steam_id64)
            .and_then(|raw| raw.custom_url.first().cloned()))
    }

    async fn steam_id64_to_full_info(
        &self,
        steam_id64: &str,
    ) -> Result<Option<RawInfo>, FetcherError> {
        self.full_info_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.full_info_barrier {
            barrier.wait().await;
        }
        self.check_available()?;
        Ok(self.profiles.lock().unwrap().get(steam_id64).cloned())
    }
}

/// A public profile document with presence data, one game and one group
pub fn raw_profile(steam_id64: &str, custom_url: Option<&str>) -> RawInfo {
    let one = |v: &str| vec![v.to_string()];
    RawInfo {
        steam_id64: one(steam_id64),
        steam_id: one("Rabscuttle"),
        online_state: one("online"),
        state_message: one("Online"),
        privacy_state: one("public"),
        visibility_state: one("3"),
        avatar_icon: one("https://avatars.example/icon.jpg"),
        avatar_medium: one("https://avatars.example/medium.jpg"),
        avatar_full: one("https://avatars.example/full.jpg"),
        vac_banned: one("0"),
        trade_ban_state: one("None"),
        is_limited_account: one("0"),
        custom_url: custom_url.map(one).unwrap_or_default(),
        member_since: one("September 12, 2003"),
        realname: one("Gabe Newell"),
        summary: one("Welcome to Steam."),
        most_played_games: vec![RawMostPlayedGames {
            most_played_game: vec![RawMostPlayedGame {
                game_name: one("Half-Life 2"),
                hours_on_record: one("420"),
                ..Default::default()
            }],
        }],
        groups: vec![RawGroups {
            group: vec![RawGroup {
                is_primary: Some("1".to_string()),
                group_id64: one("103582791429521408"),
                group_name: one("Valve"),
                ..Default::default()
            }],
        }],
        ..Default::default()
    }
}
