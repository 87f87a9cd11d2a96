use async_trait::async_trait;
use chrono::{DateTime, Utc};
use steamer_community::{RawGroup, RawInfo, RawMostPlayedGame, SteamCommunityClient};
use steamer_db::{MostPlayedGame, ProfileAttributes, ProfileChanges, SteamGroup};

use crate::error::FetcherError;

/// External source of Steam profile data
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Resolve a custom URL to a SteamID64; `None` if it maps to nothing
    async fn custom_url_to_steam_id64(&self, custom_url: &str)
        -> Result<Option<String>, FetcherError>;

    /// Current custom URL of a SteamID64, if set
    async fn steam_id64_to_custom_url(&self, steam_id64: &str)
        -> Result<Option<String>, FetcherError>;

    /// Full profile document; `None` for private or nonexistent profiles
    async fn steam_id64_to_full_info(&self, steam_id64: &str)
        -> Result<Option<RawInfo>, FetcherError>;
}

#[async_trait]
impl ProfileFetcher for SteamCommunityClient {
    async fn custom_url_to_steam_id64(
        &self,
        custom_url: &str,
    ) -> Result<Option<String>, FetcherError> {
        Ok(SteamCommunityClient::custom_url_to_steam_id64(self, custom_url).await?)
    }

    async fn steam_id64_to_custom_url(
        &self,
        steam_id64: &str,
    ) -> Result<Option<String>, FetcherError> {
        Ok(SteamCommunityClient::steam_id64_to_custom_url(self, steam_id64).await?)
    }

    async fn steam_id64_to_full_info(
        &self,
        steam_id64: &str,
    ) -> Result<Option<RawInfo>, FetcherError> {
        Ok(SteamCommunityClient::steam_id64_to_full_info(self, steam_id64).await?)
    }
}

/// A fetched profile flattened out of the provider's raw shape
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedProfile {
    pub steam_id64: String,
    pub attributes: ProfileAttributes,
}

impl FetchedProfile {
    /// Take the first value of every scalar and flatten the
    /// `mostPlayedGames/mostPlayedGame` and `groups/group` wrappers.
    /// An empty `customURL` means the profile has none.
    pub fn from_raw(requested_id: &str, raw: RawInfo) -> Self {
        let steam_id64 = first(&raw.steam_id64).unwrap_or_else(|| requested_id.to_string());
        let custom_url = first(&raw.custom_url).filter(|c| !c.is_empty());

        let most_played_games = if raw.most_played_games.is_empty() {
            None
        } else {
            Some(
                raw.most_played_games
                    .iter()
                    .flat_map(|wrapper| wrapper.most_played_game.iter())
                    .map(flatten_game)
                    .collect(),
            )
        };

        let groups = if raw.groups.is_empty() {
            None
        } else {
            Some(
                raw.groups
                    .iter()
                    .flat_map(|wrapper| wrapper.group.iter())
                    .map(flatten_group)
                    .collect(),
            )
        };

        let attributes = ProfileAttributes {
            custom_url,
            steam_id: first(&raw.steam_id),
            online_state: first(&raw.online_state),
            state_message: first(&raw.state_message),
            privacy_state: first(&raw.privacy_state),
            visibility_state: first(&raw.visibility_state),
            avatar_icon: first(&raw.avatar_icon),
            avatar_medium: first(&raw.avatar_medium),
            avatar_full: first(&raw.avatar_full),
            vac_banned: first(&raw.vac_banned),
            trade_ban_state: first(&raw.trade_ban_state),
            is_limited_account: first(&raw.is_limited_account),
            member_since: first(&raw.member_since),
            steam_rating: first(&raw.steam_rating),
            hours_played_2wk: first(&raw.hours_played_2wk),
            headline: first(&raw.headline),
            location: first(&raw.location),
            real_name: first(&raw.realname),
            summary: first(&raw.summary),
            most_played_games,
            groups,
        };

        Self {
            steam_id64,
            attributes,
        }
    }

    /// Write set for this fetch, marked as checked at `now`. Steam is
    /// authoritative for the custom URL, so it is claimed even when absent.
    pub fn to_changes(&self, now: DateTime<Utc>) -> Result<ProfileChanges, serde_json::Error> {
        let mut changes = self.attributes.to_changes(Some(now))?;
        changes.claim_custom_url = true;
        Ok(changes)
    }
}

fn first(values: &[String]) -> Option<String> {
    values.first().cloned()
}

fn flatten_game(game: &RawMostPlayedGame) -> MostPlayedGame {
    MostPlayedGame {
        game_name: first(&game.game_name),
        game_link: first(&game.game_link),
        game_icon: first(&game.game_icon),
        game_logo: first(&game.game_logo),
        game_logo_small: first(&game.game_logo_small),
        hours_played: first(&game.hours_played),
        hours_on_record: first(&game.hours_on_record),
        stats_name: first(&game.stats_name),
    }
}

fn flatten_group(group: &RawGroup) -> SteamGroup {
    SteamGroup {
        is_primary: group.is_primary.clone(),
        group_id64: first(&group.group_id64),
        group_name: first(&group.group_name),
        group_url: first(&group.group_url),
        headline: first(&group.headline),
        summary: first(&group.summary),
        avatar_icon: first(&group.avatar_icon),
        avatar_medium: first(&group.avatar_medium),
        avatar_full: first(&group.avatar_full),
        member_count: first(&group.member_count),
        members_in_chat: first(&group.members_in_chat),
        members_in_game: first(&group.members_in_game),
        members_online: first(&group.members_online),
    }
}
