use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use crate::codec::{decode_blob, encode_blob};

/// Entry of a profile's most played games
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MostPlayedGame {
    pub game_name: Option<String>,
    pub game_link: Option<String>,
    pub game_icon: Option<String>,
    pub game_logo: Option<String>,
    pub game_logo_small: Option<String>,
    pub hours_played: Option<String>,
    pub hours_on_record: Option<String>,
    pub stats_name: Option<String>,
}

/// Steam group membership
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SteamGroup {
    pub is_primary: Option<String>,
    #[serde(rename = "groupID64")]
    pub group_id64: Option<String>,
    pub group_name: Option<String>,
    #[serde(rename = "groupURL")]
    pub group_url: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub avatar_icon: Option<String>,
    pub avatar_medium: Option<String>,
    pub avatar_full: Option<String>,
    pub member_count: Option<String>,
    pub members_in_chat: Option<String>,
    pub members_in_game: Option<String>,
    pub members_online: Option<String>,
}

/// Profile attributes in structured form, as fetched from Steam or
/// supplied through the admin API. `None` means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAttributes {
    pub custom_url: Option<String>,
    #[serde(rename = "steamID")]
    pub steam_id: Option<String>,
    pub online_state: Option<String>,
    pub state_message: Option<String>,
    pub privacy_state: Option<String>,
    pub visibility_state: Option<String>,
    pub avatar_icon: Option<String>,
    pub avatar_medium: Option<String>,
    pub avatar_full: Option<String>,
    pub vac_banned: Option<String>,
    pub trade_ban_state: Option<String>,
    pub is_limited_account: Option<String>,
    pub member_since: Option<String>,
    pub steam_rating: Option<String>,
    #[serde(rename = "hoursPlayed2Wk")]
    pub hours_played_2wk: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "realname")]
    pub real_name: Option<String>,
    pub summary: Option<String>,
    pub most_played_games: Option<Vec<MostPlayedGame>>,
    pub groups: Option<Vec<SteamGroup>>,
}

impl ProfileAttributes {
    /// True when no attribute is provided at all
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Encode into a write set, stamping `last_checked` when given
    pub fn to_changes(
        &self,
        last_checked: Option<DateTime<Utc>>,
    ) -> Result<ProfileChanges, serde_json::Error> {
        Ok(ProfileChanges {
            custom_url: self.custom_url.clone(),
            steam_id: self.steam_id.clone(),
            online_state: self.online_state.clone(),
            state_message: self.state_message.clone(),
            privacy_state: self.privacy_state.clone(),
            visibility_state: self.visibility_state.clone(),
            avatar_icon: self.avatar_icon.clone(),
            avatar_medium: self.avatar_medium.clone(),
            avatar_full: self.avatar_full.clone(),
            vac_banned: self.vac_banned.clone(),
            trade_ban_state: self.trade_ban_state.clone(),
            is_limited_account: self.is_limited_account.clone(),
            member_since: self.member_since.clone(),
            steam_rating: self.steam_rating.clone(),
            hours_played_2wk: self.hours_played_2wk.clone(),
            headline: self.headline.clone(),
            location: self.location.clone(),
            real_name: self.real_name.clone(),
            summary: self.summary.clone(),
            most_played_games: encode_blob(self.most_played_games.as_deref())?,
            groups: encode_blob(self.groups.as_deref())?,
            last_checked,
            claim_custom_url: false,
        })
    }
}

/// Column values for an insert or a partial update.
/// On update, `None` leaves the stored value untouched unless
/// `claim_custom_url` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub custom_url: Option<String>,
    pub steam_id: Option<String>,
    pub online_state: Option<String>,
    pub state_message: Option<String>,
    pub privacy_state: Option<String>,
    pub visibility_state: Option<String>,
    pub avatar_icon: Option<String>,
    pub avatar_medium: Option<String>,
    pub avatar_full: Option<String>,
    pub vac_banned: Option<String>,
    pub trade_ban_state: Option<String>,
    pub is_limited_account: Option<String>,
    pub member_since: Option<String>,
    pub steam_rating: Option<String>,
    pub hours_played_2wk: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub real_name: Option<String>,
    pub summary: Option<String>,
    /// JSON text
    pub most_played_games: Option<String>,
    /// JSON text
    pub groups: Option<String>,
    pub last_checked: Option<DateTime<Utc>>,
    /// Write `custom_url` as given, `None` included, and take it away from
    /// any other row holding it
    pub claim_custom_url: bool,
}

/// Insert candidate
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub steam_id64: String,
    pub changes: ProfileChanges,
}

/// Row of `steam_profiles` as stored
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub steam_id64: String,
    pub custom_url: Option<String>,
    pub steam_id: Option<String>,
    pub online_state: Option<String>,
    pub state_message: Option<String>,
    pub privacy_state: Option<String>,
    pub visibility_state: Option<String>,
    pub avatar_icon: Option<String>,
    pub avatar_medium: Option<String>,
    pub avatar_full: Option<String>,
    pub vac_banned: Option<String>,
    pub trade_ban_state: Option<String>,
    pub is_limited_account: Option<String>,
    pub member_since: Option<String>,
    pub steam_rating: Option<String>,
    pub hours_played_2wk: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub real_name: Option<String>,
    pub summary: Option<String>,
    pub most_played_games: Option<String>,
    pub groups: Option<String>,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Build a row from an insert candidate with the given identity and
    /// bookkeeping timestamp
    pub fn from_new(id: i64, new: NewProfile, now: DateTime<Utc>) -> Self {
        let c = new.changes;
        Self {
            id,
            steam_id64: new.steam_id64,
            custom_url: c.custom_url,
            steam_id: c.steam_id,
            online_state: c.online_state,
            state_message: c.state_message,
            privacy_state: c.privacy_state,
            visibility_state: c.visibility_state,
            avatar_icon: c.avatar_icon,
            avatar_medium: c.avatar_medium,
            avatar_full: c.avatar_full,
            vac_banned: c.vac_banned,
            trade_ban_state: c.trade_ban_state,
            is_limited_account: c.is_limited_account,
            member_since: c.member_since,
            steam_rating: c.steam_rating,
            hours_played_2wk: c.hours_played_2wk,
            headline: c.headline,
            location: c.location,
            real_name: c.real_name,
            summary: c.summary,
            most_played_games: c.most_played_games,
            groups: c.groups,
            last_checked: c.last_checked,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place, the same way `profiles::update_by_id`
    /// does in SQL
    pub fn apply(&mut self, changes: ProfileChanges, now: DateTime<Utc>) {
        fn set<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        if changes.claim_custom_url {
            self.custom_url = changes.custom_url;
        } else {
            set(&mut self.custom_url, changes.custom_url);
        }
        set(&mut self.steam_id, changes.steam_id);
        set(&mut self.online_state, changes.online_state);
        set(&mut self.state_message, changes.state_message);
        set(&mut self.privacy_state, changes.privacy_state);
        set(&mut self.visibility_state, changes.visibility_state);
        set(&mut self.avatar_icon, changes.avatar_icon);
        set(&mut self.avatar_medium, changes.avatar_medium);
        set(&mut self.avatar_full, changes.avatar_full);
        set(&mut self.vac_banned, changes.vac_banned);
        set(&mut self.trade_ban_state, changes.trade_ban_state);
        set(&mut self.is_limited_account, changes.is_limited_account);
        set(&mut self.member_since, changes.member_since);
        set(&mut self.steam_rating, changes.steam_rating);
        set(&mut self.hours_played_2wk, changes.hours_played_2wk);
        set(&mut self.headline, changes.headline);
        set(&mut self.location, changes.location);
        set(&mut self.real_name, changes.real_name);
        set(&mut self.summary, changes.summary);
        set(&mut self.most_played_games, changes.most_played_games);
        set(&mut self.groups, changes.groups);
        set(&mut self.last_checked, changes.last_checked);
        self.updated_at = now;
    }

    /// Decode the JSON columns into a [`SteamProfile`]
    pub fn into_profile(self) -> Result<SteamProfile, serde_json::Error> {
        let most_played_games = decode_blob(self.most_played_games.as_deref())?;
        let groups = decode_blob(self.groups.as_deref())?;

        Ok(SteamProfile {
            id: self.id,
            steam_id64: self.steam_id64,
            custom_url: self.custom_url,
            steam_id: self.steam_id,
            online_state: self.online_state,
            state_message: self.state_message,
            privacy_state: self.privacy_state,
            visibility_state: self.visibility_state,
            avatar_icon: self.avatar_icon,
            avatar_medium: self.avatar_medium,
            avatar_full: self.avatar_full,
            vac_banned: self.vac_banned,
            trade_ban_state: self.trade_ban_state,
            is_limited_account: self.is_limited_account,
            member_since: self.member_since,
            steam_rating: self.steam_rating,
            hours_played_2wk: self.hours_played_2wk,
            headline: self.headline,
            location: self.location,
            real_name: self.real_name,
            summary: self.summary,
            most_played_games,
            groups,
            last_checked: self.last_checked,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Materialized profile handed back to API callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SteamProfile {
    pub id: i64,
    pub steam_id64: String,
    pub custom_url: Option<String>,
    #[serde(rename = "steamID")]
    pub steam_id: Option<String>,
    pub online_state: Option<String>,
    pub state_message: Option<String>,
    pub privacy_state: Option<String>,
    pub visibility_state: Option<String>,
    pub avatar_icon: Option<String>,
    pub avatar_medium: Option<String>,
    pub avatar_full: Option<String>,
    pub vac_banned: Option<String>,
    pub trade_ban_state: Option<String>,
    pub is_limited_account: Option<String>,
    pub member_since: Option<String>,
    pub steam_rating: Option<String>,
    #[serde(rename = "hoursPlayed2Wk")]
    pub hours_played_2wk: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "realname")]
    pub real_name: Option<String>,
    pub summary: Option<String>,
    pub most_played_games: Option<Vec<MostPlayedGame>>,
    pub groups: Option<Vec<SteamGroup>>,
    pub last_checked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
