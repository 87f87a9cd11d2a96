use serde::Deserialize;

/// A `<profile>` document from `steamcommunity.com/.../?xml=1`.
///
/// Every scalar is a list because the provider may omit any element
/// (private or limited profiles); callers take the first value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawInfo {
    #[serde(rename = "steamID64")]
    pub steam_id64: Vec<String>,
    #[serde(rename = "steamID")]
    pub steam_id: Vec<String>,
    #[serde(rename = "onlineState")]
    pub online_state: Vec<String>,
    #[serde(rename = "stateMessage")]
    pub state_message: Vec<String>,
    #[serde(rename = "privacyState")]
    pub privacy_state: Vec<String>,
    #[serde(rename = "visibilityState")]
    pub visibility_state: Vec<String>,
    #[serde(rename = "avatarIcon")]
    pub avatar_icon: Vec<String>,
    #[serde(rename = "avatarMedium")]
    pub avatar_medium: Vec<String>,
    #[serde(rename = "avatarFull")]
    pub avatar_full: Vec<String>,
    #[serde(rename = "vacBanned")]
    pub vac_banned: Vec<String>,
    #[serde(rename = "tradeBanState")]
    pub trade_ban_state: Vec<String>,
    #[serde(rename = "isLimitedAccount")]
    pub is_limited_account: Vec<String>,
    #[serde(rename = "customURL")]
    pub custom_url: Vec<String>,
    #[serde(rename = "memberSince")]
    pub member_since: Vec<String>,
    #[serde(rename = "steamRating")]
    pub steam_rating: Vec<String>,
    #[serde(rename = "hoursPlayed2Wk")]
    pub hours_played_2wk: Vec<String>,
    pub headline: Vec<String>,
    pub location: Vec<String>,
    pub realname: Vec<String>,
    pub summary: Vec<String>,
    #[serde(rename = "mostPlayedGames")]
    pub most_played_games: Vec<RawMostPlayedGames>,
    pub groups: Vec<RawGroups>,
}

/// `<mostPlayedGames>` wrapper
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMostPlayedGames {
    #[serde(rename = "mostPlayedGame")]
    pub most_played_game: Vec<RawMostPlayedGame>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMostPlayedGame {
    #[serde(rename = "gameName")]
    pub game_name: Vec<String>,
    #[serde(rename = "gameLink")]
    pub game_link: Vec<String>,
    #[serde(rename = "gameIcon")]
    pub game_icon: Vec<String>,
    #[serde(rename = "gameLogo")]
    pub game_logo: Vec<String>,
    #[serde(rename = "gameLogoSmall")]
    pub game_logo_small: Vec<String>,
    #[serde(rename = "hoursPlayed")]
    pub hours_played: Vec<String>,
    #[serde(rename = "hoursOnRecord")]
    pub hours_on_record: Vec<String>,
    #[serde(rename = "statsName")]
    pub stats_name: Vec<String>,
}

/// `<groups>` wrapper
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawGroups {
    pub group: Vec<RawGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawGroup {
    #[serde(rename = "@isPrimary")]
    pub is_primary: Option<String>,
    #[serde(rename = "groupID64")]
    pub group_id64: Vec<String>,
    #[serde(rename = "groupName")]
    pub group_name: Vec<String>,
    #[serde(rename = "groupURL")]
    pub group_url: Vec<String>,
    pub headline: Vec<String>,
    pub summary: Vec<String>,
    #[serde(rename = "avatarIcon")]
    pub avatar_icon: Vec<String>,
    #[serde(rename = "avatarMedium")]
    pub avatar_medium: Vec<String>,
    #[serde(rename = "avatarFull")]
    pub avatar_full: Vec<String>,
    #[serde(rename = "memberCount")]
    pub member_count: Vec<String>,
    #[serde(rename = "membersInChat")]
    pub members_in_chat: Vec<String>,
    #[serde(rename = "membersInGame")]
    pub members_in_game: Vec<String>,
    #[serde(rename = "membersOnline")]
    pub members_online: Vec<String>,
}
