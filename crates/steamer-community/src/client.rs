use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::CommunityError;
use crate::types::RawInfo;

const DEFAULT_BASE_URL: &str = "https://steamcommunity.com";
const DEFAULT_USER_AGENT: &str = "steamer/0.1";

/// Client for the public Steam Community profile XML endpoints
pub struct SteamCommunityClient {
    client: Client,
    base_url: String,
}

impl SteamCommunityClient {
    /// Create a new client with default settings
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom Steam Community URL
    pub fn with_base_url(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a custom URL to a SteamID64
    pub async fn custom_url_to_steam_id64(
        &self,
        custom_url: &str,
    ) -> crate::Result<Option<String>> {
        let url = format!(
            "{}/id/{}?xml=1",
            self.base_url,
            urlencoding::encode(custom_url)
        );
        let info = self.fetch_profile(&url).await?;
        Ok(info.and_then(|i| i.steam_id64.into_iter().next()))
    }

    /// Look up the current custom URL of a SteamID64, if it has one
    pub async fn steam_id64_to_custom_url(
        &self,
        steam_id64: &str,
    ) -> crate::Result<Option<String>> {
        let info = self.steam_id64_to_full_info(steam_id64).await?;
        Ok(info
            .and_then(|i| i.custom_url.into_iter().next())
            .filter(|c| !c.is_empty()))
    }

    /// Fetch the full profile document for a SteamID64
    pub async fn steam_id64_to_full_info(
        &self,
        steam_id64: &str,
    ) -> crate::Result<Option<RawInfo>> {
        let url = format!(
            "{}/profiles/{}?xml=1",
            self.base_url,
            urlencoding::encode(steam_id64)
        );
        self.fetch_profile(&url).await
    }

    async fn fetch_profile(&self, url: &str) -> crate::Result<Option<RawInfo>> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/xml")
            .send()
            .await
            .map_err(CommunityError::Http)?;

        if !response.status().is_success() {
            warn!(
                url = %url,
                status = %response.status(),
                "Steam Community returned non-success status"
            );
            return Ok(None);
        }

        let body = response.text().await.map_err(CommunityError::Http)?;
        let info = parse_profile(&body)?;

        if info.is_none() {
            debug!(url = %url, "Steam Community returned no profile");
        }

        Ok(info)
    }
}

impl Default for SteamCommunityClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a profile XML document. Error documents
/// (`<response><error>...</error></response>`) carry no `steamID64`
/// and yield `None`.
pub(crate) fn parse_profile(xml: &str) -> crate::Result<Option<RawInfo>> {
    let info: RawInfo = quick_xml::de::from_str(xml)?;
    if info.steam_id64.is_empty() {
        return Ok(None);
    }
    Ok(Some(info))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<profile>
	<steamID64>76561197960287930</steamID64>
	<steamID><![CDATA[Rabscuttle]]></steamID>
	<onlineState>offline</onlineState>
	<stateMessage><![CDATA[Offline]]></stateMessage>
	<privacyState>public</privacyState>
	<visibilityState>3</visibilityState>
	<avatarIcon><![CDATA[https://avatars.example/a.jpg]]></avatarIcon>
	<avatarMedium><![CDATA[https://avatars.example/a_medium.jpg]]></avatarMedium>
	<avatarFull><![CDATA[https://avatars.example/a_full.jpg]]></avatarFull>
	<vacBanned>0</vacBanned>
	<tradeBanState>None</tradeBanState>
	<isLimitedAccount>0</isLimitedAccount>
	<customURL><![CDATA[gabelogannewell]]></customURL>
	<memberSince>September 12, 2003</memberSince>
	<hoursPlayed2Wk>0.0</hoursPlayed2Wk>
	<headline><![CDATA[]]></headline>
	<location><![CDATA[Washington, United States]]></location>
	<realname><![CDATA[Gabe Newell]]></realname>
	<summary><![CDATA[Welcome to Steam.]]></summary>
	<mostPlayedGames>
		<mostPlayedGame>
			<gameName><![CDATA[Half-Life 2]]></gameName>
			<gameLink><![CDATA[https://steamcommunity.com/app/220]]></gameLink>
			<hoursPlayed>1.5</hoursPlayed>
			<hoursOnRecord>420</hoursOnRecord>
			<statsName><![CDATA[HL2]]></statsName>
		</mostPlayedGame>
		<mostPlayedGame>
			<gameName><![CDATA[Portal]]></gameName>
			<hoursOnRecord>12</hoursOnRecord>
		</mostPlayedGame>
	</mostPlayedGames>
	<groups>
		<group isPrimary="1">
			<groupID64>103582791429521408</groupID64>
			<groupName><![CDATA[Valve]]></groupName>
			<groupURL><![CDATA[Valve]]></groupURL>
			<memberCount>42</memberCount>
		</group>
	</groups>
</profile>"#;

    const ERROR_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<response><error><![CDATA[The specified profile could not be found.]]></error></response>"#;

    #[test]
    fn test_parse_profile_scalars() {
        let info = parse_profile(PROFILE_XML).unwrap().unwrap();
        assert_eq!(info.steam_id64, vec!["76561197960287930"]);
        assert_eq!(info.steam_id, vec!["Rabscuttle"]);
        assert_eq!(info.online_state, vec!["offline"]);
        assert_eq!(info.custom_url, vec!["gabelogannewell"]);
        assert_eq!(info.realname, vec!["Gabe Newell"]);
        assert!(info.steam_rating.is_empty());
    }

    #[test]
    fn test_parse_profile_collections() {
        let info = parse_profile(PROFILE_XML).unwrap().unwrap();
        assert_eq!(info.most_played_games.len(), 1);
        let games = &info.most_played_games[0].most_played_game;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_name, vec!["Half-Life 2"]);
        assert_eq!(games[1].game_name, vec!["Portal"]);
        assert!(games[1].game_link.is_empty());

        assert_eq!(info.groups.len(), 1);
        let group = &info.groups[0].group[0];
        assert_eq!(group.is_primary.as_deref(), Some("1"));
        assert_eq!(group.group_name, vec!["Valve"]);
        assert_eq!(group.member_count, vec!["42"]);
    }

    #[test]
    fn test_parse_error_document() {
        assert!(parse_profile(ERROR_XML).unwrap().is_none());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(parse_profile("<html><body>").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = SteamCommunityClient::with_base_url("http://localhost:1234/");
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = SteamCommunityClient::with_base_url("http://127.0.0.1:1");
        let result = client.steam_id64_to_full_info("76561197960287930").await;
        assert!(matches!(result, Err(CommunityError::Http(_))));
    }
}
