//! Parser for user-supplied Steam profile identifiers
//!
//! Accepts a raw SteamID64, a `steamcommunity.com/profiles/<id>` URL,
//! a `steamcommunity.com/id/<custom>` URL or a bare custom URL segment,
//! and classifies it as either a SteamID64 or a custom (vanity) URL.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Classified identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedInput {
    /// The provider's immutable numeric profile ID
    SteamId64(String),
    /// A mutable vanity alias that may or may not map to a profile
    CustomUrl(String),
}

// ASCII digits only; `\d` would also match other Unicode decimal digits
static PROFILE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"steamcommunity\.com/profiles/([0-9]+)").unwrap());

static CUSTOM_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"steamcommunity\.com/id/([^/]+)").unwrap());

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

impl ParsedInput {
    /// Classify a raw identifier. Never fails: anything that is not
    /// recognisably a SteamID64 is treated as a custom URL.
    pub fn parse(raw: &str) -> Self {
        let id = raw.strip_suffix('/').unwrap_or(raw);

        if let Some(caps) = PROFILE_URL_RE.captures(id) {
            return Self::SteamId64(caps[1].to_string());
        }

        if let Some(caps) = CUSTOM_URL_RE.captures(id) {
            return Self::CustomUrl(caps[1].to_string());
        }

        if DIGITS_RE.is_match(id) {
            return Self::SteamId64(id.to_string());
        }

        Self::CustomUrl(id.to_string())
    }

    pub fn value(&self) -> &str {
        match self {
            Self::SteamId64(v) | Self::CustomUrl(v) => v,
        }
    }

    pub fn is_steam_id64(&self) -> bool {
        matches!(self, Self::SteamId64(_))
    }
}

impl fmt::Display for ParsedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SteamId64(v) => write!(f, "steamId64:{v}"),
            Self::CustomUrl(v) => write!(f, "customUrl:{v}"),
        }
    }
}
