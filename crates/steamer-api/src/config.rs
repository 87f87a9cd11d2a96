use std::env;
use std::fmt;
use std::time::Duration;

/// Configuration that cannot be started with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres URL, or `memory` for an in-process store
    pub database_url: String,
    pub database_max_connections: u32,
    /// Token required on `/api/*`
    pub bearer_token: String,
    pub cors_origins: Vec<String>,
    pub steam_community_url: String,
    pub cache_ttl: Duration,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(9999);

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/steamer".to_string());

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|n| n.parse().ok())
            .unwrap_or(10);

        let bearer_token = lookup("BEARER_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("BEARER_TOKEN"))?;

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]);

        let steam_community_url = lookup("STEAM_COMMUNITY_URL")
            .unwrap_or_else(|| "https://steamcommunity.com".to_string());

        let cache_ttl = lookup("CACHE_TTL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(steamer_resolver::DEFAULT_CACHE_TTL);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            bearer_token,
            cors_origins,
            steam_community_url,
            cache_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("BEARER_TOKEN", "secret")]).unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.bearer_token, "secret");
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.steam_community_url, "https://steamcommunity.com");
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "memory"),
            ("BEARER_TOKEN", "secret"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("CACHE_TTL_SECS", "86400"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "memory");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.cache_ttl, Duration::from_secs(86400));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config(&[
            ("BEARER_TOKEN", "secret"),
            ("PORT", "not-a-port"),
            ("CACHE_TTL_SECS", "-5"),
        ])
        .unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_bearer_token_is_required() {
        let missing = ConfigError::Missing("BEARER_TOKEN");
        assert_eq!(config(&[]).unwrap_err(), missing);
        assert_eq!(config(&[("BEARER_TOKEN", "")]).unwrap_err(), missing);
        assert_eq!(config(&[("BEARER_TOKEN", "  ")]).unwrap_err(), missing);
        assert_eq!(missing.to_string(), "BEARER_TOKEN must be set");
    }
}
