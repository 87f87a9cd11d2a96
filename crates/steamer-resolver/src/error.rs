//! Error types for profile resolution

use std::fmt;

pub const INVALID_ID: &str = "Invalid, private or not found Steam ID";
pub const FETCH_FAILED: &str = "Failed to fetch Steam profile info";
pub const PROFILE_NOT_FOUND: &str = "Profile not found";

/// Failure of a resolve or refresh run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Identifier does not resolve to a fetchable profile, or (refresh)
    /// nothing is stored for it
    NotFound(String),
    /// Steam returned no usable data for a SteamID64
    Fetch(String),
    /// Uniqueness violation on insert (concurrent first resolution)
    Conflict(String),
    /// Any other persistence failure
    Store(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Fetch(msg) => write!(f, "Fetch failed: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<StoreError> for ResolveError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Store(other.to_string()),
        }
    }
}

/// Errors from a [`crate::ProfileStore`]
#[derive(Debug)]
pub enum StoreError {
    /// Unique constraint violated
    Conflict(String),
    /// No row with this id
    NotFound(i64),
    Database(sqlx::Error),
    /// Stored JSON column could not be decoded (or encoded)
    Decode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::NotFound(id) => write!(f, "No profile with id {id}"),
            Self::Database(e) => write!(f, "Database error: {e}"),
            Self::Decode(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(e) => Some(e),
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db) = err.as_database_error() {
            if db.is_unique_violation() {
                return Self::Conflict(db.message().to_string());
            }
        }
        Self::Database(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

/// Errors from a [`crate::ProfileFetcher`]
#[derive(Debug)]
pub enum FetcherError {
    Community(steamer_community::CommunityError),
    Unavailable(String),
}

impl fmt::Display for FetcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Community(e) => write!(f, "{e}"),
            Self::Unavailable(msg) => write!(f, "Profile provider unavailable: {msg}"),
        }
    }
}

impl std::error::Error for FetcherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Community(e) => Some(e),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<steamer_community::CommunityError> for FetcherError {
    fn from(err: steamer_community::CommunityError) -> Self {
        Self::Community(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_conflict_maps_to_conflict() {
        let err: ResolveError = StoreError::Conflict("steam_id64".into()).into();
        assert_eq!(err, ResolveError::Conflict("steam_id64".into()));
    }

    #[test]
    fn test_store_not_found_maps_to_store() {
        let err: ResolveError = StoreError::NotFound(7).into();
        assert_eq!(err, ResolveError::Store("No profile with id 7".into()));
    }

    #[test]
    fn test_non_database_sqlx_error_is_database() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ResolveError::NotFound(INVALID_ID.into()).to_string(),
            "Not found: Invalid, private or not found Steam ID"
        );
        assert_eq!(
            FetcherError::Unavailable("rate limited".into()).to_string(),
            "Profile provider unavailable: rate limited"
        );
    }
}
