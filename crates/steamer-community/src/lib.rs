//! Steam Community Profile Client
//!
//! Fetches public Steam Community profiles through the `?xml=1` endpoints
//! and resolves custom URLs to SteamID64s and back. Results are returned
//! in the provider's raw shape: every scalar is a (possibly empty) list of
//! values and collections keep their nested wrapper elements.

mod client;
mod error;
mod types;

pub use client::SteamCommunityClient;
pub use error::{CommunityError, Result};
pub use types::{RawGroup, RawGroups, RawInfo, RawMostPlayedGame, RawMostPlayedGames};
