//! Steam Profile Resolver
//!
//! Turns a user-supplied identifier (SteamID64, profile URL or custom URL)
//! into a stored Steam profile. Stored copies are served while fresh;
//! stale, empty or missing ones are fetched from Steam Community and
//! written back. No state is held between requests: everything shared
//! lives behind [`ProfileStore`].

mod engine;
mod error;
mod fetcher;
mod freshness;
mod memory;
mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use engine::{ProfileResolver, Resolution};
pub use error::{
    FetcherError, ResolveError, StoreError, FETCH_FAILED, INVALID_ID, PROFILE_NOT_FOUND,
};
pub use fetcher::{FetchedProfile, ProfileFetcher};
pub use freshness::{is_empty, FreshnessPolicy, DEFAULT_CACHE_TTL};
pub use memory::MemoryProfileStore;
pub use store::{PgProfileStore, ProfileStore};
