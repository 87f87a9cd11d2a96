//! Storage for resolved Steam profiles
//!
//! One row per SteamID64 in `steam_profiles`. Collection attributes are
//! kept as JSON text and decoded at the read boundary (see [`codec`]).

pub mod codec;
pub mod profiles;
pub mod types;

pub use sqlx::postgres::PgPool;
pub use types::*;

/// Apply the embedded migrations under `migrations/`
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
    tracing::info!("steam_profiles schema is up to date");
    Ok(())
}
