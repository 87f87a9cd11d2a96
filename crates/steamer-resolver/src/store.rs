use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use steamer_db::{NewProfile, PgPool, ProfileChanges, ProfileRow};
use tracing::{error, info};

use crate::error::StoreError;

/// Persistent keyed storage for resolved profiles.
///
/// Each call is atomic; nothing here spans calls, so a find followed by a
/// write is not atomic.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProfileRow>, StoreError>;

    async fn find_by_steam_id64(&self, steam_id64: &str) -> Result<Option<ProfileRow>, StoreError>;

    async fn find_by_custom_url(&self, custom_url: &str) -> Result<Option<ProfileRow>, StoreError>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ProfileRow>, StoreError>;

    /// Fails with [`StoreError::Conflict`] if the SteamID64 is taken, or the
    /// custom URL is taken and not claimed
    async fn insert(&self, new: NewProfile) -> Result<ProfileRow, StoreError>;

    /// Fails with [`StoreError::NotFound`] if no row has this id
    async fn update_by_id(&self, id: i64, changes: ProfileChanges)
        -> Result<ProfileRow, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;
}

/// [`ProfileStore`] backed by the `steam_profiles` Postgres table
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn logged(err: sqlx::Error) -> StoreError {
    let err = StoreError::from(err);
    if let StoreError::Database(ref e) = err {
        error!(error = %e, "steam_profiles query failed");
    }
    err
}

/// Custom URL a write takes over from other rows
fn claimed(changes: &ProfileChanges) -> Option<&str> {
    if changes.claim_custom_url {
        changes.custom_url.as_deref()
    } else {
        None
    }
}

async fn release(
    tx: &mut Transaction<'_, Postgres>,
    custom_url: &str,
    keep_id: Option<i64>,
) -> Result<(), StoreError> {
    let released = steamer_db::profiles::release_custom_url(&mut **tx, custom_url, keep_id)
        .await
        .map_err(logged)?;
    if released > 0 {
        info!(custom_url = %custom_url, released, "Released custom URL from previous owner");
    }
    Ok(())
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProfileRow>, StoreError> {
        steamer_db::profiles::find_by_id(&self.pool, id)
            .await
            .map_err(logged)
    }

    async fn find_by_steam_id64(&self, steam_id64: &str) -> Result<Option<ProfileRow>, StoreError> {
        steamer_db::profiles::find_by_steam_id64(&self.pool, steam_id64)
            .await
            .map_err(logged)
    }

    async fn find_by_custom_url(&self, custom_url: &str) -> Result<Option<ProfileRow>, StoreError> {
        steamer_db::profiles::find_by_custom_url(&self.pool, custom_url)
            .await
            .map_err(logged)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ProfileRow>, StoreError> {
        steamer_db::profiles::list(&self.pool, limit, offset)
            .await
            .map_err(logged)
    }

    async fn insert(&self, new: NewProfile) -> Result<ProfileRow, StoreError> {
        let mut tx = self.pool.begin().await.map_err(logged)?;
        if let Some(custom_url) = claimed(&new.changes) {
            release(&mut tx, custom_url, None).await?;
        }
        let row = steamer_db::profiles::insert(&mut *tx, &new)
            .await
            .map_err(logged)?;
        tx.commit().await.map_err(logged)?;
        Ok(row)
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: ProfileChanges,
    ) -> Result<ProfileRow, StoreError> {
        let mut tx = self.pool.begin().await.map_err(logged)?;
        if let Some(custom_url) = claimed(&changes) {
            release(&mut tx, custom_url, Some(id)).await?;
        }
        let row = steamer_db::profiles::update_by_id(&mut *tx, id, &changes)
            .await
            .map_err(logged)?
            .ok_or(StoreError::NotFound(id))?;
        tx.commit().await.map_err(logged)?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        steamer_db::profiles::delete_by_id(&self.pool, id)
            .await
            .map_err(logged)
    }
}
