use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use steamer_db::{NewProfile, ProfileChanges, ProfileRow};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::ProfileStore;

/// In-process [`ProfileStore`] with the same uniqueness rules as the
/// Postgres table. Used by tests and local runs without a database.
#[derive(Default)]
pub struct MemoryProfileStore {
    rows: RwLock<Vec<ProfileRow>>,
    next_id: AtomicI64,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn custom_url_taken(rows: &[ProfileRow], custom_url: Option<&str>, except_id: Option<i64>) -> bool {
    let Some(custom_url) = custom_url else {
        return false;
    };
    rows.iter()
        .any(|r| Some(r.id) != except_id && r.custom_url.as_deref() == Some(custom_url))
}

fn release_custom_url(
    rows: &mut [ProfileRow],
    custom_url: &str,
    keep_id: Option<i64>,
    now: DateTime<Utc>,
) {
    for row in rows
        .iter_mut()
        .filter(|r| Some(r.id) != keep_id && r.custom_url.as_deref() == Some(custom_url))
    {
        row.custom_url = None;
        row.updated_at = now;
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProfileRow>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_steam_id64(&self, steam_id64: &str) -> Result<Option<ProfileRow>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.steam_id64 == steam_id64).cloned())
    }

    async fn find_by_custom_url(&self, custom_url: &str) -> Result<Option<ProfileRow>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| r.custom_url.as_deref() == Some(custom_url))
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ProfileRow>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn insert(&self, new: NewProfile) -> Result<ProfileRow, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.steam_id64 == new.steam_id64) {
            return Err(StoreError::Conflict(format!(
                "steam_id64 {} already exists",
                new.steam_id64
            )));
        }
        let now = Utc::now();
        let custom_url = new.changes.custom_url.as_deref();
        if new.changes.claim_custom_url {
            if let Some(custom_url) = custom_url {
                release_custom_url(&mut rows, custom_url, None, now);
            }
        } else if custom_url_taken(&rows, custom_url, None) {
            return Err(StoreError::Conflict("custom_url already exists".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = ProfileRow::from_new(id, new, now);
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: ProfileChanges,
    ) -> Result<ProfileRow, StoreError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let now = Utc::now();
        let custom_url = changes.custom_url.as_deref();
        if changes.claim_custom_url {
            if let Some(custom_url) = custom_url {
                release_custom_url(&mut rows, custom_url, Some(id), now);
            }
        } else if custom_url_taken(&rows, custom_url, Some(id)) {
            return Err(StoreError::Conflict("custom_url already exists".into()));
        }

        let row = &mut rows[index];
        row.apply(changes, now);
        Ok(row.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_profile(steam_id64: &str, custom_url: Option<&str>) -> NewProfile {
        NewProfile {
            steam_id64: steam_id64.to_string(),
            changes: ProfileChanges {
                custom_url: custom_url.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_identity_and_timestamps() {
        let store = MemoryProfileStore::new();
        let first = store.insert(new_profile("1", None)).await.unwrap();
        let second = store.insert(new_profile("2", None)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(first.last_checked, None);
    }

    #[tokio::test]
    async fn test_insert_duplicate_steam_id64_conflicts() {
        let store = MemoryProfileStore::new();
        store.insert(new_profile("1", None)).await.unwrap();
        let err = store.insert(new_profile("1", None)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate_custom_url_conflicts() {
        let store = MemoryProfileStore::new();
        store.insert(new_profile("1", Some("gaben"))).await.unwrap();
        let err = store.insert(new_profile("2", Some("gaben"))).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let store = MemoryProfileStore::new();
        let err = store
            .update_by_id(42, ProfileChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let store = MemoryProfileStore::new();
        let row = store.insert(new_profile("1", None)).await.unwrap();
        let updated = store
            .update_by_id(
                row.id,
                ProfileChanges {
                    headline: Some("hi".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.headline.as_deref(), Some("hi"));
        assert!(updated.updated_at >= row.updated_at);
        assert_eq!(updated.created_at, row.created_at);
    }

    #[tokio::test]
    async fn test_update_keeps_own_custom_url() {
        let store = MemoryProfileStore::new();
        let row = store.insert(new_profile("1", Some("gaben"))).await.unwrap();
        let changes = ProfileChanges {
            custom_url: Some("gaben".into()),
            ..Default::default()
        };
        assert!(store.update_by_id(row.id, changes).await.is_ok());
    }

    #[tokio::test]
    async fn test_claimed_custom_url_moves_between_rows() {
        let store = MemoryProfileStore::new();
        let old = store.insert(new_profile("1", Some("gaben"))).await.unwrap();
        let mut claim = new_profile("2", Some("gaben"));
        claim.changes.claim_custom_url = true;

        let new = store.insert(claim).await.unwrap();

        assert_eq!(new.custom_url.as_deref(), Some("gaben"));
        let old = store.find_by_id(old.id).await.unwrap().unwrap();
        assert_eq!(old.custom_url, None);
        assert_eq!(store.find_by_custom_url("gaben").await.unwrap().unwrap().id, new.id);

        let changes = ProfileChanges {
            custom_url: Some("gaben".into()),
            claim_custom_url: true,
            ..Default::default()
        };
        store.update_by_id(old.id, changes).await.unwrap();
        let new = store.find_by_id(new.id).await.unwrap().unwrap();
        assert_eq!(new.custom_url, None);
    }

    #[tokio::test]
    async fn test_unclaimed_update_to_taken_custom_url_conflicts() {
        let store = MemoryProfileStore::new();
        store.insert(new_profile("1", Some("gaben"))).await.unwrap();
        let other = store.insert(new_profile("2", None)).await.unwrap();
        let changes = ProfileChanges {
            custom_url: Some("gaben".into()),
            ..Default::default()
        };
        let err = store.update_by_id(other.id, changes).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_list_and_delete() {
        let store = MemoryProfileStore::new();
        let a = store.insert(new_profile("1", Some("a"))).await.unwrap();
        store.insert(new_profile("2", None)).await.unwrap();
        store.insert(new_profile("3", None)).await.unwrap();

        assert_eq!(store.find_by_custom_url("a").await.unwrap(), Some(a.clone()));
        assert_eq!(store.find_by_steam_id64("1").await.unwrap(), Some(a.clone()));
        assert!(store.find_by_steam_id64("9").await.unwrap().is_none());

        let page = store.list(2, 1).await.unwrap();
        assert_eq!(
            page.iter().map(|r| r.steam_id64.as_str()).collect::<Vec<_>>(),
            vec!["2", "3"]
        );

        assert!(store.delete_by_id(a.id).await.unwrap());
        assert!(!store.delete_by_id(a.id).await.unwrap());
        assert!(store.find_by_id(a.id).await.unwrap().is_none());
    }
}
