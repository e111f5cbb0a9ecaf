//! Ownership checks for the folder and tags a note points at.
//!
//! A reference is valid when the row exists and belongs to the acting user.
//! Foreign and missing rows fail the same way. The checks and the following
//! write are not one transaction; a folder or tag removed in between goes
//! undetected.

use noteful_core::error::CoreError;
use noteful_core::types::DbId;
use noteful_db::Store;

use crate::error::AppResult;

/// `None` always passes; otherwise the folder must be owned by `user_id`.
pub async fn validate_folder_ownership(
    store: &dyn Store,
    user_id: DbId,
    folder_id: Option<DbId>,
) -> AppResult<()> {
    let Some(folder_id) = folder_id else {
        return Ok(());
    };
    match store.find_folder(user_id, folder_id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::InvalidFolder.into()),
    }
}

/// Every id must name a distinct tag owned by `user_id`.
///
/// Duplicate ids collapse in the owned count and are therefore rejected.
pub async fn validate_tag_ownership(
    store: &dyn Store,
    user_id: DbId,
    tag_ids: &[DbId],
) -> AppResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let owned = store.count_owned_tags(user_id, tag_ids).await?;
    if owned != tag_ids.len() as i64 {
        return Err(CoreError::InvalidTag.into());
    }
    Ok(())
}

/// Run both checks concurrently. A folder failure is reported before a tag
/// failure.
pub async fn validate_references(
    store: &dyn Store,
    user_id: DbId,
    folder_id: Option<DbId>,
    tag_ids: &[DbId],
) -> AppResult<()> {
    let (folder, tags) = tokio::join!(
        validate_folder_ownership(store, user_id, folder_id),
        validate_tag_ownership(store, user_id, tag_ids),
    );
    folder?;
    tags?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use noteful_db::models::folder::{CreateFolder, Folder};
    use noteful_db::models::note::{NoteFilter, NoteInput, NoteWithTags};
    use noteful_db::models::tag::{CreateTag, Tag};
    use noteful_db::models::user::{CreateUser, User};
    use noteful_db::store::StoreResult;
    use noteful_db::MemoryStore;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::AppError;

    struct Fixture {
        store: MemoryStore,
        alice: DbId,
        alice_folder: DbId,
        alice_tag: DbId,
        bob_folder: DbId,
        bob_tag: DbId,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for name in ["alice", "bob"] {
            let user = store
                .create_user(&CreateUser {
                    username: name.into(),
                    password_hash: "digest".into(),
                    full_name: String::new(),
                })
                .await
                .unwrap();
            let folder = store
                .create_folder(user.id, &CreateFolder { name: "Inbox".into() })
                .await
                .unwrap();
            let tag = store
                .create_tag(user.id, &CreateTag { name: "todo".into() })
                .await
                .unwrap();
            ids.push((user.id, folder.id, tag.id));
        }
        Fixture {
            store,
            alice: ids[0].0,
            alice_folder: ids[0].1,
            alice_tag: ids[0].2,
            bob_folder: ids[1].1,
            bob_tag: ids[1].2,
        }
    }

    #[tokio::test]
    async fn owned_references_pass() {
        let f = fixture().await;
        validate_references(&f.store, f.alice, Some(f.alice_folder), &[f.alice_tag])
            .await
            .unwrap();
        validate_references(&f.store, f.alice, None, &[]).await.unwrap();
    }

    #[tokio::test]
    async fn foreign_or_missing_folder_is_invalid() {
        let f = fixture().await;
        for folder in [f.bob_folder, 9_999] {
            let err = validate_folder_ownership(&f.store, f.alice, Some(folder))
                .await
                .unwrap_err();
            assert_matches!(err, AppError::Core(CoreError::InvalidFolder));
        }
    }

    #[tokio::test]
    async fn foreign_duplicate_or_missing_tag_is_invalid() {
        let f = fixture().await;
        for tags in [
            vec![f.alice_tag, f.bob_tag],
            vec![f.alice_tag, f.alice_tag],
            vec![9_999],
        ] {
            let err = validate_tag_ownership(&f.store, f.alice, &tags)
                .await
                .unwrap_err();
            assert_matches!(err, AppError::Core(CoreError::InvalidTag));
        }
    }

    #[tokio::test]
    async fn folder_failure_is_reported_first() {
        let f = fixture().await;
        let err = validate_references(&f.store, f.alice, Some(f.bob_folder), &[f.bob_tag])
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::InvalidFolder));
    }

    /// Holds every folder lookup until a tag count has been issued.
    struct GatedStore {
        inner: MemoryStore,
        tags_counted: Notify,
    }

    #[async_trait]
    impl Store for GatedStore {
        async fn health_check(&self) -> StoreResult<()> {
            self.inner.health_check().await
        }

        async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
            self.inner.create_user(input).await
        }

        async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
            self.inner.find_user_by_username(username).await
        }

        async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
            self.inner.find_user_by_id(id).await
        }

        async fn create_folder(&self, user_id: DbId, input: &CreateFolder) -> StoreResult<Folder> {
            self.inner.create_folder(user_id, input).await
        }

        async fn list_folders(&self, user_id: DbId) -> StoreResult<Vec<Folder>> {
            self.inner.list_folders(user_id).await
        }

        async fn find_folder(&self, user_id: DbId, folder_id: DbId) -> StoreResult<Option<Folder>> {
            self.tags_counted.notified().await;
            self.inner.find_folder(user_id, folder_id).await
        }

        async fn create_tag(&self, user_id: DbId, input: &CreateTag) -> StoreResult<Tag> {
            self.inner.create_tag(user_id, input).await
        }

        async fn list_tags(&self, user_id: DbId) -> StoreResult<Vec<Tag>> {
            self.inner.list_tags(user_id).await
        }

        async fn count_owned_tags(&self, user_id: DbId, tag_ids: &[DbId]) -> StoreResult<i64> {
            self.tags_counted.notify_one();
            self.inner.count_owned_tags(user_id, tag_ids).await
        }

        async fn list_notes(&self, user_id: DbId, filter: &NoteFilter) -> StoreResult<Vec<NoteWithTags>> {
            self.inner.list_notes(user_id, filter).await
        }

        async fn find_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<Option<NoteWithTags>> {
            self.inner.find_note(user_id, note_id).await
        }

        async fn create_note(&self, user_id: DbId, input: &NoteInput) -> StoreResult<NoteWithTags> {
            self.inner.create_note(user_id, input).await
        }

        async fn update_note(
            &self,
            user_id: DbId,
            note_id: DbId,
            input: &NoteInput,
        ) -> StoreResult<Option<NoteWithTags>> {
            self.inner.update_note(user_id, note_id, input).await
        }

        async fn delete_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<bool> {
            self.inner.delete_note(user_id, note_id).await
        }
    }

    #[tokio::test]
    async fn folder_and_tag_checks_are_in_flight_together() {
        let f = fixture().await;
        let store = GatedStore {
            inner: f.store,
            tags_counted: Notify::new(),
        };

        // Run one after the other, the folder lookup would wait forever.
        tokio::time::timeout(
            Duration::from_secs(5),
            validate_references(&store, f.alice, Some(f.alice_folder), &[f.alice_tag]),
        )
        .await
        .expect("folder lookup waited on a tag count that never started")
        .unwrap();
    }
}
