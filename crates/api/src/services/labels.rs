//! Folder and tag creation.
//!
//! Names are trimmed and must be non-empty. A name is unique per owner; a
//! second folder (or tag) with the same name is a conflict.

use noteful_core::error::CoreError;
use noteful_core::types::DbId;
use noteful_db::models::folder::{CreateFolder, Folder};
use noteful_db::models::tag::{CreateTag, Tag};
use noteful_db::{Store, StoreError};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Body for `POST /folders` and `POST /tags`.
#[derive(Debug, Default, Deserialize)]
pub struct LabelRequest {
    pub name: Option<String>,
}

fn required_name(request: &LabelRequest) -> Result<String, CoreError> {
    request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| CoreError::Validation("Missing `name` in request body".into()))
}

fn name_conflict(kind: &str, name: &str) -> impl FnOnce(StoreError) -> AppError {
    let message = format!("{kind} name '{name}' already exists");
    move |err| match err {
        StoreError::UniqueViolation(_) => CoreError::Conflict(message).into(),
        other => other.into(),
    }
}

pub async fn create_folder(store: &dyn Store, user_id: DbId, request: &LabelRequest) -> AppResult<Folder> {
    let name = required_name(request)?;
    store
        .create_folder(user_id, &CreateFolder { name: name.clone() })
        .await
        .map_err(name_conflict("Folder", &name))
}

pub async fn create_tag(store: &dyn Store, user_id: DbId, request: &LabelRequest) -> AppResult<Tag> {
    let name = required_name(request)?;
    store
        .create_tag(user_id, &CreateTag { name: name.clone() })
        .await
        .map_err(name_conflict("Tag", &name))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use noteful_db::MemoryStore;

    use super::*;

    fn named(name: &str) -> LabelRequest {
        LabelRequest {
            name: Some(name.to_string()),
        }
    }

    #[tokio::test]
    async fn names_are_trimmed() {
        let store = MemoryStore::new();
        let folder = create_folder(&store, 1, &named("  Work  ")).await.unwrap();
        assert_eq!(folder.name, "Work");
    }

    #[tokio::test]
    async fn blank_or_missing_name_is_rejected() {
        let store = MemoryStore::new();
        assert_matches!(
            create_tag(&store, 1, &named("   ")).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            create_tag(&store, 1, &LabelRequest::default()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let store = MemoryStore::new();
        create_tag(&store, 1, &named("urgent")).await.unwrap();
        let err = create_tag(&store, 1, &named("urgent")).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Conflict(msg)) if msg.contains("urgent"));

        // Another owner may reuse it.
        create_tag(&store, 2, &named("urgent")).await.unwrap();
    }
}
