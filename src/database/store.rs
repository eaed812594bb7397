use async_trait::async_trait;
use thiserror::Error;

use crate::post::post_model::{NewPost, Post, PostChanges};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Document collection holding posts. Ids are assigned by the store and
/// lookups by an id the store never issued resolve to `None`.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

    async fn find_all(&self) -> Result<Vec<Post>, StoreError>;

    /// Applies `changes` and returns the post as it is after the update.
    async fn find_and_update(
        &self,
        id: &str,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError>;

    /// Removes the post and returns what was removed.
    async fn find_and_delete(&self, id: &str) -> Result<Option<Post>, StoreError>;
}
