use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::database::store::{PostStore, StoreError};
use crate::post::post_model::{NewPost, Post, PostChanges};

/// Process-local store used for development runs and tests. Posts are kept
/// in insertion order and ids are fresh ObjectIds, so they never repeat.
#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let post = Post {
            id: ObjectId::new().to_hex(),
            title: post.title,
            description: post.description,
            image_url: post.image_url,
        };
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_and_update(
        &self,
        id: &str,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };

        post.title = changes.title;
        post.description = changes.description;
        if let Some(url) = changes.image_url {
            post.image_url = url;
        }
        Ok(Some(post.clone()))
    }

    async fn find_and_delete(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        let position = posts.iter().position(|post| post.id == id);
        Ok(position.map(|index| posts.remove(index)))
    }
}
