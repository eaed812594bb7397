use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{
    Client, Collection,
    bson::{doc, oid::ObjectId},
};

use crate::database::store::{PostStore, StoreError};
use crate::post::post_model::{NewPost, Post, PostChanges, PostDocument};

pub struct MongoPostStore {
    collection: Collection<PostDocument>,
}

impl MongoPostStore {
    pub fn new(client: &Client, database_name: &str) -> Self {
        let collection = client
            .database(database_name)
            .collection::<PostDocument>("posts");
        MongoPostStore { collection }
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let document = PostDocument {
            id: ObjectId::new(),
            title: post.title,
            description: post.description,
            image_url: post.image_url,
        };

        self.collection.insert_one(&document).await?;

        Ok(document.into())
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<PostDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Post::from).collect())
    }

    async fn find_and_update(
        &self,
        id: &str,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let mut set = doc! {
            "title": changes.title,
            "description": changes.description,
        };
        if let Some(url) = changes.image_url {
            set.insert("imageUrl", url);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
            .with_options(options)
            .await?;

        Ok(updated.map(Post::from))
    }

    async fn find_and_delete(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await?;

        Ok(deleted.map(Post::from))
    }
}
