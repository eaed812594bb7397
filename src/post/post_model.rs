use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::uploader::image_host::ImageUpload;

/// A blog post as exposed over the API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Shape of a post inside the `posts` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl From<PostDocument> for Post {
    fn from(document: PostDocument) -> Self {
        Post {
            id: document.id.to_hex(),
            title: document.title,
            description: document.description,
            image_url: document.image_url,
        }
    }
}

/// Fields of a post about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

/// In-place changes applied by an update.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Title, description and image collected from the creation form.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UpdatePostRequest {
    /// An empty `imageUrl` means "keep the current image".
    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url: self
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        }
    }
}
