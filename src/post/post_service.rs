use std::sync::Arc;

use log::{error, info, warn};

use crate::database::store::PostStore;
use crate::post::post_model::{NewPost, Post, PostForm, UpdatePostRequest};
use crate::post::post_validation::PostRules;
use crate::uploader::image_host::{HostedImage, ImageHost};
use crate::utils::error::CustomError;

pub struct PostService {
    store: Arc<dyn PostStore>,
    image_host: Arc<dyn ImageHost>,
    image_folder: String,
    rules: PostRules,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        image_host: Arc<dyn ImageHost>,
        image_folder: impl Into<String>,
    ) -> Self {
        PostService {
            store,
            image_host,
            image_folder: image_folder.into(),
            rules: PostRules::api(),
        }
    }

    /// Uploads the image, then persists the post. If persisting fails the
    /// uploaded image is removed again so it is not left without a post.
    pub async fn create_post(&self, form: PostForm) -> Result<Post, CustomError> {
        self.rules.validate_form(&form).into_result()?;

        let PostForm {
            title,
            description,
            image: Some(image),
        } = form
        else {
            return Err(CustomError::ValidationError("Image is required".into()));
        };

        let hosted = self
            .image_host
            .upload(image, &self.image_folder)
            .await
            .map_err(|e| {
                error!("Image upload failed: {}", e);
                CustomError::UpstreamError("Error uploading image".into())
            })?;

        let new_post = NewPost {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            image_url: hosted.secure_url.clone(),
        };

        match self.store.insert(new_post).await {
            Ok(post) => {
                info!("Created post {} with image {}", post.id, hosted.public_id);
                Ok(post)
            }
            Err(e) => {
                error!("Failed to save post: {}", e);
                self.discard_image(&hosted).await;
                Err(CustomError::UpstreamError("Error adding post".into()))
            }
        }
    }

    async fn discard_image(&self, hosted: &HostedImage) {
        match self.image_host.remove(&hosted.public_id).await {
            Ok(()) => info!("Removed image {} after failed save", hosted.public_id),
            Err(e) => warn!(
                "Image {} is orphaned on the image host: {}",
                hosted.public_id, e
            ),
        }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, CustomError> {
        self.store.find_all().await.map_err(|e| {
            error!("Failed to fetch posts: {}", e);
            CustomError::UpstreamError("Error fetching posts".into())
        })
    }

    pub async fn update_post(
        &self,
        id: &str,
        request: UpdatePostRequest,
    ) -> Result<Post, CustomError> {
        self.rules
            .validate_edit(&request.title, &request.description)
            .into_result()?;

        let changes = request.into_changes();
        if let Some(ref url) = changes.image_url {
            if !self.image_host.is_hosted_url(url) {
                return Err(CustomError::ValidationError(
                    "imageUrl must point to an image on the image host".into(),
                ));
            }
        }

        let updated = self
            .store
            .find_and_update(id, changes)
            .await
            .map_err(|e| {
                error!("Failed to update post {}: {}", id, e);
                CustomError::UpstreamError("Error updating post".into())
            })?
            .ok_or_else(|| CustomError::NotFoundError("Post not found".into()))?;

        info!("Updated post {}", updated.id);
        Ok(updated)
    }

    /// Deletes the post. Its image stays on the image host.
    pub async fn delete_post(&self, id: &str) -> Result<Post, CustomError> {
        let deleted = self
            .store
            .find_and_delete(id)
            .await
            .map_err(|e| {
                error!("Failed to delete post {}: {}", id, e);
                CustomError::UpstreamError("Error deleting post".into())
            })?
            .ok_or_else(|| CustomError::NotFoundError("Post not found".into()))?;

        info!(
            "Deleted post {}; image {} is kept on the image host",
            deleted.id, deleted.image_url
        );
        Ok(deleted)
    }
}
