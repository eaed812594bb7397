use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::post::post_model::{Post, PostForm, UpdatePostRequest};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status; `message` is its own text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Whether the server refused the input (4xx) rather than failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Rejected { status, .. } if (400..500).contains(status))
    }
}

/// The four post operations as seen from the client.
#[async_trait]
pub trait PostApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    async fn create_post(&self, form: PostForm) -> Result<Post, ApiError>;

    async fn update_post(&self, id: &str, request: &UpdatePostRequest) -> Result<Post, ApiError>;

    async fn delete_post(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct PostEnvelope {
    post: Post,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// `PostApi` over HTTP against the post service.
pub struct HttpPostApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPostApi {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn post_url(&self, id: &str) -> String {
        format!("{}/posts/{}", self.base_url, id)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        };
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PostApi for HttpPostApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.client.get(self.posts_url()).send().await?;
        let posts = Self::check(response).await?.json::<Vec<Post>>().await?;
        Ok(posts)
    }

    async fn create_post(&self, form: PostForm) -> Result<Post, ApiError> {
        let mut multipart = Form::new()
            .text("title", form.title)
            .text("description", form.description);

        if let Some(image) = form.image {
            let mime = image
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let part = Part::bytes(image.data)
                .file_name(image.file_name)
                .mime_str(&mime)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
            multipart = multipart.part("image", part);
        }

        let response = self
            .client
            .post(self.posts_url())
            .multipart(multipart)
            .send()
            .await?;
        let body = Self::check(response).await?.json::<PostEnvelope>().await?;
        Ok(body.post)
    }

    async fn update_post(&self, id: &str, request: &UpdatePostRequest) -> Result<Post, ApiError> {
        let response = self
            .client
            .put(self.post_url(id))
            .json(request)
            .send()
            .await?;
        let body = Self::check(response).await?.json::<PostEnvelope>().await?;
        Ok(body.post)
    }

    async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.post_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
