use async_trait::async_trait;
use thiserror::Error;

/// An image received from a form, ready to be sent to the image host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

impl ImageUpload {
    pub fn new(file_name: String, data: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            file_name,
            data,
            content_type,
        }
    }

    /// Builds an upload whose content type is guessed from the file extension.
    pub fn from_bytes(file_name: &str, data: Vec<u8>) -> Self {
        let content_type = Self::content_type_for(file_name).map(str::to_string);
        Self::new(file_name.to_string(), data, content_type)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn extension(&self) -> Option<String> {
        extension_of(&self.file_name)
    }

    pub fn content_type_for(file_name: &str) -> Option<&'static str> {
        match extension_of(file_name)?.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "bmp" => Some("image/bmp"),
            _ => None,
        }
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.to_lowercase())
}

/// Where an uploaded image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedImage {
    pub public_id: String,
    pub secure_url: String,
}

#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("image host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image host rejected the request: {0}")]
    Rejected(String),

    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

/// Object storage that turns an image into a durable URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
    ) -> Result<HostedImage, ImageHostError>;

    async fn remove(&self, public_id: &str) -> Result<(), ImageHostError>;

    /// Whether `url` points at an image served by this host.
    fn is_hosted_url(&self, url: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(ImageUpload::content_type_for("cat.JPG"), Some("image/jpeg"));
        assert_eq!(ImageUpload::content_type_for("cat.png"), Some("image/png"));
        assert_eq!(ImageUpload::content_type_for("notes.txt"), None);
        assert_eq!(ImageUpload::content_type_for("no_extension"), None);
    }

    #[test]
    fn from_bytes_fills_in_content_type() {
        let image = ImageUpload::from_bytes("photo.jpeg", vec![1, 2, 3]);
        assert_eq!(image.size(), 3);
        assert_eq!(image.extension().as_deref(), Some("jpeg"));
        assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));
    }
}
