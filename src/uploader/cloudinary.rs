use std::collections::BTreeMap;
use std::env;

use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::uploader::image_host::{HostedImage, ImageHost, ImageHostError, ImageUpload};
use crate::utils::error::ConfigError;

/// Cloudinary configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upload_preset: Option<String>,
}

impl CloudinaryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloud_name: env::var("CLOUDINARY_CLOUD_NAME")
                .map_err(|_| ConfigError::Missing("CLOUDINARY_CLOUD_NAME"))?,
            api_key: env::var("CLOUDINARY_API_KEY")
                .map_err(|_| ConfigError::Missing("CLOUDINARY_API_KEY"))?,
            api_secret: env::var("CLOUDINARY_API_SECRET")
                .map_err(|_| ConfigError::Missing("CLOUDINARY_API_SECRET"))?,
            upload_preset: env::var("CLOUDINARY_UPLOAD_PRESET").ok(),
        })
    }

    fn api_url(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{}",
            self.cloud_name, action
        )
    }

    /// Signs the request parameters. Cloudinary expects them sorted by name,
    /// joined as a query string, with the secret appended.
    pub fn generate_signature(&self, params: &BTreeMap<&str, String>) -> String {
        let to_sign = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        let mut hasher = Sha1::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn signed_form(&self, mut params: BTreeMap<&str, String>) -> Form {
        params.insert("timestamp", chrono::Utc::now().timestamp().to_string());
        let signature = self.generate_signature(&params);

        let mut form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key.to_string(), value);
        }
        form
    }
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryDestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorResponse {
    error: CloudinaryError,
}

/// `ImageHost` backed by the Cloudinary upload API.
pub struct CloudinaryImageHost {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn rejection(response: reqwest::Response) -> ImageHostError {
        let status = response.status();
        match response.json::<CloudinaryErrorResponse>().await {
            Ok(body) => ImageHostError::Rejected(body.error.message),
            Err(_) => ImageHostError::Rejected(format!("unexpected status {}", status)),
        }
    }
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
    ) -> Result<HostedImage, ImageHostError> {
        let mut params = BTreeMap::new();
        params.insert("folder", folder.to_string());
        if let Some(ref preset) = self.config.upload_preset {
            params.insert("upload_preset", preset.clone());
        }

        let mime = image
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_part = Part::bytes(image.data)
            .file_name(image.file_name)
            .mime_str(&mime)
            .map_err(|e| ImageHostError::InvalidUpload(e.to_string()))?;

        let form = self.config.signed_form(params).part("file", file_part);

        let response = self
            .client
            .post(self.config.api_url("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let uploaded = response.json::<CloudinaryUploadResponse>().await?;
        debug!("Uploaded image {} to Cloudinary", uploaded.public_id);

        Ok(HostedImage {
            public_id: uploaded.public_id,
            secure_url: uploaded.secure_url,
        })
    }

    async fn remove(&self, public_id: &str) -> Result<(), ImageHostError> {
        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());
        let form = self.config.signed_form(params);

        let response = self
            .client
            .post(self.config.api_url("destroy"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let destroyed = response.json::<CloudinaryDestroyResponse>().await?;
        if destroyed.result != "ok" {
            return Err(ImageHostError::Rejected(format!(
                "destroy of {} returned '{}'",
                public_id, destroyed.result
            )));
        }
        Ok(())
    }

    fn is_hosted_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        parsed.scheme() == "https"
            && parsed.host_str() == Some("res.cloudinary.com")
            && parsed
                .path()
                .starts_with(&format!("/{}/", self.config.cloud_name))
    }
}
