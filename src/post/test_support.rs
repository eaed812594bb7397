use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::database::memory_store::MemoryPostStore;
use crate::database::store::{PostStore, StoreError};
use crate::post::post_model::{NewPost, Post, PostChanges};
use crate::post::post_service::PostService;
use crate::uploader::image_host::{HostedImage, ImageHost, ImageHostError, ImageUpload};

pub(crate) const STUB_URL_PREFIX: &str = "https://images.test/";
pub(crate) const BOUNDARY: &str = "----imageblogboundary";

/// Image host that keeps uploads in memory and hands out predictable URLs.
#[derive(Default)]
pub(crate) struct StubImageHost {
    pub uploads: Mutex<Vec<HostedImage>>,
    pub removed: Mutex<Vec<String>>,
    pub fail_uploads: bool,
}

impl StubImageHost {
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn removed_ids(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
    ) -> Result<HostedImage, ImageHostError> {
        if self.fail_uploads {
            return Err(ImageHostError::Rejected("stub upload failure".into()));
        }

        let mut uploads = self.uploads.lock().unwrap();
        let public_id = format!("{}/img-{}", folder, uploads.len() + 1);
        let hosted = HostedImage {
            secure_url: format!("{}{}-{}", STUB_URL_PREFIX, public_id, image.file_name),
            public_id,
        };
        uploads.push(hosted.clone());
        Ok(hosted)
    }

    async fn remove(&self, public_id: &str) -> Result<(), ImageHostError> {
        self.removed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }

    fn is_hosted_url(&self, url: &str) -> bool {
        url.starts_with(STUB_URL_PREFIX)
    }
}

fn connection_refused() -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    StoreError::Database(mongodb::error::Error::from(io))
}

/// Store whose every call fails, standing in for an unreachable database.
pub(crate) struct UnavailableStore;

#[async_trait]
impl PostStore for UnavailableStore {
    async fn insert(&self, _post: NewPost) -> Result<Post, StoreError> {
        Err(connection_refused())
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Err(connection_refused())
    }

    async fn find_and_update(
        &self,
        _id: &str,
        _changes: PostChanges,
    ) -> Result<Option<Post>, StoreError> {
        Err(connection_refused())
    }

    async fn find_and_delete(&self, _id: &str) -> Result<Option<Post>, StoreError> {
        Err(connection_refused())
    }
}

pub(crate) struct Harness {
    pub store: Arc<MemoryPostStore>,
    pub host: Arc<StubImageHost>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryPostStore::new()),
            host: Arc::new(StubImageHost::default()),
        }
    }

    pub fn service(&self) -> PostService {
        PostService::new(self.store.clone(), self.host.clone(), "blog-posts")
    }
}

pub(crate) fn png(file_name: &str) -> ImageUpload {
    ImageUpload::from_bytes(file_name, vec![0x89, b'P', b'N', b'G', 1, 2, 3])
}

/// Encodes text fields and an optional `(name, file_name, bytes)` file part.
pub(crate) fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub(crate) fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
