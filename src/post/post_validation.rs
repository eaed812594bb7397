//! Validation rules for post input, shared by the API and the client forms.
//!
//! The API only checks that every field is present; the forms add the
//! length, size and format limits before anything is sent.

use serde::Serialize;

use crate::post::post_model::PostForm;
use crate::uploader::image_host::ImageUpload;
use crate::utils::error::CustomError;

pub const DESCRIPTION_MAX_CHARS: usize = 300;
pub const IMAGE_MAX_BYTES: usize = 5_000_000;
pub const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_result(self) -> Result<(), CustomError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CustomError::ValidationError(self.summary()))
        }
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

/// Limits applied on top of the presence checks. `None` disables a limit.
#[derive(Debug, Clone)]
pub struct PostRules {
    pub max_description_chars: Option<usize>,
    pub max_image_bytes: Option<usize>,
    pub allowed_image_types: Option<&'static [&'static str]>,
}

impl PostRules {
    /// Presence checks only.
    pub fn api() -> Self {
        Self {
            max_description_chars: None,
            max_image_bytes: None,
            allowed_image_types: None,
        }
    }

    pub fn form() -> Self {
        Self {
            max_description_chars: Some(DESCRIPTION_MAX_CHARS),
            max_image_bytes: Some(IMAGE_MAX_BYTES),
            allowed_image_types: Some(IMAGE_CONTENT_TYPES),
        }
    }

    pub fn validate_form(&self, form: &PostForm) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.check_text(&mut report, &form.title, &form.description);
        self.check_image(&mut report, form.image.as_ref());
        report
    }

    pub fn validate_edit(&self, title: &str, description: &str) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.check_text(&mut report, title, description);
        report
    }

    fn check_text(&self, report: &mut ValidationReport, title: &str, description: &str) {
        if title.trim().is_empty() {
            report.push("title", "Title is required");
        }

        if description.trim().is_empty() {
            report.push("description", "Description is required");
        } else if let Some(max) = self.max_description_chars {
            if description.chars().count() > max {
                report.push(
                    "description",
                    format!("Description can't exceed {} characters", max),
                );
            }
        }
    }

    fn check_image(&self, report: &mut ValidationReport, image: Option<&ImageUpload>) {
        let Some(image) = image.filter(|image| !image.data.is_empty()) else {
            report.push("image", "Image is required");
            return;
        };

        if let Some(max) = self.max_image_bytes {
            if image.size() > max {
                report.push("image", "File too large. Max size is 5MB.");
                return;
            }
        }

        if let Some(allowed) = self.allowed_image_types {
            let supported = image
                .content_type
                .as_deref()
                .is_some_and(|content_type| allowed.contains(&content_type));
            if !supported {
                report.push("image", "Unsupported file format");
            }
        }
    }
}
