use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::post::post_model::PostForm;
use crate::uploader::image_host::ImageUpload;
use crate::utils::error::CustomError;

/// Collects `title`, `description` and the `image` file from a multipart
/// body. Unknown fields are drained and ignored.
pub async fn read_post_form(mut payload: Multipart) -> Result<PostForm, CustomError> {
    let mut form = PostForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            CustomError::ValidationError(format!("Error reading multipart field: {}", e))
        })?;

        let Some(content_disposition) = field.content_disposition() else {
            continue;
        };
        let field_name = content_disposition.get_name().unwrap_or("").to_string();
        let file_name = content_disposition.get_filename().map(|f| f.to_string());
        let content_type = field.content_type().map(|ct| ct.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                CustomError::ValidationError(format!("Error reading field '{}': {}", field_name, e))
            })?;
            data.extend_from_slice(&chunk);
        }

        match field_name.as_str() {
            "title" => form.title = text_value(&field_name, data)?,
            "description" => form.description = text_value(&field_name, data)?,
            "image" if !data.is_empty() => {
                let file_name = file_name.unwrap_or_else(|| "image".to_string());
                form.image = Some(ImageUpload::new(file_name, data, content_type));
            }
            _ => {}
        }
    }

    Ok(form)
}

fn text_value(field_name: &str, data: Vec<u8>) -> Result<String, CustomError> {
    String::from_utf8(data).map_err(|_| {
        CustomError::ValidationError(format!("Field '{}' must be valid UTF-8 text", field_name))
    })
}
