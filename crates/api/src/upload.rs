//! Multipart image uploads.
//!
//! Any part with a file name is an image; every other part is a text field.
//! An image's content type is sniffed from its bytes, falling back to the
//! declared part content type when the header is not recognised. Only JPEG,
//! PNG and WebP are accepted.

use std::collections::HashMap;

use axum::extract::Multipart;
use showroom_core::error::CoreError;
use showroom_core::storage::{
    content_type_for_extension, extension_for_content_type, sniff_content_type,
};

use crate::error::{AppError, AppResult};

/// One accepted image part.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: &'static str,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// A parsed multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub images: Vec<UploadedImage>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Trimmed value of a text field; empty values count as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// The form's only image. Zero or several images is a bad request.
    pub fn into_single_image(mut self) -> AppResult<UploadedImage> {
        match self.images.len() {
            1 => Ok(self.images.remove(0)),
            0 => Err(AppError::BadRequest("No image file in upload".into())),
            n => Err(AppError::BadRequest(format!(
                "Expected exactly one image file, got {n}"
            ))),
        }
    }
}

/// Read every part of `multipart`.
pub async fn read_upload_form(multipart: &mut Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let declared = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.images
                    .push(accept_image(file_name, declared.as_deref(), bytes.to_vec())?);
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }
    }

    Ok(form)
}

fn accept_image(
    file_name: String,
    declared: Option<&str>,
    bytes: Vec<u8>,
) -> AppResult<UploadedImage> {
    if bytes.is_empty() {
        return Err(AppError::BadRequest(format!("File '{file_name}' is empty")));
    }
    let content_type = match sniff_content_type(&bytes) {
        Some(sniffed) => sniffed,
        None => {
            let declared = declared.unwrap_or("application/octet-stream");
            let ext = extension_for_content_type(declared)?;
            content_type_for_extension(ext).ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "Unsupported image content type '{declared}'"
                )))
            })?
        }
    };
    let extension = extension_for_content_type(content_type)?;
    Ok(UploadedImage {
        file_name,
        content_type,
        extension,
        bytes,
    })
}
