//! Multipart parsing for the admin project/client forms.
//!
//! A form carries text fields plus at most one file, under the field name
//! `image`. The file is buffered in memory (bounded by
//! [`UploadLimits::max_bytes`]) and handed to the image store untouched. Text
//! fields share a [`MAX_TEXT_BYTES`] budget.

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::error::AppError;
use crate::validation::FormFields;

pub const IMAGE_FIELD: &str = "image";

pub const UNEXPECTED_FIELD: &str = "Unexpected field in file upload.";
pub const NOT_AN_IMAGE: &str = "Only image files are allowed (jpeg, jpg, png, gif, webp)";
pub const TEXT_TOO_LONG: &str = "Upload error: Field value too long";

/// Combined budget for all text fields of one form.
pub const MAX_TEXT_BYTES: usize = 1024 * 1024;

/// Raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadLimits {
    pub fn too_large_message(&self) -> String {
        let mb = self.max_bytes as f64 / (1024.0 * 1024.0);
        format!("File size too large. Maximum size is {}MB.", format_mb(mb))
    }
}

fn format_mb(mb: f64) -> String {
    if mb.fract() == 0.0 {
        format!("{mb:.0}")
    } else {
        format!("{mb:.1}")
    }
}

/// Parsed multipart form.
#[derive(Debug, Default)]
pub struct ImageForm {
    pub fields: FormFields,
    pub image: Option<UploadedImage>,
}

/// Drain a multipart payload into text fields and the optional `image` file.
pub async fn read_image_form(
    mut payload: Multipart,
    limits: &UploadLimits,
) -> Result<ImageForm, AppError> {
    let mut form = ImageForm::default();
    let mut text_budget = MAX_TEXT_BYTES;

    while let Some(field) = payload.try_next().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match file_name {
            Some(file_name) => {
                if name != IMAGE_FIELD || form.image.is_some() {
                    return Err(AppError::UploadRejected(UNEXPECTED_FIELD.to_string()));
                }
                let is_image = field
                    .content_type()
                    .is_some_and(|mime| mime.type_().as_str() == "image");
                if !is_image {
                    return Err(AppError::UploadRejected(NOT_AN_IMAGE.to_string()));
                }

                let bytes = read_bounded(field, limits.max_bytes, || {
                    AppError::UploadRejected(limits.too_large_message())
                })
                .await?;
                form.image = Some(UploadedImage { file_name, bytes });
            }
            None => {
                let bytes = read_bounded(field, text_budget, || {
                    AppError::UploadRejected(TEXT_TOO_LONG.to_string())
                })
                .await?;
                text_budget -= bytes.len();
                let value = String::from_utf8(bytes).map_err(|_| {
                    AppError::UploadRejected(format!("Upload error: field {name} is not valid UTF-8"))
                })?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

async fn read_bounded(
    mut field: Field,
    max: usize,
    too_large: impl Fn() -> AppError,
) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(upload_error)? {
        if buf.len() + chunk.len() > max {
            return Err(too_large());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn upload_error(err: actix_multipart::MultipartError) -> AppError {
    AppError::UploadRejected(format!("Upload error: {err}"))
}
