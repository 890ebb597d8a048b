//! Thumbnail transform and on-disk storage for project/client images.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use actix_web::web;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;
use uuid::Uuid;

use crate::upload::UploadedImage;

pub const THUMBNAIL_WIDTH: u32 = 450;
pub const THUMBNAIL_HEIGHT: u32 = 350;

/// URL prefix under which stored images are served and persisted.
pub const PUBLIC_PREFIX: &str = "/uploads";

const MAX_STEM_CHARS: usize = 64;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Uploaded file is not a valid image")]
    Decode(#[source] image::ImageError),

    #[error("Image processing failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Image processing was interrupted: {0}")]
    Blocking(String),

    #[error("Failed to access image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image path is not managed by this store: {0}")]
    Unmanaged(String),
}

/// Scale `bytes` to cover a 450x350 box, crop the overflow around the centre,
/// and re-encode as `format`.
pub fn thumbnail(bytes: &[u8], format: ImageFormat) -> Result<Vec<u8>, ImageError> {
    let source = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let mut resized = source.resize_to_fill(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, FilterType::Lanczos3);

    // JPEG has no alpha channel.
    if format == ImageFormat::Jpeg {
        resized = DynamicImage::ImageRgb8(resized.to_rgb8());
    }

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, format)
        .map_err(ImageError::Encode)?;
    Ok(out.into_inner())
}

/// Output encoding and extension for an uploaded file name. Formats we cannot
/// encode (gif, bmp, unknown) are stored as PNG.
fn output_format(file_name: &str) -> (ImageFormat, &'static str) {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") => (ImageFormat::Jpeg, "jpg"),
        Some("jpeg") => (ImageFormat::Jpeg, "jpeg"),
        Some("webp") => (ImageFormat::WebP, "webp"),
        _ => (ImageFormat::Png, "png"),
    }
}

/// Reduce an uploaded file name to a filesystem-safe stem.
pub fn sanitize_stem(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .take(MAX_STEM_CHARS)
        .collect();
    let cleaned = cleaned.trim_matches('-');

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

fn unique_suffix() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{millis}-{}", &nonce[..8])
}

/// Writes thumbnails under a root directory and removes them again.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Transform and store an upload, returning its public path
    /// (`/uploads/{stem}-{suffix}.{ext}`).
    pub async fn store(&self, upload: UploadedImage) -> Result<String, ImageError> {
        let (format, ext) = output_format(&upload.file_name);
        let file_name = format!("{}-{}.{ext}", sanitize_stem(&upload.file_name), unique_suffix());

        let bytes = web::block(move || thumbnail(&upload.bytes, format))
            .await
            .map_err(|e| ImageError::Blocking(e.to_string()))??;

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&file_name), bytes).await?;

        tracing::debug!("Stored image {file_name}");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    /// Delete a previously stored image. Callers treat this as best-effort and
    /// decide themselves what to do with the result.
    pub async fn remove(&self, public_path: &str) -> Result<(), ImageError> {
        let path = self.resolve(public_path)?;
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    /// Map a public path back into the store, refusing anything that would
    /// escape the root.
    pub fn resolve(&self, public_path: &str) -> Result<PathBuf, ImageError> {
        let name = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| {
                !name.is_empty() && !name.contains(['/', '\\']) && *name != "." && *name != ".."
            })
            .ok_or_else(|| ImageError::Unmanaged(public_path.to_string()))?;

        Ok(self.root.join(name))
    }
}
