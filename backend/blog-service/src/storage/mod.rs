/// Media persistence for uploaded post images
///
/// Uploads are accepted only when their bytes sniff as a known image
/// format; the declared content type alone is never trusted. Files land
/// under `<media_root>/posts/` with a fresh UUID name and the post row
/// stores the relative path.
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use image::ImageFormat;
use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory layout under the media root
    pub async fn ensure_layout(&self) -> Result<()> {
        tokio::fs::create_dir_all(self.root.join("posts")).await?;
        Ok(())
    }

    /// Resolve a stored relative path to its on-disk location
    pub fn absolute_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Persist an uploaded image and return its relative path
    pub async fn save_post_image(&self, upload: &TempFile) -> Result<String> {
        if let Some(content_type) = &upload.content_type {
            if content_type.type_() != mime::IMAGE {
                return Err(AppError::ValidationError(format!(
                    "Unsupported upload content type '{}'",
                    content_type
                )));
            }
        }

        let bytes = tokio::fs::read(upload.file.path()).await?;
        if bytes.is_empty() {
            return Err(AppError::ValidationError(
                "Uploaded image is empty".to_string(),
            ));
        }

        let format = image::guess_format(&bytes).map_err(|_| {
            AppError::ValidationError("Uploaded file is not a recognized image".to_string())
        })?;
        let extension = match format {
            ImageFormat::Gif => "gif",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::WebP => "webp",
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unsupported image format {:?}",
                    other
                )))
            }
        };

        let relative = format!("posts/{}.{}", Uuid::new_v4(), extension);
        let destination = self.root.join(&relative);
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&destination, &bytes).await?;

        tracing::debug!(path = %relative, size = bytes.len(), "stored post image");

        Ok(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // 2x1 transparent GIF, the smallest upload worth accepting.
    const SMALL_GIF: &[u8] = &[
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
        0x00, 0xFF, 0xFF, 0xFF, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
        0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x0C, 0x0A, 0x00, 0x3B,
    ];

    fn temp_upload(bytes: &[u8], file_name: &str) -> TempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(bytes).expect("write upload bytes");
        file.flush().expect("flush upload bytes");
        TempFile {
            file,
            content_type: Some(mime::IMAGE_GIF),
            file_name: Some(file_name.to_string()),
            size: bytes.len(),
        }
    }

    #[tokio::test]
    async fn stores_gif_under_posts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = MediaStorage::new(dir.path());

        let upload = temp_upload(SMALL_GIF, "small.gif");
        let relative = storage.save_post_image(&upload).await.expect("save image");

        assert!(relative.starts_with("posts/"));
        assert!(relative.ends_with(".gif"));
        let stored = std::fs::read(storage.absolute_path(&relative)).expect("read stored");
        assert_eq!(stored, SMALL_GIF);
    }

    #[tokio::test]
    async fn rejects_bytes_that_are_not_an_image() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = MediaStorage::new(dir.path());

        let upload = temp_upload(b"definitely not pixels", "junk.gif");
        let result = storage.save_post_image(&upload).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
