//! Image storage for product photos uploaded via multipart requests.

use actix_multipart::Multipart;
use futures::StreamExt;
use log::warn;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::CONFIG;
use crate::constants::{
    ERR_FAILED_PROCESS_UPLOAD, ERR_FAILED_READ_FILE, ERR_FAILED_SAVE_FILE, ERR_FILE_TOO_LARGE,
    ERR_NO_IMAGE_FILES,
};
use crate::errors::ApiError;
use crate::validators::{
    get_extension_from_content_type, validate_image_content_type, MAX_IMAGE_SIZE,
};

/// Stores uploaded images on the local filesystem.
pub struct ImageStorage {
    destination: PathBuf,
}

impl ImageStorage {
    /// Create storage rooted at the configured destination directory.
    pub fn new() -> Self {
        Self {
            destination: PathBuf::from(&CONFIG.product.image.destination),
        }
    }

    #[allow(dead_code)]
    pub fn with_destination(destination: PathBuf) -> Self {
        Self { destination }
    }

    /// Save every `images` field of a multipart payload.
    ///
    /// Each file is validated (content type, size) and written under a
    /// generated UUID name. Returns the stored filenames. On any failure the
    /// already-written files of this batch are removed.
    pub async fn save_images(&self, payload: &mut Multipart) -> Result<Vec<String>, ApiError> {
        let mut saved: Vec<String> = Vec::new();

        while let Some(item) = payload.next().await {
            let mut field = match item {
                Ok(field) => field,
                Err(e) => {
                    warn!("Failed to process multipart field: {}", e);
                    self.remove_all(&saved);
                    return Err(ApiError::BadRequest(ERR_FAILED_PROCESS_UPLOAD.to_string()));
                }
            };

            let field_name = field
                .content_disposition()
                .and_then(|cd| cd.get_name())
                .unwrap_or("");
            if field_name != "images" {
                continue;
            }

            let content_type = field.content_type().map(|ct| ct.to_string());
            if let Err(e) = validate_image_content_type(content_type.as_deref()) {
                self.remove_all(&saved);
                return Err(e);
            }

            let extension = get_extension_from_content_type(content_type.as_deref());
            let filename = format!("{}.{}", Uuid::new_v4(), extension);

            if let Err(e) = self.write_field(&mut field, &filename).await {
                self.remove_all(&saved);
                return Err(e);
            }
            saved.push(filename);
        }

        if saved.is_empty() {
            return Err(ApiError::BadRequest(ERR_NO_IMAGE_FILES.to_string()));
        }
        Ok(saved)
    }

    async fn write_field(
        &self,
        field: &mut actix_multipart::Field,
        filename: &str,
    ) -> Result<(), ApiError> {
        if !self.destination.exists() {
            std::fs::create_dir_all(&self.destination).map_err(|e| {
                warn!("Failed to create upload directory: {}", e);
                ApiError::InternalServerError(ERR_FAILED_SAVE_FILE.to_string())
            })?;
        }

        let filepath = self.destination.join(filename);
        let mut file = std::fs::File::create(&filepath).map_err(|e| {
            warn!("Failed to create file: {}", e);
            ApiError::InternalServerError(ERR_FAILED_SAVE_FILE.to_string())
        })?;

        let mut total_size: usize = 0;
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                warn!("Failed to read chunk: {}", e);
                let _ = std::fs::remove_file(&filepath);
                ApiError::BadRequest(ERR_FAILED_READ_FILE.to_string())
            })?;

            total_size += data.len();
            if total_size > MAX_IMAGE_SIZE {
                let _ = std::fs::remove_file(&filepath);
                return Err(ApiError::BadRequest(ERR_FILE_TOO_LARGE.to_string()));
            }

            file.write_all(&data).map_err(|e| {
                warn!("Failed to write file: {}", e);
                let _ = std::fs::remove_file(&filepath);
                ApiError::InternalServerError(ERR_FAILED_SAVE_FILE.to_string())
            })?;
        }

        Ok(())
    }

    /// Remove a stored image. Missing files are ignored.
    pub fn remove(&self, filename: &str) {
        let filepath = self.destination.join(filename);
        if filepath.exists() {
            let _ = std::fs::remove_file(&filepath);
        }
    }

    fn remove_all(&self, filenames: &[String]) {
        for filename in filenames {
            self.remove(filename);
        }
    }
}

impl Default for ImageStorage {
    fn default() -> Self {
        Self::new()
    }
}
