//! Image uploads
//!
//! Avatars and equipment photos arrive as multipart forms with a single
//! `image` field. Files are written to `<UPLOADS_DIR>/<kind>/<id>.<ext>` and
//! served back under `/uploads`, so re-uploading replaces the previous file.

use std::path::Path;

use axum::extract::Multipart;
use uuid::Uuid;

use crate::backend::error::BackendError;

pub const IMAGE_FIELD: &str = "image";
pub const AVATARS: &str = "avatars";
pub const EQUIPMENT: &str = "equipment";
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Lowercased extension of `file_name` if it is an accepted image type
pub fn image_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Store the `image` field of `multipart` and return its public path
pub async fn save_image(
    mut multipart: Multipart,
    uploads_dir: &Path,
    kind: &str,
    id: Uuid,
) -> Result<String, BackendError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BackendError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let ext = field
            .file_name()
            .and_then(image_extension)
            .ok_or_else(|| BackendError::invalid_field(IMAGE_FIELD, "Only jpg, jpeg, png and webp images are allowed"))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| BackendError::bad_request(format!("Failed to read upload: {e}")))?;
        if data.is_empty() {
            return Err(BackendError::invalid_field(IMAGE_FIELD, "Image file is empty"));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(BackendError::invalid_field(IMAGE_FIELD, "Image must be 5 MB or smaller"));
        }

        let dir = uploads_dir.join(kind);
        tokio::fs::create_dir_all(&dir).await?;

        // Drop any earlier upload for the same id with another extension.
        for other in ALLOWED_EXTENSIONS.iter().filter(|e| **e != ext) {
            let stale = dir.join(format!("{id}.{other}"));
            if tokio::fs::try_exists(&stale).await.unwrap_or(false) {
                tokio::fs::remove_file(&stale).await?;
            }
        }

        let file_name = format!("{id}.{ext}");
        tokio::fs::write(dir.join(&file_name), &data).await?;
        tracing::info!("Stored {} upload {} ({} bytes)", kind, file_name, data.len());

        return Ok(format!("/uploads/{kind}/{file_name}"));
    }

    Err(BackendError::invalid_field(IMAGE_FIELD, "An image file is required"))
}

/// Delete every stored `<kind>/<id>.*` image; missing files are fine
pub async fn remove_images(uploads_dir: &Path, kind: &str, id: Uuid) -> std::io::Result<()> {
    let dir = uploads_dir.join(kind);
    for ext in ALLOWED_EXTENSIONS {
        match tokio::fs::remove_file(dir.join(format!("{id}.{ext}"))).await {
            Ok(()) => tracing::info!("Removed {} upload {}.{}", kind, id, ext),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Cleanup after the owning record is gone; a leftover file is only logged
pub async fn discard_images(uploads_dir: &Path, kind: &str, id: Uuid) {
    if let Err(e) = remove_images(uploads_dir, kind, id).await {
        tracing::warn!("Failed to remove {} uploads for {}: {}", kind, id, e);
    }
}
