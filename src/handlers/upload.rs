// Image upload: one multipart file per request, written under the public
// upload directory with a generated name.
use axum::{
    extract::{Multipart, State},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// POST /api/admin/upload - guarded multipart image upload.
///
/// Oversized or wrong-type files are rejected before anything touches disk.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .ok_or_else(|| ApiError::bad_request("Missing file name"))?
            .to_string();
        let extension = validate_extension(&file_name)?;

        // Both halves must check out: whitelisted extension and a declared
        // image content type
        match field.content_type() {
            Some(content_type) if content_type.starts_with("image/") => {}
            _ => return Err(ApiError::bad_request("Unsupported file type")),
        }

        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("File too large (max 5MB)"))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::bad_request("File too large (max 5MB)"));
        }
        if data.is_empty() {
            return Err(ApiError::bad_request("Empty file"));
        }

        let generated = format!("{}.{}", Uuid::new_v4(), extension);
        let target = state.config.upload_dir.join(&generated);
        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| {
                tracing::error!("failed to create upload dir: {}", e);
                ApiError::internal_server_error("Failed to store upload")
            })?;
        tokio::fs::write(&target, &data).await.map_err(|e| {
            tracing::error!("failed to write upload {}: {}", target.display(), e);
            ApiError::internal_server_error("Failed to store upload")
        })?;

        tracing::info!("stored upload {} ({} bytes)", generated, data.len());
        return Ok(Json(json!({ "url": format!("/uploads/{}", generated) })));
    }

    Err(ApiError::bad_request("Missing file field"))
}

fn validate_extension(file_name: &str) -> Result<String, ApiError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| ApiError::bad_request("Unsupported file type"))?;
    Ok(extension)
}
