use std::path::Path;

use rand::Rng;

use crate::error::ApiError;

/// One image field pulled out of a multipart request, buffered in memory
/// until validation has passed.
#[derive(Debug)]
pub struct UploadedImage {
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Generate the stored filename for an upload:
/// `{sanitized stem}-{unix millis}-{random integer}{extension}`.
///
/// Collisions are avoided only by the timestamp and random component; there
/// is no existence check on disk.
pub fn generate_stored_name(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let salt: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    stored_name(original, millis, salt)
}

fn stored_name(original: &str, millis: i64, salt: u32) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "upload".to_string());
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| format!(".{}", sanitize(e)))
        .unwrap_or_default();

    format!("{}-{}-{}{}", stem, millis, salt, ext)
}

/// Client filenames are untrusted; keep only characters that are safe in a
/// flat uploads directory.
fn sanitize(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')).collect()
}

/// Write the uploaded bytes under the uploads directory and return the
/// generated stored filename.
pub async fn store_image(dir: &Path, image: &UploadedImage) -> Result<String, ApiError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        tracing::error!("Failed to create upload directory {}: {}", dir.display(), e);
        ApiError::internal_server_error("Failed to store uploaded file")
    })?;

    let stored = generate_stored_name(&image.original_name);
    let dest = dir.join(&stored);

    tokio::fs::write(&dest, &image.data).await.map_err(|e| {
        tracing::error!("Failed to write upload {}: {}", dest.display(), e);
        ApiError::internal_server_error("Failed to store uploaded file")
    })?;

    Ok(stored)
}
