use tracing::{error, info};
use uuid::Uuid;

use crate::common::validation::collapse_whitespace;
use crate::common::{ApiError, ApiResult};
use crate::kernel::ServerDeps;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// A file pulled out of the multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub fn validate_upload(file: Option<&UploadedFile>) -> ApiResult<&UploadedFile> {
    let file = file.ok_or_else(|| ApiError::InvalidInput("No file provided".to_string()))?;
    if !file.content_type.starts_with("image/") {
        return Err(ApiError::InvalidInput(
            "Only image uploads allowed".to_string(),
        ));
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::PayloadTooLarge("Max file size is 5MB".to_string()));
    }
    Ok(file)
}

/// `uploads/{random}-{filename}` with whitespace runs replaced by `_`
pub fn object_key(filename: &str) -> String {
    format!(
        "uploads/{}-{}",
        Uuid::new_v4().simple(),
        collapse_whitespace(filename)
    )
}

pub async fn upload_image(file: Option<UploadedFile>, deps: &ServerDeps) -> ApiResult<String> {
    let file = validate_upload(file.as_ref())?;

    let storage = deps.blob_storage.as_ref().ok_or_else(|| {
        ApiError::Misconfigured("Server misconfigured: missing BLOB_READ_WRITE_TOKEN".to_string())
    })?;

    let key = object_key(&file.filename);
    match storage
        .put(&key, file.bytes.clone(), &file.content_type)
        .await
    {
        Ok(url) => {
            info!(key = %key, size = file.bytes.len(), "Uploaded image");
            Ok(url)
        }
        Err(e) => {
            error!(error = %e, key = %key, "Blob upload failed");
            Err(ApiError::Internal("Upload failed".to_string()))
        }
    }
}
