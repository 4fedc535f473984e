use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::common::{ApiError, ApiResult};
use crate::domains::uploads::{upload_image, UploadedFile};
use crate::server::app::AppState;
use crate::server::middleware::RequireAdmin;

#[derive(Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub url: String,
}

pub async fn upload_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload without a multipart body");
        ApiError::InvalidInput("No file provided".to_string())
    })?;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        file = Some(UploadedFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let url = upload_image(file, &state.deps).await?;
    Ok(Json(UploadResponse { ok: true, url }))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Max file size is 5MB".to_string())
    } else {
        tracing::debug!(error = %err, "Malformed multipart body");
        ApiError::invalid_input()
    }
}
