//! Axum route handler for the upload view.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::ingest::pipeline::{BatchReport, IngestError, UploadedFile};
use crate::state::AppState;

/// POST /api/v1/uploads
///
/// Multipart form; every part that carries a file name is treated as an
/// uploaded file. Files are processed in the order they were sent.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchReport>, AppError> {
    if state.ingest.is_processing() {
        return Err(IngestError::Busy.into());
    }

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        files.push(UploadedFile {
            name,
            content_type,
            bytes,
        });
    }

    if files.is_empty() {
        return Err(AppError::Validation("no files in upload".to_string()));
    }

    let report = state.ingest.run_batch(files).await?;
    Ok(Json(report))
}
