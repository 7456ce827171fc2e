use crate::{
    extract,
    types::{AppError, Result, UploadResponse},
    AppState,
};
use axum::{extract::Multipart, extract::State, Json};

/// Replace the session's document with an uploaded file.
///
/// Accepts one multipart `file` field, extracts its text by extension
/// (`.pdf`, `.docx`, `.txt`), and rebuilds the retrieval index. A failure at
/// any stage leaves the previously loaded document available for chat.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::InvalidInput("no file uploaded".to_string()))?
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("failed to read upload: {}", e)))?;
            file = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::InvalidInput("no file uploaded".to_string()))?;

    // PDF/DOCX parsing is CPU-bound; keep it off the async workers.
    let text = tokio::task::spawn_blocking(move || extract::extract_text(&filename, &bytes))
        .await
        .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))??;

    let stats = state.engine.ingest(&text).await?;

    Ok(Json(UploadResponse {
        passage_count: stats.passage_count,
        char_count: stats.char_count,
    }))
}
