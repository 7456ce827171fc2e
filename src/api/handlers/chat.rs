use crate::{
    chat::CompletionResult,
    types::{AppError, ChatRequest, ChatResponse, Fragment, Result},
    AppState,
};
use axum::{
    body::Body,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;

/// Answer one chat turn, grounded in the uploaded document or general,
/// as a single JSON body or a streamed NDJSON sequence of fragments.
///
/// Streamed bodies carry `{"response": …}` lines; a mid-stream failure is
/// delivered in-band as one final `{"error": …}` line, so fragments already
/// sent are not discarded. When the client disconnects, axum drops the body
/// stream and the engine stops pulling from the completion service.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response> {
    match state.engine.respond(&request).await? {
        CompletionResult::Full(text) => Ok(Json(ChatResponse { response: text }).into_response()),
        CompletionResult::Stream(fragments) => {
            let body = Body::from_stream(fragments.map(|fragment| {
                let mut line = encode_fragment(&fragment);
                line.push('\n');
                Ok::<String, std::convert::Infallible>(line)
            }));

            Response::builder()
                .header(axum::http::header::CONTENT_TYPE, "application/x-ndjson")
                .body(body)
                .map_err(|e| AppError::Internal(e.to_string()))
        }
    }
}

fn encode_fragment(fragment: &Fragment) -> String {
    serde_json::to_string(fragment)
        .unwrap_or_else(|e| format!(r#"{{"error":"fragment serialization failed: {}"}}"#, e))
}
