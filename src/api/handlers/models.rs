use crate::{
    types::{ModelsResponse, Result},
    AppState,
};
use axum::{extract::State, Json};

/// List the model identifiers the completion service can run.
pub async fn list_models(State(state): State<AppState>) -> Result<Json<ModelsResponse>> {
    let models = state.engine.list_models().await?;
    Ok(Json(ModelsResponse { models }))
}
