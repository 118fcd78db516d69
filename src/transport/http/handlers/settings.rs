use crate::domain::model::{Settings, SettingsUpdate};
use crate::transport::http::types::{
    ApiError, AppState, MessageResponse, LOAD_SETTINGS, UPDATE_SETTINGS,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "All settings as one flat key/value object", body = Object),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_settings_handler(
    State(state): State<AppState>,
) -> Result<Json<Settings>, ApiError> {
    let settings = state
        .db_service
        .get_settings()
        .await
        .map_err(ApiError::with(LOAD_SETTINGS))?;
    Ok(Json(settings))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = SettingsUpdate,
    responses(
        (status = 200, description = "Present symbols upserted", body = MessageResponse),
        (status = 500, description = "Store failure or unreadable body", body = ErrorResponse)
    )
)]
pub async fn update_settings_handler(
    State(state): State<AppState>,
    request: Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(update) = request.map_err(ApiError::with(UPDATE_SETTINGS))?;
    let written = state
        .db_service
        .update_settings(&update)
        .await
        .map_err(ApiError::with(UPDATE_SETTINGS))?;
    debug!(written, "Settings written");
    Ok(MessageResponse::new("Settings updated"))
}
