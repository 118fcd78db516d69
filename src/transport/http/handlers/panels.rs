use crate::domain::model::{NewPanel, Panel};
use crate::transport::http::types::{
    ApiError, AppState, CreatedResponse, LOAD_PANELS, SAVE_PANEL,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{Map, Value as JsonValue};

#[utoipa::path(
    post,
    path = "/api/panels",
    request_body(content = Object, description = "`sku` plus any panel fields"),
    responses(
        (status = 201, description = "Panel stored", body = CreatedResponse),
        (status = 500, description = "Missing/duplicate SKU or unreadable body", body = ErrorResponse)
    )
)]
pub async fn create_panel_handler(
    State(state): State<AppState>,
    request: Result<Json<Map<String, JsonValue>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = request.map_err(ApiError::with(SAVE_PANEL))?;
    let id = state
        .db_service
        .create_panel(&NewPanel::from_body(body))
        .await
        .map_err(ApiError::with(SAVE_PANEL))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    get,
    path = "/api/panels",
    responses(
        (status = 200, description = "Every panel, document fields flattened beside id and sku", body = Vec<Panel>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_panels_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Panel>>, ApiError> {
    let panels = state
        .db_service
        .list_panels()
        .await
        .map_err(ApiError::with(LOAD_PANELS))?;
    Ok(Json(panels))
}
