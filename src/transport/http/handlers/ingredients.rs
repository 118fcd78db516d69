use crate::domain::model::{IngredientGroups, IngredientInput};
use crate::transport::http::types::{
    ApiError, AppState, CreatedResponse, MessageResponse, ADD_INGREDIENT,
    DELETE_INGREDIENT, LOAD_INGREDIENTS, UPDATE_INGREDIENT,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/api/ingredients",
    responses(
        (status = 200, description = "Ingredients grouped by daily-value flag", body = IngredientGroups),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_ingredients_handler(
    State(state): State<AppState>,
) -> Result<Json<IngredientGroups>, ApiError> {
    let groups = state
        .db_service
        .list_ingredients()
        .await
        .map_err(ApiError::with(LOAD_INGREDIENTS))?;
    Ok(Json(groups))
}

#[utoipa::path(
    post,
    path = "/api/ingredients",
    request_body = IngredientInput,
    responses(
        (status = 201, description = "Ingredient created", body = CreatedResponse),
        (status = 500, description = "Store failure or unreadable body", body = ErrorResponse)
    )
)]
pub async fn create_ingredient_handler(
    State(state): State<AppState>,
    request: Result<Json<IngredientInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = request.map_err(ApiError::with(ADD_INGREDIENT))?;
    let id = state
        .db_service
        .create_ingredient(&input.normalize())
        .await
        .map_err(ApiError::with(ADD_INGREDIENT))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = IngredientInput,
    responses(
        (status = 200, description = "Update issued (also when no row matched)", body = MessageResponse),
        (status = 500, description = "Store failure or unreadable body", body = ErrorResponse)
    )
)]
pub async fn update_ingredient_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    request: Result<Json<IngredientInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(raw_id) = id.map_err(ApiError::with(UPDATE_INGREDIENT))?;
    let Json(input) = request.map_err(ApiError::with(UPDATE_INGREDIENT))?;
    let affected = match parse_id(&raw_id) {
        Some(id) => state
            .db_service
            .update_ingredient(id, &input.normalize())
            .await
            .map_err(ApiError::with(UPDATE_INGREDIENT))?,
        None => 0,
    };
    if affected == 0 {
        debug!(id = %raw_id, "Update matched no ingredient");
    }
    Ok(MessageResponse::new("Ingredient updated"))
}

#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Delete issued (also when no row matched)", body = MessageResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_ingredient_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(raw_id) = id.map_err(ApiError::with(DELETE_INGREDIENT))?;
    let affected = match parse_id(&raw_id) {
        Some(id) => state
            .db_service
            .delete_ingredient(id)
            .await
            .map_err(ApiError::with(DELETE_INGREDIENT))?,
        None => 0,
    };
    if affected == 0 {
        debug!(id = %raw_id, "Delete matched no ingredient");
    }
    Ok(MessageResponse::new("Ingredient deleted"))
}

/// A non-numeric id can never match a row; it is treated as a miss, not a failure.
fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
