use crate::domain::model::{Allergen, Organization, OrganizationKind};
use crate::transport::http::types::{
    ApiError, AppState, LOAD_ALLERGENS, LOAD_DISTRIBUTORS, LOAD_MANUFACTURERS,
};
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/allergens",
    responses(
        (status = 200, description = "All allergens", body = Vec<Allergen>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_allergens_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Allergen>>, ApiError> {
    let rows = state
        .db_service
        .list_allergens()
        .await
        .map_err(ApiError::with(LOAD_ALLERGENS))?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/manufacturers",
    responses(
        (status = 200, description = "All manufacturers", body = Vec<Organization>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_manufacturers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Organization>>, ApiError> {
    list_organizations(&state, OrganizationKind::Manufacturer, LOAD_MANUFACTURERS).await
}

#[utoipa::path(
    get,
    path = "/api/distributors",
    responses(
        (status = 200, description = "All distributors", body = Vec<Organization>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_distributors_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Organization>>, ApiError> {
    list_organizations(&state, OrganizationKind::Distributor, LOAD_DISTRIBUTORS).await
}

async fn list_organizations(
    state: &AppState,
    kind: OrganizationKind,
    failure: &'static str,
) -> Result<Json<Vec<Organization>>, ApiError> {
    let rows = state
        .db_service
        .list_organizations(kind)
        .await
        .map_err(ApiError::with(failure))?;
    Ok(Json(rows))
}
