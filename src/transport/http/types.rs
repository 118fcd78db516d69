use crate::app::database_service::DatabaseService;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub db_service: Arc<DatabaseService>,
    /// Client bundle served for every path the API does not claim.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(db_service: DatabaseService, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_service: Arc::new(db_service),
            static_dir: static_dir.into(),
        }
    }
}

/// Envelope used by the health check.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of a 201 from a create endpoint.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Route failure. Always a 500 carrying a fixed, route-specific message; the
/// underlying cause is only logged.
#[derive(Debug)]
pub struct ApiError {
    message: &'static str,
    cause: String,
}

impl ApiError {
    pub fn new(message: &'static str, cause: impl std::fmt::Display) -> Self {
        Self {
            message,
            cause: cause.to_string(),
        }
    }

    /// Adapter for `map_err`: `.map_err(ApiError::with(LOAD_PANELS))`.
    pub fn with<E: std::fmt::Display>(message: &'static str) -> impl Fn(E) -> Self {
        move |cause| Self::new(message, cause)
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(cause = %self.cause, "{}", self.message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.message.to_string(),
            }),
        )
            .into_response()
    }
}

// Route-specific failure messages.
pub const LOAD_INGREDIENTS: &str = "Failed to load ingredients";
pub const ADD_INGREDIENT: &str = "Failed to add ingredient";
pub const UPDATE_INGREDIENT: &str = "Failed to update ingredient";
pub const DELETE_INGREDIENT: &str = "Failed to delete ingredient";
pub const LOAD_SETTINGS: &str = "Failed to load settings";
pub const UPDATE_SETTINGS: &str = "Failed to update settings";
pub const SAVE_PANEL: &str = "Failed to save panel";
pub const LOAD_PANELS: &str = "Failed to load panels";
pub const LOAD_ALLERGENS: &str = "Failed to load allergens";
pub const LOAD_MANUFACTURERS: &str = "Failed to load manufacturers";
pub const LOAD_DISTRIBUTORS: &str = "Failed to load distributors";
