use crate::domain::model::{
    Allergen, Ingredient, IngredientGroups, IngredientInput, Organization, Panel, SettingsUpdate,
};
use crate::transport::http::handlers::{health, ingredients, panels, reference, settings};
use crate::transport::http::types::{
    ApiResponse, AppState, CreatedResponse, ErrorResponse, MessageResponse,
};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        ingredients::list_ingredients_handler,
        ingredients::create_ingredient_handler,
        ingredients::update_ingredient_handler,
        ingredients::delete_ingredient_handler,
        settings::get_settings_handler,
        settings::update_settings_handler,
        panels::create_panel_handler,
        panels::list_panels_handler,
        reference::list_allergens_handler,
        reference::list_manufacturers_handler,
        reference::list_distributors_handler
    ),
    components(schemas(
        ApiResponse,
        CreatedResponse,
        MessageResponse,
        ErrorResponse,
        Ingredient,
        IngredientGroups,
        IngredientInput,
        Panel,
        SettingsUpdate,
        Allergen,
        Organization
    ))
)]
pub struct ApiDoc;

/// API routes only.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/ingredients",
            get(ingredients::list_ingredients_handler).post(ingredients::create_ingredient_handler),
        )
        .route(
            "/api/ingredients/:id",
            axum::routing::put(ingredients::update_ingredient_handler)
                .delete(ingredients::delete_ingredient_handler),
        )
        .route(
            "/api/settings",
            get(settings::get_settings_handler).put(settings::update_settings_handler),
        )
        .route(
            "/api/panels",
            get(panels::list_panels_handler).post(panels::create_panel_handler),
        )
        .route("/api/allergens", get(reference::list_allergens_handler))
        .route("/api/manufacturers", get(reference::list_manufacturers_handler))
        .route("/api/distributors", get(reference::list_distributors_handler))
        .with_state(app_state)
}

/// The full application: API routes, Swagger UI, and the client bundle as the
/// fallback for every other path (unknown paths get `index.html`).
pub fn create_app(app_state: AppState) -> Router {
    let static_dir = app_state.static_dir.clone();
    let client = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(client)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
