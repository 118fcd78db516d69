pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::{DatabaseService, InitReport};
pub use app::error::StoreError;
pub use domain::model::{Ingredient, IngredientGroups, NewIngredient, NewPanel, Panel, SettingsUpdate};
