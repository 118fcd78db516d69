pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod ingredients;
    pub mod panels;
    pub mod reference;
    pub mod settings;
}

pub use router::{create_app, create_router, ApiDoc};
pub use types::{ApiError, AppState};
