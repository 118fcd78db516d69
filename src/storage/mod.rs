pub mod schema;
pub mod seed;

pub use schema::{ensure_schema, schema_version, Migration};
pub use seed::seed_if_empty;
