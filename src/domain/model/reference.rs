//! Read-only reference rows seeded at startup.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Allergen {
    pub id: i64,
    pub name: String,
}

/// Row shape shared by the `manufacturers` and `distributors` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
}

/// The two organization tables exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationKind {
    Manufacturer,
    Distributor,
}

impl OrganizationKind {
    pub fn table_name(self) -> &'static str {
        match self {
            OrganizationKind::Manufacturer => "manufacturers",
            OrganizationKind::Distributor => "distributors",
        }
    }
}
