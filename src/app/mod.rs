pub mod database_service;
pub mod error;
