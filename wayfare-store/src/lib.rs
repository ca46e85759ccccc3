pub mod app_config;
pub mod audit_repo;
pub mod database;

pub use audit_repo::PostgresAuditStore;
pub use database::DbClient;
