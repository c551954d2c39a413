/// Remote catalog abstraction
///
/// The picker only ever needs two things from the hosted database: the schema (to
/// list valid filter values) and a single filtered query. Everything else about the
/// service, including transport and authentication, stays behind this trait.
use crate::{error::AppResult, models::DatabaseSchema, services::query::QueryBody};

pub mod notion;

pub use notion::NotionClient;

/// Trait for catalog backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the database schema with its property definitions
    ///
    /// Failures surface as `AppError::RemoteSchema`.
    async fn fetch_schema(&self) -> AppResult<DatabaseSchema>;

    /// Run one query and return the raw entries of the first response page
    ///
    /// Failures surface as `AppError::RemoteQuery` carrying the remote status and body.
    async fn query(&self, body: QueryBody) -> AppResult<Vec<serde_json::Value>>;

    /// Catalog name for logging and debugging
    fn name(&self) -> &'static str;
}
