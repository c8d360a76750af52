//! `UserStore` - the public face of the data-access layer
//!
//! Holds nothing but connect options, so it is cheap to clone and safe to
//! share between tasks. Each method opens its own connection.

use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use tracing::instrument;

use crate::config::StoreConfig;
use crate::db::{reader, schema, writer, ConnectionGateway, SearchField, WriteStrategy};
use crate::error::Result;
use crate::models::{NewUser, Page, User};

#[derive(Debug, Clone)]
pub struct UserStore {
    gateway: ConnectionGateway,
}

impl UserStore {
    /// Create a store for the configured database. Does not connect.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the database URL cannot be parsed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = UserStore::new(&StoreConfig::new("postgres://localhost/userdb"))?;
    /// store.ensure_schema().await?;
    /// ```
    pub fn new(config: &StoreConfig) -> Result<Self> {
        Ok(Self {
            gateway: ConnectionGateway::new(config)?,
        })
    }

    /// Create a store from already-parsed connect options.
    pub fn from_options(options: PgConnectOptions, connect_timeout: Duration) -> Self {
        Self {
            gateway: ConnectionGateway::from_options(options, connect_timeout),
        }
    }

    /// Idempotently create the `users` table. Failures are `Setup` errors.
    #[instrument(skip_all)]
    pub async fn ensure_schema(&self) -> Result<()> {
        schema::ensure_schema(&self.gateway).await
    }

    /// Startup diagnostic: `false` instead of an error when unreachable.
    #[instrument(skip_all)]
    pub async fn test_connection(&self) -> bool {
        self.gateway.test_connection().await
    }

    /// Transactional insert, one statement per user. Returns assigned ids.
    #[instrument(skip_all, fields(rows = users.len()))]
    pub async fn insert_row_by_row(&self, users: &[NewUser]) -> Result<Vec<i32>> {
        writer::insert_row_by_row(&self.gateway, users).await
    }

    /// Binary COPY insert. Returns the number of rows loaded.
    #[instrument(skip_all, fields(rows = users.len()))]
    pub async fn bulk_insert(&self, users: &[NewUser]) -> Result<u64> {
        writer::bulk_insert(&self.gateway, users).await
    }

    /// Insert with an explicit strategy. Returns the number of rows written.
    #[instrument(skip_all, fields(rows = users.len(), strategy = strategy.as_str()))]
    pub async fn insert(&self, users: &[NewUser], strategy: WriteStrategy) -> Result<u64> {
        writer::insert(&self.gateway, users, strategy).await
    }

    #[instrument(skip_all)]
    pub async fn count_users(&self) -> Result<i64> {
        reader::count_users(&self.gateway).await
    }

    #[instrument(skip_all, fields(limit = page.limit, offset = page.offset))]
    pub async fn list_users(&self, page: Page) -> Result<Vec<User>> {
        reader::list_users(&self.gateway, page).await
    }

    #[instrument(skip_all, fields(id = id))]
    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        reader::get_user_by_id(&self.gateway, id).await
    }

    pub async fn search_by_first_name(&self, term: &str) -> Result<Vec<User>> {
        self.search_in(SearchField::FirstName, term).await
    }

    pub async fn search_by_last_name(&self, term: &str) -> Result<Vec<User>> {
        self.search_in(SearchField::LastName, term).await
    }

    pub async fn search_by_email(&self, term: &str) -> Result<Vec<User>> {
        self.search_in(SearchField::Email, term).await
    }

    /// Match on first name, last name or email.
    pub async fn search(&self, term: &str) -> Result<Vec<User>> {
        self.search_in(SearchField::Any, term).await
    }

    #[instrument(skip_all, fields(field = field.as_str()))]
    pub async fn search_in(&self, field: SearchField, term: &str) -> Result<Vec<User>> {
        reader::search(&self.gateway, field, term).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync + Clone>() {}

    #[test]
    fn store_is_shareable() {
        assert_send_sync::<UserStore>();
    }

    #[tokio::test]
    async fn unreachable_database_reports_false() {
        let cfg = StoreConfig::new("postgres://nobody@127.0.0.1:1/none")
            .with_connect_timeout(Duration::from_secs(2));
        let store = UserStore::new(&cfg).unwrap();
        assert!(!store.test_connection().await);
    }

    #[tokio::test]
    async fn unreachable_database_fails_schema_setup() {
        let cfg = StoreConfig::new("postgres://nobody@127.0.0.1:1/none")
            .with_connect_timeout(Duration::from_secs(2));
        let store = UserStore::new(&cfg).unwrap();
        let err = store.ensure_schema().await.unwrap_err();
        assert!(err.is_setup());
    }
}
