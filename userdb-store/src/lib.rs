//! userdb-store: PostgreSQL data-access layer for synthetic user records
//!
//! Provisions the `users` table, writes batches either row-by-row inside a
//! transaction or through a binary `COPY` stream, and serves id lookups,
//! paginated listings and case-insensitive substring searches.
//!
//! The store never prints. Diagnostics go through `tracing` at debug level;
//! everything else is returned as a value or a [`StoreError`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use config::StoreConfig;
pub use db::{SearchField, WriteStrategy};
pub use error::{Operation, Result, StoreError};
pub use models::{NewUser, Page, User, DEFAULT_LIMIT, ValidationError, MAX_EMAIL_LEN, MAX_NAME_LEN};
pub use store::UserStore;
