//! Structured error types for the userdb data-access layer.
//!
//! Every storage failure is translated at the operation boundary into one of
//! these variants, carrying the original `sqlx::Error` as its source. Binary
//! crates (userdb-cli) wrap them further with `anyhow` context.

use std::fmt;

use thiserror::Error;

/// The data operation a failure happened in.
///
/// Rendered into error messages so callers see which step broke without
/// having to inspect the underlying driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    TestConnection,
    EnsureSchema,
    InsertRowByRow,
    BulkInsert,
    CountUsers,
    ListUsers,
    GetUserById,
    SearchByFirstName,
    SearchByLastName,
    SearchByEmail,
    Search,
}

impl Operation {
    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::TestConnection => "testing the database connection",
            Self::EnsureSchema => "creating the users table",
            Self::InsertRowByRow => "inserting users",
            Self::BulkInsert => "bulk inserting users",
            Self::CountUsers => "counting users",
            Self::ListUsers => "listing users",
            Self::GetUserById => "fetching user by id",
            Self::SearchByFirstName => "searching users by first name",
            Self::SearchByLastName => "searching users by last name",
            Self::SearchByEmail => "searching users by email",
            Self::Search => "searching users",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Main error type for userdb-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Schema provisioning failed. Fatal: callers must not continue.
    #[error("schema setup failed: {source}")]
    Setup {
        #[source]
        source: sqlx::Error,
    },

    /// Could not open a connection to the database
    #[error("could not connect to the database while {operation}: {source}")]
    Connection {
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },

    /// Rejected before any I/O was attempted
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Query, transaction or COPY stream failed
    #[error("error while {operation}: {source}")]
    Storage {
        operation: Operation,
        #[source]
        source: sqlx::Error,
    },
}

/// Result type alias for userdb-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a storage error for the given operation
    pub fn storage(operation: Operation, source: sqlx::Error) -> Self {
        Self::Storage { operation, source }
    }

    /// Create a connection error for the given operation
    pub fn connection(operation: Operation, source: sqlx::Error) -> Self {
        Self::Connection { operation, source }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }

    /// The operation the failure happened in, if known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Setup { .. } => Some(Operation::EnsureSchema),
            Self::Connection { operation, .. } | Self::Storage { operation, .. } => {
                Some(*operation)
            }
            Self::InvalidArgument { .. } => None,
        }
    }
}
