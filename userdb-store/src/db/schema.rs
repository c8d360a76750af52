//! Users table provisioning

use sqlx::postgres::PgConnection;
use sqlx::Connection;
use tracing::debug;

use super::gateway::ConnectionGateway;
use crate::error::{Operation, Result, StoreError};

/// Table definition. `IF NOT EXISTS` makes it safe to run on every start.
pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        firstname VARCHAR(50) NOT NULL,
        lastname VARCHAR(50) NOT NULL,
        email VARCHAR(100) NOT NULL
    )
"#;

/// Advisory lock key serializing concurrent schema setup ("userdb" in ASCII).
/// `CREATE TABLE IF NOT EXISTS` alone races on a fresh database.
pub const SCHEMA_LOCK_KEY: i64 = 0x7573_6572_6462;

const ACQUIRE_SCHEMA_LOCK: &str = "SELECT pg_advisory_xact_lock($1)";

/// Create the users table if it is missing.
///
/// Safe to call from many processes at once: the DDL runs in a transaction
/// holding [`SCHEMA_LOCK_KEY`], so later callers wait and then find the table.
/// Any failure, including failing to connect, is a `Setup` error.
pub async fn ensure_schema(gateway: &ConnectionGateway) -> Result<()> {
    let mut conn = gateway
        .open(Operation::EnsureSchema)
        .await
        .map_err(into_setup)?;

    let result = create_table(&mut conn).await;
    conn.finish(result).await.map_err(into_setup)?;

    debug!("users table ready");
    Ok(())
}

async fn create_table(conn: &mut PgConnection) -> std::result::Result<(), sqlx::Error> {
    let mut tx = conn.begin().await?;
    sqlx::query(ACQUIRE_SCHEMA_LOCK)
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_USERS_TABLE).execute(&mut *tx).await?;
    // Commit releases the advisory lock
    tx.commit().await
}

fn into_setup(err: StoreError) -> StoreError {
    match err {
        StoreError::Connection { source, .. } | StoreError::Storage { source, .. } => {
            StoreError::Setup { source }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_matches_column_limits() {
        assert!(CREATE_USERS_TABLE.contains("IF NOT EXISTS users"));
        assert!(CREATE_USERS_TABLE.contains("id SERIAL PRIMARY KEY"));
        assert!(CREATE_USERS_TABLE.contains("firstname VARCHAR(50) NOT NULL"));
        assert!(CREATE_USERS_TABLE.contains("lastname VARCHAR(50) NOT NULL"));
        assert!(CREATE_USERS_TABLE.contains("email VARCHAR(100) NOT NULL"));
    }

    #[test]
    fn connection_failures_become_setup_failures() {
        let err = into_setup(StoreError::connection(
            Operation::EnsureSchema,
            sqlx::Error::PoolTimedOut,
        ));
        assert!(err.is_setup());

        let err = into_setup(StoreError::invalid_argument("bad url"));
        assert!(err.is_invalid_argument());
    }
}
