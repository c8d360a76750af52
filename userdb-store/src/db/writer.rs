//! Write path - row-by-row transactional insert and binary COPY bulk load
//!
//! Both strategies share the gateway's connection scoping and are
//! all-or-nothing: a transaction for row-by-row, the COPY stream itself
//! for bulk.

use sqlx::postgres::{PgConnection, PgCopyIn};
use sqlx::Connection;
use tracing::debug;

use super::copy::BinaryCopyEncoder;
use super::gateway::ConnectionGateway;
use crate::error::{Operation, Result, StoreError};
use crate::models::NewUser;

const INSERT_USER: &str = r#"
    INSERT INTO users (firstname, lastname, email)
    VALUES ($1, $2, $3)
    RETURNING id
"#;

const COPY_USERS: &str = "COPY users (firstname, lastname, email) FROM STDIN (FORMAT BINARY)";

const COPY_FIELDS: i16 = 3;

/// How a batch gets written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// One `INSERT` per user inside a single transaction
    RowByRow,
    /// One binary `COPY` stream for the whole batch
    Bulk,
}

impl WriteStrategy {
    /// Pick bulk only for batches at or above `threshold` when the operator
    /// asked for it.
    pub fn select(batch_len: usize, threshold: usize, bulk_requested: bool) -> Self {
        if bulk_requested && batch_len >= threshold {
            Self::Bulk
        } else {
            Self::RowByRow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RowByRow => "row-by-row",
            Self::Bulk => "bulk",
        }
    }
}

fn ensure_non_empty(users: &[NewUser]) -> Result<()> {
    if users.is_empty() {
        return Err(StoreError::invalid_argument("user batch cannot be empty"));
    }
    Ok(())
}

/// Insert every user in one transaction, returning the assigned ids in
/// submission order. Nothing is committed unless every row succeeds.
pub async fn insert_row_by_row(gateway: &ConnectionGateway, users: &[NewUser]) -> Result<Vec<i32>> {
    ensure_non_empty(users)?;

    let mut conn = gateway.open(Operation::InsertRowByRow).await?;
    let result = insert_in_transaction(&mut conn, users).await;
    conn.finish(result).await
}

async fn insert_in_transaction(
    conn: &mut PgConnection,
    users: &[NewUser],
) -> std::result::Result<Vec<i32>, sqlx::Error> {
    let mut tx = conn.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for user in users {
        let inserted = sqlx::query_scalar::<_, i32>(INSERT_USER)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(id) => ids.push(id),
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    debug!(error = %rollback_err, "rollback failed");
                }
                return Err(err);
            }
        }
    }

    tx.commit().await?;
    Ok(ids)
}

/// Stream every user through one binary COPY. Returns the row count the
/// server reports. Either the whole stream lands or none of it does.
pub async fn bulk_insert(gateway: &ConnectionGateway, users: &[NewUser]) -> Result<u64> {
    ensure_non_empty(users)?;

    let mut conn = gateway.open(Operation::BulkInsert).await?;
    let result = copy_users(&mut conn, users).await;
    conn.finish(result).await
}

async fn copy_users(
    conn: &mut PgConnection,
    users: &[NewUser],
) -> std::result::Result<u64, sqlx::Error> {
    let mut copy = conn.copy_in_raw(COPY_USERS).await?;

    match stream_rows(&mut copy, users).await {
        Ok(()) => copy.finish().await,
        Err(err) => {
            if let Err(abort_err) = copy.abort("bulk insert aborted by client").await {
                debug!(error = %abort_err, "copy abort failed");
            }
            Err(err)
        }
    }
}

async fn stream_rows(
    copy: &mut PgCopyIn<&mut PgConnection>,
    users: &[NewUser],
) -> std::result::Result<(), sqlx::Error> {
    let mut encoder = BinaryCopyEncoder::new(COPY_FIELDS);

    for user in users {
        encoder.write_row(&[
            user.first_name.as_str(),
            user.last_name.as_str(),
            user.email.as_str(),
        ])?;
        if encoder.should_flush() {
            copy.send(encoder.take_chunk()).await?;
        }
    }

    debug!(rows = encoder.rows(), "copy stream encoded");
    copy.send(encoder.finish()).await?;
    Ok(())
}

/// Write `users` with the given strategy, returning how many rows landed.
pub async fn insert(
    gateway: &ConnectionGateway,
    users: &[NewUser],
    strategy: WriteStrategy,
) -> Result<u64> {
    match strategy {
        WriteStrategy::RowByRow => insert_row_by_row(gateway, users)
            .await
            .map(|ids| ids.len() as u64),
        WriteStrategy::Bulk => bulk_insert(gateway, users).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn offline_gateway() -> ConnectionGateway {
        ConnectionGateway::new(&StoreConfig::new("postgres://nobody@127.0.0.1:1/none")).unwrap()
    }

    #[test]
    fn strategy_selection() {
        assert_eq!(WriteStrategy::select(5000, 1000, true), WriteStrategy::Bulk);
        assert_eq!(WriteStrategy::select(1000, 1000, true), WriteStrategy::Bulk);
        assert_eq!(WriteStrategy::select(999, 1000, true), WriteStrategy::RowByRow);
        assert_eq!(WriteStrategy::select(5000, 1000, false), WriteStrategy::RowByRow);
    }

    #[tokio::test]
    async fn empty_batch_rejected_before_io() {
        // The gateway points at a dead port: reaching I/O would be a Connection error.
        let gateway = offline_gateway();

        let err = insert_row_by_row(&gateway, &[]).await.unwrap_err();
        assert!(err.is_invalid_argument());

        let err = bulk_insert(&gateway, &[]).await.unwrap_err();
        assert!(err.is_invalid_argument());

        let err = insert(&gateway, &[], WriteStrategy::Bulk).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
