//! Read path - count, paginated listing, lookup by id, substring search
//!
//! Every query is a single parameterized statement. Search terms are bound,
//! never spliced into SQL; LIKE wildcards inside a term are escaped so the
//! match is a literal, case-insensitive substring match.

use sqlx::postgres::PgConnection;

use super::gateway::ConnectionGateway;
use crate::error::{Operation, Result, StoreError};
use crate::models::{Page, User};

const COUNT_USERS: &str = "SELECT COUNT(*) FROM users";

const LIST_USERS: &str = r#"
    SELECT id, firstname, lastname, email
    FROM users
    ORDER BY id
    LIMIT $1 OFFSET $2
"#;

const GET_USER_BY_ID: &str = r#"
    SELECT id, firstname, lastname, email
    FROM users
    WHERE id = $1
"#;

const SEARCH_BY_FIRST_NAME: &str = r#"
    SELECT id, firstname, lastname, email
    FROM users
    WHERE LOWER(firstname) LIKE LOWER($1) ESCAPE '\'
    ORDER BY firstname, lastname, id
"#;

const SEARCH_BY_LAST_NAME: &str = r#"
    SELECT id, firstname, lastname, email
    FROM users
    WHERE LOWER(lastname) LIKE LOWER($1) ESCAPE '\'
    ORDER BY lastname, firstname, id
"#;

const SEARCH_BY_EMAIL: &str = r#"
    SELECT id, firstname, lastname, email
    FROM users
    WHERE LOWER(email) LIKE LOWER($1) ESCAPE '\'
    ORDER BY email, id
"#;

const SEARCH_ANY: &str = r#"
    SELECT id, firstname, lastname, email
    FROM users
    WHERE LOWER(firstname) LIKE LOWER($1) ESCAPE '\'
       OR LOWER(lastname) LIKE LOWER($1) ESCAPE '\'
       OR LOWER(email) LIKE LOWER($1) ESCAPE '\'
    ORDER BY firstname, lastname, id
"#;

/// Which column(s) a search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    FirstName,
    LastName,
    Email,
    /// First name, last name or email
    Any,
}

impl SearchField {
    fn sql(self) -> &'static str {
        match self {
            Self::FirstName => SEARCH_BY_FIRST_NAME,
            Self::LastName => SEARCH_BY_LAST_NAME,
            Self::Email => SEARCH_BY_EMAIL,
            Self::Any => SEARCH_ANY,
        }
    }

    fn operation(self) -> Operation {
        match self {
            Self::FirstName => Operation::SearchByFirstName,
            Self::LastName => Operation::SearchByLastName,
            Self::Email => Operation::SearchByEmail,
            Self::Any => Operation::Search,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Any => "any field",
        }
    }
}

/// Build a `%term%` pattern with `\`, `%` and `_` escaped.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn ensure_term(term: &str) -> Result<()> {
    if term.trim().is_empty() {
        return Err(StoreError::invalid_argument("search term cannot be blank"));
    }
    Ok(())
}

pub async fn count_users(gateway: &ConnectionGateway) -> Result<i64> {
    let mut conn = gateway.open(Operation::CountUsers).await?;
    let result = sqlx::query_scalar::<_, i64>(COUNT_USERS)
        .fetch_one(&mut *conn)
        .await;
    conn.finish(result).await
}

/// Users in ascending id order within `page`.
pub async fn list_users(gateway: &ConnectionGateway, page: Page) -> Result<Vec<User>> {
    let mut conn = gateway.open(Operation::ListUsers).await?;
    let result = sqlx::query_as::<_, User>(LIST_USERS)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&mut *conn)
        .await;
    conn.finish(result).await
}

/// `None` when no row has this id.
pub async fn get_user_by_id(gateway: &ConnectionGateway, id: i32) -> Result<Option<User>> {
    let mut conn = gateway.open(Operation::GetUserById).await?;
    let result = sqlx::query_as::<_, User>(GET_USER_BY_ID)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await;
    conn.finish(result).await
}

/// Case-insensitive substring search on `field`.
pub async fn search(gateway: &ConnectionGateway, field: SearchField, term: &str) -> Result<Vec<User>> {
    ensure_term(term)?;

    let mut conn = gateway.open(field.operation()).await?;
    let result = run_search(&mut conn, field, &contains_pattern(term)).await;
    conn.finish(result).await
}

async fn run_search(
    conn: &mut PgConnection,
    field: SearchField,
    pattern: &str,
) -> std::result::Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(field.sql())
        .bind(pattern)
        .fetch_all(conn)
        .await
}
