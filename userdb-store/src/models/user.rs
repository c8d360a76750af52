//! User records
//!
//! Column limits mirror the `users` table: `VARCHAR(50)` for names,
//! `VARCHAR(100)` for email. Lengths are counted in characters, the same
//! way PostgreSQL counts them for `VARCHAR(n)`.

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for first and last names
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length for email addresses
pub const MAX_EMAIL_LEN: usize = 100;

/// A user that has not been stored yet.
///
/// There is no id field: ids are assigned by the database on insert.
/// Fields are public so batches can be built directly; use [`NewUser::new`]
/// to check them up front; otherwise the table constraints reject bad rows
/// at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewUser {
    /// Create a new user, validating field presence and length.
    ///
    /// # Example
    /// ```
    /// use userdb_store::NewUser;
    ///
    /// assert!(NewUser::new("Olena", "Ivanenko", "olena@test.ua").is_ok());
    /// assert!(NewUser::new("", "Ivanenko", "olena@test.ua").is_err());
    /// ```
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let user = Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Check every field against the table constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_field("first name", &self.first_name, MAX_NAME_LEN)?;
        check_field("last name", &self.last_name, MAX_NAME_LEN)?;
        check_field("email", &self.email, MAX_EMAIL_LEN)
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Snapshot of a stored user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[sqlx(rename = "lastname")]
    pub last_name: String,
    pub email: String,
}

impl User {
    /// True when the text fields match the given unsaved record.
    pub fn same_fields(&self, other: &NewUser) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email == other.email
    }

    /// `First Last`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_user() {
        let user = NewUser::new("Olena", "Ivanenko", "olena@test.ua").unwrap();
        assert_eq!(user.first_name, "Olena");
        assert_eq!(user.email, "olena@test.ua");
    }

    #[test]
    fn rejects_empty_fields() {
        let err = NewUser::new("", "Ivanenko", "x@test.ua").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "first name" });

        let err = NewUser::new("Olena", "", "x@test.ua").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "last name" });

        let err = NewUser::new("Olena", "Ivanenko", "").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "email" });
    }

    #[test]
    fn name_max_length_counts_chars() {
        // 50 Cyrillic letters are 100 bytes but still fit VARCHAR(50)
        let name_50 = "Ї".repeat(50);
        assert!(NewUser::new(name_50.as_str(), "Ivanenko", "a@b.ua").is_ok());

        let name_51 = "Ї".repeat(51);
        let err = NewUser::new(name_51.as_str(), "Ivanenko", "a@b.ua").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 50, .. }));
    }

    #[test]
    fn email_max_length() {
        let email_100 = format!("{}@b.ua", "a".repeat(95));
        assert_eq!(email_100.len(), 100);
        assert!(NewUser::new("Olena", "Ivanenko", email_100).is_ok());

        let email_101 = format!("{}@b.ua", "a".repeat(96));
        let err = NewUser::new("Olena", "Ivanenko", email_101).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "email", max: 100 }));
    }

    #[test]
    fn snapshot_compares_text_fields() {
        let new_user = NewUser::new("Petro", "Ivanenko", "petro@test.ua").unwrap();
        let stored = User {
            id: 7,
            first_name: "Petro".into(),
            last_name: "Ivanenko".into(),
            email: "petro@test.ua".into(),
        };
        assert!(stored.same_fields(&new_user));
        assert_eq!(stored.full_name(), "Petro Ivanenko");
    }
}
