//! Domain models
//!
//! `NewUser` is the in-memory record before insertion (no id yet),
//! `User` is a read-only snapshot of a stored row.

pub mod page;
pub mod user;
pub mod validation;

pub use page::{Page, DEFAULT_LIMIT};
pub use user::{NewUser, User, MAX_EMAIL_LEN, MAX_NAME_LEN};
pub use validation::ValidationError;
