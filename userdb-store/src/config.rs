//! Store configuration
//!
//! The store only needs to know where the database is and how long to wait
//! for a connection. Loading these values from files or the environment is
//! the binary's job.

use std::time::Duration;

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default database URL
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/userdb";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Upper bound on establishing a single connection
    pub connect_timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_timeout() {
        let cfg = StoreConfig::new("postgres://db/users").with_connect_timeout(Duration::from_secs(3));
        assert_eq!(cfg.database_url, "postgres://db/users");
        assert_eq!(cfg.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn new_uses_default_timeout() {
        let cfg = StoreConfig::new("postgres://db/users");
        assert_eq!(cfg.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }
}
