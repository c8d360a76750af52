//! userdb-faker: synthetic user records
//!
//! Generates Ukrainian first and last names with matching transliterated
//! email addresses. Every record fits the `users` table constraints.

pub mod names;
pub mod translit;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use userdb_store::NewUser;

use names::{
    feminine, EMAIL_DOMAINS, EMAIL_SEPARATORS, FEMALE_FIRST_NAMES, GENDERED_SURNAMES,
    MALE_FIRST_NAMES, SURNAMES,
};

/// Longest local part we produce (RFC 5321 limit)
const MAX_LOCAL_PART: usize = 64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("user count must be greater than 0, got {count}")]
    InvalidCount { count: usize },
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Random user generator
#[derive(Debug)]
pub struct UserGenerator {
    rng: StdRng,
}

impl UserGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` users.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCount` when `count` is 0.
    pub fn generate(&mut self, count: usize) -> Result<Vec<NewUser>> {
        if count == 0 {
            return Err(GenerateError::InvalidCount { count });
        }
        Ok((0..count).map(|_| self.generate_one()).collect())
    }

    /// Generate a single user.
    pub fn generate_one(&mut self) -> NewUser {
        let female = self.rng.gen_bool(0.5);

        let first_name = if female {
            self.pick(FEMALE_FIRST_NAMES)
        } else {
            self.pick(MALE_FIRST_NAMES)
        }
        .to_string();

        let surname = if self.rng.gen_ratio(1, 4) {
            self.pick(GENDERED_SURNAMES)
        } else {
            self.pick(SURNAMES)
        };
        let last_name = if female {
            feminine(surname)
        } else {
            surname.to_string()
        };

        let email = self.email(&first_name, &last_name);

        NewUser {
            first_name,
            last_name,
            email,
        }
    }

    fn pick(&mut self, table: &'static [&'static str]) -> &'static str {
        table[self.rng.gen_range(0..table.len())]
    }

    fn email(&mut self, first_name: &str, last_name: &str) -> String {
        let separator = self.pick(EMAIL_SEPARATORS);
        let mut local = format!(
            "{}{}{}",
            translit::to_latin(first_name),
            separator,
            translit::to_latin(last_name)
        );
        if self.rng.gen_bool(0.5) {
            let suffix: u8 = self.rng.gen_range(1..100);
            local.push_str(&suffix.to_string());
        }
        local.truncate(MAX_LOCAL_PART);

        format!("{}@{}", local, self.pick(EMAIL_DOMAINS))
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}
