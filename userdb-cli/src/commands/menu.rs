//! `userdb menu` - interactive console loop
//!
//! ```text
//! ==================================================
//!     userdb - synthetic user generator
//! ==================================================
//! ? What next?  Add users
//! ? How many users? 5000
//! ? Use bulk insert (COPY)? Yes
//! ```
//!
//! Esc at the main menu exits; Esc in the search menu goes back.

use std::fmt;
use std::time::Instant;

use anyhow::{Context as _, Result};
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use userdb_store::{Page, SearchField};

use super::generate::{generate_and_insert, GenerateRequest};
use super::Context;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    AddUsers,
    Browse,
    Exit,
}

impl MainChoice {
    const ALL: [Self; 3] = [Self::AddUsers, Self::Browse, Self::Exit];
}

impl fmt::Display for MainChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AddUsers => "Add users",
            Self::Browse => "Search and view users",
            Self::Exit => "Exit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchChoice {
    List,
    Field(SearchField),
    ById,
    Back,
}

impl SearchChoice {
    const ALL: [Self; 7] = [
        Self::List,
        Self::Field(SearchField::FirstName),
        Self::Field(SearchField::LastName),
        Self::Field(SearchField::Email),
        Self::Field(SearchField::Any),
        Self::ById,
        Self::Back,
    ];
}

impl fmt::Display for SearchChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("List all users"),
            Self::Field(SearchField::Any) => f.write_str("Search everywhere"),
            Self::Field(field) => write!(f, "Search by {}", field.as_str()),
            Self::ById => f.write_str("Find by id"),
            Self::Back => f.write_str("Back"),
        }
    }
}

pub async fn run_menu(ctx: &Context) -> Result<()> {
    println!("{}", ui::header());
    ctx.prepare().await?;

    loop {
        let choice = Select::new("What next?", MainChoice::ALL.to_vec())
            .prompt_skippable()
            .context("Failed to read menu choice")?;

        match choice {
            Some(MainChoice::AddUsers) => add_users(ctx).await?,
            Some(MainChoice::Browse) => browse(ctx).await?,
            Some(MainChoice::Exit) | None => {
                ui::info("Goodbye!");
                return Ok(());
            }
        }
    }
}

async fn add_users(ctx: &Context) -> Result<()> {
    let threshold = ctx.config.generation.bulk_threshold;

    let count = CustomType::<usize>::new("How many users?")
        .with_default(ctx.config.generation.default_count)
        .with_error_message("Please enter a whole number")
        .with_validator(|n: &usize| {
            if *n > 0 {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Must be greater than 0".into()))
            }
        })
        .prompt()
        .context("Failed to read user count")?;

    let bulk = count >= threshold
        && Confirm::new("Use bulk insert (COPY)?")
            .with_default(true)
            .with_help_message(&format!("Recommended for {} users or more", threshold))
            .prompt()
            .context("Failed to read bulk insert choice")?;

    let request = GenerateRequest {
        count,
        bulk,
        seed: None,
    };
    // A failed batch is rolled back; report it and stay in the menu.
    match generate_and_insert(ctx, request).await {
        Ok(stats) => println!("{}", stats.render()),
        Err(e) => ui::warn(format!("{:#}", e)),
    }
    Ok(())
}

async fn browse(ctx: &Context) -> Result<()> {
    loop {
        let choice = Select::new("Search and view", SearchChoice::ALL.to_vec())
            .with_page_size(SearchChoice::ALL.len())
            .prompt_skippable()
            .context("Failed to read search choice")?;

        let choice = match choice {
            Some(SearchChoice::Back) | None => return Ok(()),
            Some(choice) => choice,
        };

        if let Err(e) = run_search_choice(ctx, choice).await {
            ui::warn(format!("{:#}", e));
        }

        let more = Confirm::new("Continue searching?")
            .with_default(true)
            .prompt()
            .context("Failed to read answer")?;
        if !more {
            return Ok(());
        }
    }
}

async fn run_search_choice(ctx: &Context, choice: SearchChoice) -> Result<()> {
    match choice {
        SearchChoice::List => {
            let mut page = prompt_page()?;
            loop {
                let started = Instant::now();
                let users = ctx.store.list_users(page).await?;
                println!("{}", ui::render_users(&users, started.elapsed()));

                if !may_have_more(users.len(), page) {
                    break;
                }
                let next = Confirm::new("Show next page?")
                    .with_default(true)
                    .prompt()
                    .context("Failed to read answer")?;
                if !next {
                    break;
                }
                page = page.next();
            }
        }
        SearchChoice::Field(field) => {
            let term = prompt_term(field)?;
            let started = Instant::now();
            let users = ctx.store.search_in(field, &term).await?;
            println!("{}", ui::render_users(&users, started.elapsed()));
        }
        SearchChoice::ById => {
            let id = CustomType::<i32>::new("User id:")
                .with_error_message("Please enter a whole number")
                .prompt()
                .context("Failed to read user id")?;
            let started = Instant::now();
            let user = ctx.store.get_user_by_id(id).await?;
            println!("{}", ui::render_user(user.as_ref(), id, started.elapsed()));
        }
        SearchChoice::Back => {}
    }
    Ok(())
}

/// A full page means there may be another one after it.
fn may_have_more(shown: usize, page: Page) -> bool {
    page.limit > 0 && shown as u64 >= u64::from(page.limit)
}

fn prompt_page() -> Result<Page> {
    let defaults = Page::default();
    let limit = CustomType::<u32>::new("How many users to show?")
        .with_default(defaults.limit)
        .with_error_message("Please enter a non-negative number")
        .prompt()
        .context("Failed to read limit")?;
    let offset = CustomType::<u64>::new("How many to skip?")
        .with_default(defaults.offset)
        .with_error_message("Please enter a non-negative number")
        .prompt()
        .context("Failed to read offset")?;
    Ok(Page::new(limit, offset))
}

fn prompt_term(field: SearchField) -> Result<String> {
    let label = match field {
        SearchField::Any => "Text to search for:".to_string(),
        other => format!("{} contains:", capitalize(other.as_str())),
    };
    Text::new(&label)
        .with_validator(|s: &str| {
            if s.trim().is_empty() {
                Ok(Validation::Invalid("Search text cannot be empty".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
        .context("Failed to read search text")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_menu_labels() {
        let labels: Vec<String> = SearchChoice::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            labels,
            [
                "List all users",
                "Search by first name",
                "Search by last name",
                "Search by email",
                "Search everywhere",
                "Find by id",
                "Back",
            ]
        );
    }

    #[test]
    fn main_menu_ends_with_exit() {
        assert_eq!(MainChoice::ALL.last(), Some(&MainChoice::Exit));
    }

    #[test]
    fn next_page_offered_only_after_full_page() {
        assert!(may_have_more(100, Page::default()));
        assert!(!may_have_more(99, Page::default()));
        assert!(!may_have_more(0, Page::new(10, 40)));
        assert!(!may_have_more(0, Page::new(0, 0)));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("first name"), "First name");
        assert_eq!(capitalize(""), "");
    }
}
