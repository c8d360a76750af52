//! Read commands: count, list, get, search

use std::time::Instant;

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use serde_json::json;
use userdb_store::{Page, SearchField, User, DEFAULT_LIMIT};

use super::Context;
use crate::ui;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of users to show
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Number of users to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
}

impl ListArgs {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive substring)
    pub term: String,

    /// Column to search
    #[arg(long, value_enum, default_value_t = FieldArg::Any)]
    pub field: FieldArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldArg {
    FirstName,
    LastName,
    Email,
    /// First name, last name or email
    Any,
}

impl From<FieldArg> for SearchField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::FirstName => SearchField::FirstName,
            FieldArg::LastName => SearchField::LastName,
            FieldArg::Email => SearchField::Email,
            FieldArg::Any => SearchField::Any,
        }
    }
}

pub async fn run_count(ctx: &Context) -> Result<()> {
    ctx.prepare().await?;
    let total = ctx.store.count_users().await.context("Failed to count users")?;

    if ctx.json {
        println!("{}", ui::to_json(&json!({ "total_users": total }))?);
    } else {
        println!("Total users: {}", total);
    }
    Ok(())
}

pub async fn run_list(ctx: &Context, args: ListArgs) -> Result<()> {
    ctx.prepare().await?;
    let started = Instant::now();
    let users = ctx
        .store
        .list_users(args.page())
        .await
        .context("Failed to list users")?;
    print_users(ctx, &users, started)
}

pub async fn run_get(ctx: &Context, id: i32) -> Result<()> {
    ctx.prepare().await?;
    let started = Instant::now();
    let user = ctx
        .store
        .get_user_by_id(id)
        .await
        .with_context(|| format!("Failed to load user {}", id))?;

    if ctx.json {
        println!("{}", ui::to_json(&user)?);
    } else {
        println!("{}", ui::render_user(user.as_ref(), id, started.elapsed()));
    }
    Ok(())
}

pub async fn run_search(ctx: &Context, args: SearchArgs) -> Result<()> {
    ctx.prepare().await?;
    let field = SearchField::from(args.field);
    let started = Instant::now();
    let users = ctx
        .store
        .search_in(field, &args.term)
        .await
        .with_context(|| format!("Search by {} failed", field.as_str()))?;
    print_users(ctx, &users, started)
}

fn print_users(ctx: &Context, users: &[User], started: Instant) -> Result<()> {
    let elapsed = started.elapsed();
    if ctx.json {
        println!("{}", ui::to_json(users)?);
    } else {
        println!("{}", ui::render_users(users, elapsed));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_on_the_command_line() {
        assert_eq!(FieldArg::from_str("first-name", false), Ok(FieldArg::FirstName));
        assert_eq!(FieldArg::from_str("last-name", false), Ok(FieldArg::LastName));
        assert_eq!(FieldArg::from_str("email", false), Ok(FieldArg::Email));
        assert_eq!(FieldArg::from_str("any", false), Ok(FieldArg::Any));
        assert!(FieldArg::from_str("phone", false).is_err());
    }

    #[test]
    fn field_maps_to_store_field() {
        assert_eq!(SearchField::from(FieldArg::Email), SearchField::Email);
        assert_eq!(SearchField::from(FieldArg::Any), SearchField::Any);
    }
}
