//! Command implementations for the userdb CLI

pub mod generate;
pub mod menu;
pub mod query;

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use tracing::debug;
use userdb_store::UserStore;

use crate::config::UserdbConfig;
use crate::ui;

/// Everything a command needs: the store, settings and output mode
pub struct Context {
    pub store: UserStore,
    pub config: UserdbConfig,
    pub json: bool,
}

impl Context {
    pub fn new(config: UserdbConfig, url_override: Option<&str>, json: bool) -> Result<Self> {
        let store = UserStore::new(&config.store_config(url_override))
            .context("Invalid database configuration")?;
        Ok(Self {
            store,
            config,
            json,
        })
    }

    /// Connectivity check, then schema setup. Every data command starts here.
    pub async fn prepare(&self) -> Result<()> {
        self.check_connection().await?;

        ui::with_spinner_async(
            "Preparing users table...",
            "Users table ready",
            self.store.ensure_schema(),
        )
        .await
        .context("Failed to prepare the users table")?;
        Ok(())
    }

    async fn check_connection(&self) -> Result<()> {
        let pb = ui::spinner("Checking database connection...");
        if self.store.test_connection().await {
            ui::finish_success(pb, "Database connection OK");
            Ok(())
        } else {
            ui::finish_error(pb, "Database connection failed");
            bail!("Could not connect to the database. Check --database-url / DATABASE_URL.")
        }
    }
}

/// `userdb check`
pub async fn run_check(ctx: &Context) -> Result<()> {
    let reachable = ctx.store.test_connection().await;
    debug!(reachable, "connection check");

    if ctx.json {
        println!("{}", ui::to_json(&json!({ "reachable": reachable }))?);
    } else if reachable {
        ui::success("Database connection OK");
    }

    if !reachable {
        bail!("Could not connect to the database. Check --database-url / DATABASE_URL.");
    }
    Ok(())
}

/// `userdb init`
pub async fn run_init(ctx: &Context) -> Result<()> {
    ctx.prepare().await?;
    if ctx.json {
        println!("{}", ui::to_json(&json!({ "schema": "ready" }))?);
    } else {
        ui::info("Schema is up to date");
    }
    Ok(())
}
