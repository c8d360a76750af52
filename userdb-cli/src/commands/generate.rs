//! `userdb generate` - create synthetic users and insert them

use std::time::Instant;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;
use userdb_faker::UserGenerator;
use userdb_store::WriteStrategy;

use super::Context;
use crate::ui::{self, InsertStats};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of users to generate (default from config, 100)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Use binary COPY when the batch reaches the bulk threshold
    #[arg(long)]
    pub bulk: bool,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

/// What the caller asked for
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest {
    pub count: usize,
    pub bulk: bool,
    pub seed: Option<u64>,
}

pub async fn run_generate(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let request = GenerateRequest {
        count: args.count.unwrap_or(ctx.config.generation.default_count),
        bulk: args.bulk,
        seed: args.seed,
    };

    ctx.prepare().await?;
    let stats = generate_and_insert(ctx, request).await?;

    if ctx.json {
        println!("{}", ui::to_json(&stats)?);
    } else {
        println!("{}", stats.render());
    }
    Ok(())
}

/// Bulk is only honoured for batches at or above the configured threshold.
pub fn choose_strategy(request: &GenerateRequest, threshold: usize) -> WriteStrategy {
    WriteStrategy::select(request.count, threshold, request.bulk)
}

/// Generate, insert with the chosen strategy and report statistics.
///
/// Only the insert is timed; generation and the final count are not.
pub async fn generate_and_insert(ctx: &Context, request: GenerateRequest) -> Result<InsertStats> {
    let threshold = ctx.config.generation.bulk_threshold;
    let strategy = choose_strategy(&request, threshold);
    if request.bulk && strategy == WriteStrategy::RowByRow {
        ui::warn(format!(
            "Bulk insert needs at least {} users, using row-by-row insert",
            threshold
        ));
    }

    let mut generator = match request.seed {
        Some(seed) => UserGenerator::with_seed(seed),
        None => UserGenerator::new(),
    };
    let users = generator
        .generate(request.count)
        .context("Failed to generate users")?;
    info!(count = users.len(), strategy = strategy.as_str(), "generated users");

    let started = Instant::now();
    let inserted = ui::with_spinner_async(
        format!("Inserting {} users ({})...", users.len(), strategy.as_str()),
        format!("Inserted {} users", users.len()),
        ctx.store.insert(&users, strategy),
    )
    .await
    .context("Failed to insert users")?;
    let elapsed = started.elapsed();

    let total = ctx
        .store
        .count_users()
        .await
        .context("Failed to count users")?;

    Ok(InsertStats::new(inserted, strategy.as_str(), elapsed, total))
}
