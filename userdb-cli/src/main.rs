//! userdb CLI - synthetic Ukrainian users in PostgreSQL
//!
//! Generates realistic user records, loads them row-by-row or through binary
//! COPY, and lists/searches what is stored. `userdb menu` runs the classic
//! interactive console loop.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;
mod ui;

use commands::generate::GenerateArgs;
use commands::query::{ListArgs, SearchArgs};
use config::UserdbConfig;

#[derive(Parser, Debug)]
#[command(
    name = "userdb",
    author,
    version,
    about = "Generate synthetic users and load/search them in PostgreSQL",
    long_about = "Generate realistic Ukrainian user records, insert them transactionally or \
                  via binary COPY, and list or search the users table."
)]
struct Cli {
    /// PostgreSQL connection URL (overrides the config file)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Config file (default: ~/.userdb/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the database is reachable
    Check,
    /// Create the users table if it does not exist
    Init,
    /// Generate users and insert them
    Generate(GenerateArgs),
    /// Count stored users
    Count,
    /// List users in id order
    List(ListArgs),
    /// Show one user by id
    Get {
        /// User id
        id: i32,
    },
    /// Case-insensitive substring search
    Search(SearchArgs),
    /// Interactive menu
    Menu,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so DATABASE_URL from .env feeds --database-url
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    config::log_dotenv(&dotenv);
    ui::init_quiet_mode(cli.quiet);

    let settings = UserdbConfig::load(cli.config.as_deref())?;
    let ctx = commands::Context::new(settings, cli.database_url.as_deref(), cli.json)?;

    match cli.command {
        Commands::Check => commands::run_check(&ctx).await?,
        Commands::Init => commands::run_init(&ctx).await?,
        Commands::Generate(args) => commands::generate::run_generate(&ctx, args).await?,
        Commands::Count => commands::query::run_count(&ctx).await?,
        Commands::List(args) => commands::query::run_list(&ctx, args).await?,
        Commands::Get { id } => commands::query::run_get(&ctx, id).await?,
        Commands::Search(args) => commands::query::run_search(&ctx, args).await?,
        Commands::Menu => commands::menu::run_menu(&ctx).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userdb",
            "count",
            "--json",
            "--database-url",
            "postgres://x/y",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.database_url.as_deref(), Some("postgres://x/y"));
        assert!(matches!(cli.command, Commands::Count));
    }

    #[test]
    fn list_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["userdb", "list"]).unwrap();
        match cli.command {
            Commands::List(args) => assert_eq!(args.page(), userdb_store::Page::default()),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["userdb", "list", "--limit", "10", "--offset", "30"]).unwrap();
        match cli.command {
            Commands::List(args) => assert_eq!(args.page(), userdb_store::Page::new(10, 30)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn get_requires_numeric_id() {
        assert!(Cli::try_parse_from(["userdb", "get", "abc"]).is_err());
        let cli = Cli::try_parse_from(["userdb", "get", "42"]).unwrap();
        assert!(matches!(cli.command, Commands::Get { id: 42 }));
    }
}
