mod crawl;
mod hotels;
mod sink;

use clap::{Parser, Subcommand};
use hoteldb_core::Environment;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::hotels::HotelsCommands;

#[derive(Debug, Parser)]
#[command(name = "hoteldb-cli")]
#[command(about = "Hotel listing crawler and store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl randomly chosen cities and store their hotels
    Crawl {
        /// Number of crawl units to run; each visits one random city
        #[arg(long, default_value_t = 1)]
        units: usize,

        /// Landing page to discover cities from (defaults to `HOTELDB_START_URL`)
        #[arg(long)]
        start_url: Option<String>,

        /// Keep hotels in memory and print them as JSON instead of writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Query stored hotels
    Hotels {
        #[command(subcommand)]
        command: HotelsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = hoteldb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(use_ansi_logs(&config.env))
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let Some(command) = cli.command else {
        println!("hoteldb-cli ready; run with --help to list commands");
        return Ok(());
    };

    match command {
        Commands::Crawl {
            units,
            start_url,
            dry_run,
        } => {
            let start_url = start_url.unwrap_or_else(|| config.start_url.clone());
            let cancel = cancel_on_ctrl_c();
            if dry_run {
                crawl::run_crawl_dry(&config, &start_url, units, &cancel).await?;
            } else {
                let pool = connect(&config).await?;
                hoteldb_db::run_migrations(&pool).await?;
                crawl::run_crawl(&pool, &config, &start_url, units, &cancel).await?;
            }
        }
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    hoteldb_db::health_check(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = hoteldb_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Commands::Hotels { command } => {
            let pool = connect(&config).await?;
            match command {
                HotelsCommands::List { limit, json } => {
                    hotels::run_hotels_list(&pool, limit, json).await?;
                }
                HotelsCommands::Count => hotels::run_hotels_count(&pool).await?,
            }
        }
    }

    Ok(())
}

async fn connect(config: &hoteldb_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = hoteldb_db::PoolConfig::from_app_config(config);
    let pool = hoteldb_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

/// Returns a token that is cancelled on the first Ctrl-C. Units finish the
/// hotel they are on and stop.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; stopping after in-flight hotels");
            token.cancel();
        }
    });
    cancel
}

/// ANSI colour codes are off in production.
fn use_ansi_logs(env: &Environment) -> bool {
    !matches!(env, Environment::Production)
}
