//! Read-only hotel query handlers for the CLI.

use clap::Subcommand;
use hoteldb_core::HotelEntity;

const TITLE_WIDTH: usize = 40;

/// Sub-commands available under `hotels`.
#[derive(Debug, Subcommand)]
pub enum HotelsCommands {
    /// Show the most recently stored hotels
    List {
        /// Maximum number of hotels to show
        #[arg(long, default_value = "20")]
        limit: i64,

        /// Print hotels as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show how many hotels are stored
    Count,
}

/// Print the newest `limit` hotels.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_hotels_list(
    pool: &sqlx::PgPool,
    limit: i64,
    json: bool,
) -> anyhow::Result<()> {
    let rows = hoteldb_db::list_recent_hotels(pool, limit).await?;

    if json {
        let hotels: Vec<HotelEntity> = rows.into_iter().map(HotelEntity::from).collect();
        println!("{}", serde_json::to_string_pretty(&hotels)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no hotels stored; run `crawl` first");
        return Ok(());
    }

    println!(
        "{:<8}{:<20}{:>10}{:>8}  TITLE",
        "ID", "CITY", "PRICE", "RATING"
    );
    for row in &rows {
        println!(
            "{:<8}{:<20}{:>10}{:>8}  {}",
            row.id,
            truncate(row.city.as_deref().unwrap_or("-"), 18),
            fmt_number(row.price),
            fmt_number(row.rating),
            truncate(row.title.as_deref().unwrap_or("-"), TITLE_WIDTH),
        );
    }

    Ok(())
}

/// Print the number of stored hotels.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_hotels_count(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let count = hoteldb_db::count_hotels(pool).await?;
    println!("{count} hotel(s) stored");
    Ok(())
}

fn fmt_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}
