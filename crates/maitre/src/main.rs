//! Maitre CLI entry point.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use maitre::cli::{Cli, Commands};
use maitre::{demo, seed};
use maitre_dining::TableAllocator;
use maitre_models::Table;
use maitre_persistence::{DishCatalog, JsonStore};

#[tokio::main]
async fn main() {
    // Load .env if present (for MAITRE_DATA_DIR etc.).
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    fmt().with_env_filter(filter).with_target(false).init();

    let data_dir = cli.resolve_data_dir();

    let result = match cli.command {
        Some(Commands::Seed { force }) => seed::run(&data_dir, force),
        Some(Commands::Tables { preferences }) => show_tables(&data_dir, &preferences),
        Some(Commands::Demo {
            guest,
            allergies,
            preferences,
            load,
        }) => demo::run(&data_dir, &guest, &allergies, &preferences, load).await,
        Some(Commands::Menu) | None => show_menu(&data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn show_menu(data_dir: &Path) -> maitre::Result<()> {
    let catalog = DishCatalog::open(data_dir)?;

    for dish in catalog.all() {
        println!(
            "{:6} {:20} {:>8.2}  {}",
            dish.id.as_str(),
            dish.name,
            dish.price,
            dish.category.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn show_tables(data_dir: &Path, preferences: &[String]) -> maitre::Result<()> {
    let store: JsonStore<Table> = JsonStore::open(data_dir)?;
    let allocator = TableAllocator::new(std::sync::Arc::new(store));

    for table in allocator.available(preferences) {
        let tags: Vec<&str> = table.environment.iter().map(String::as_str).collect();
        println!(
            "{:4} seats {}  [{}]",
            table.id.as_str(),
            table.capacity,
            tags.join(", ")
        );
    }
    Ok(())
}
