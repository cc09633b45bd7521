//! Sample catalog and floor plan seeding.
//!
//! Stores are never auto-created by the session flow; this command is the
//! explicit operator action that lays them down.

use std::path::Path;

use tracing::info;

use maitre_models::{Dish, Guest, Order, Recommendation, Table};
use maitre_persistence::JsonStore;

use crate::Result;

/// Writes the sample stores under `data_dir`.
///
/// Refuses to touch an existing data set unless `force` is given.
pub fn run(data_dir: &Path, force: bool) -> Result<()> {
    let dish_file = JsonStore::<Dish>::store_path(data_dir);
    if dish_file.exists() && !force {
        println!(
            "data directory already seeded at {} (use --force to overwrite)",
            data_dir.display()
        );
        return Ok(());
    }

    let menu = sample_menu();
    let tables = sample_tables();
    let dish_count = menu.len();
    let table_count = tables.len();

    JsonStore::create(data_dir, menu)?;
    JsonStore::create(data_dir, tables)?;
    JsonStore::<Guest>::create(data_dir, Vec::new())?;
    JsonStore::<Recommendation>::create(data_dir, Vec::new())?;
    JsonStore::<Order>::create(data_dir, Vec::new())?;

    info!(data_dir = %data_dir.display(), "stores seeded");
    println!(
        "seeded {} dishes and {} tables at {}",
        dish_count,
        table_count,
        data_dir.display()
    );
    Ok(())
}

fn sample_menu() -> Vec<Dish> {
    let mut menu = vec![
        Dish::new("Bruschetta", 149.0)
            .with_ingredients(["bread", "tomato", "garlic", "olive oil", "basil"])
            .with_category("Starter")
            .with_description("Grilled bread with tomato and garlic."),
        Dish::new("Margherita Pizza", 299.0)
            .with_ingredients([
                "wheat flour",
                "tomato sauce",
                "mozzarella cheese",
                "basil",
                "olive oil",
            ])
            .with_category("Main Course")
            .with_description("Classic Italian pizza with tomato, mozzarella, and basil."),
        Dish::new("Penne Alfredo", 349.0)
            .with_ingredients(["penne pasta", "cream", "parmesan", "garlic", "butter"])
            .with_category("Main Course")
            .with_description("Rich creamy pasta in Alfredo sauce."),
        Dish::new("Tiramisu", 199.0)
            .with_ingredients(["mascarpone", "espresso", "ladyfingers", "cocoa"])
            .with_category("Dessert")
            .with_description("Coffee-soaked layers with mascarpone cream."),
    ];

    for (i, dish) in menu.iter_mut().enumerate() {
        dish.id = format!("D{:03}", i + 1).into();
    }
    menu
}

fn sample_tables() -> Vec<Table> {
    let specs: [(u32, &[&str]); 4] = [
        (2, &["window", "quiet"]),
        (4, &["outdoor"]),
        (2, &["booth", "quiet"]),
        (6, &["window"]),
    ];

    specs
        .iter()
        .enumerate()
        .map(|(i, (capacity, tags))| {
            let mut table = Table::new(*capacity).with_environment(tags.iter().copied());
            table.id = format!("T{}", i + 1).into();
            table
        })
        .collect()
}
