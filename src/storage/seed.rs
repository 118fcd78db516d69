//! Starter dataset written into an empty store.

use crate::app::error::StoreError;
use crate::domain::model::{DAILY_VALUE_SYMBOL, NON_DAILY_VALUE_SYMBOL};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;

struct SeedIngredient {
    name: &'static str,
    parent: Option<&'static str>,
    unit: &'static str,
    rdi: Option<f64>,
    is_daily_value: bool,
}

// Parents precede their children.
const INGREDIENTS: &[SeedIngredient] = &[
    SeedIngredient { name: "Protein", parent: None, unit: "g", rdi: Some(50.0), is_daily_value: true },
    SeedIngredient { name: "Total Fat", parent: None, unit: "g", rdi: Some(78.0), is_daily_value: true },
    SeedIngredient { name: "Saturated Fat", parent: Some("Total Fat"), unit: "g", rdi: Some(20.0), is_daily_value: true },
    SeedIngredient { name: "Trans Fat", parent: Some("Total Fat"), unit: "g", rdi: None, is_daily_value: true },
    SeedIngredient { name: "Vitamin D", parent: None, unit: "mcg", rdi: Some(20.0), is_daily_value: true },
    SeedIngredient { name: "L-Carnitine", parent: None, unit: "mg", rdi: None, is_daily_value: false },
    SeedIngredient { name: "Energy Blend", parent: None, unit: "mg", rdi: None, is_daily_value: false },
    SeedIngredient { name: "Caffeine", parent: Some("Energy Blend"), unit: "mg", rdi: None, is_daily_value: false },
];

pub const ALLERGENS: &[&str] = &[
    "Milk", "Eggs", "Fish", "Shellfish", "Tree Nuts", "Peanuts", "Wheat", "Soy",
];

const MANUFACTURER: (&str, &str) = ("NutriCorp", "123 Health St, Wellness City, CA 90210");
const DISTRIBUTOR: (&str, &str) = ("FitDist", "456 Energy Rd, Fitness Town, NY 10001");

pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[(DAILY_VALUE_SYMBOL, "*"), (NON_DAILY_VALUE_SYMBOL, "†")];

/// Number of ingredient rows in the starter dataset.
pub fn ingredient_count() -> usize {
    INGREDIENTS.len()
}

/// Writes the starter dataset when `ingredients` is empty. Returns whether it ran.
///
/// Only the ingredient count is consulted: empty reference tables next to a
/// populated `ingredients` are left as they are.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<bool, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut ids: HashMap<&str, i64> = HashMap::with_capacity(INGREDIENTS.len());
    for seed in INGREDIENTS {
        let parent_id = seed.parent.and_then(|p| ids.get(p).copied());
        let id = sqlx::query(
            "INSERT INTO ingredients (name, parent_id, unit, rdi, is_daily_value) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(seed.name)
        .bind(parent_id)
        .bind(seed.unit)
        .bind(seed.rdi)
        .bind(seed.is_daily_value)
        .execute(tx.as_mut())
        .await?
        .last_insert_rowid();
        ids.insert(seed.name, id);
    }

    for name in ALLERGENS {
        sqlx::query("INSERT INTO allergens (name) VALUES (?)")
            .bind(*name)
            .execute(tx.as_mut())
            .await?;
    }

    for (table, (name, address)) in [("manufacturers", MANUFACTURER), ("distributors", DISTRIBUTOR)] {
        sqlx::query(&format!("INSERT INTO {table} (name, address) VALUES (?, ?)"))
            .bind(name)
            .bind(address)
            .execute(tx.as_mut())
            .await?;
    }

    // Symbols someone already chose are kept.
    for (key, value) in DEFAULT_SETTINGS {
        sqlx::query("INSERT INTO settings (key, value) VALUES (?, ?) ON CONFLICT(key) DO NOTHING")
            .bind(*key)
            .bind(*value)
            .execute(tx.as_mut())
            .await?;
    }

    tx.commit().await?;
    info!(ingredients = INGREDIENTS.len(), allergens = ALLERGENS.len(), "Seeded initial data");
    Ok(true)
}
