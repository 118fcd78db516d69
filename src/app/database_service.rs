//! The supplement Data Service.
//!
//! Owns the SQLite pool and maps every API operation onto a single
//! parameterized statement. It keeps no state of its own: each call reads or
//! writes the store directly.

use crate::app::error::StoreError;
use crate::domain::model::{
    Allergen, Ingredient, IngredientGroups, NewIngredient, NewPanel, Organization,
    OrganizationKind, Panel, Settings, SettingsUpdate,
};
use crate::storage::{self, Migration};
use serde_json::{Map, Value as JsonValue};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// What [`DatabaseService::initialize`] did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub migrations: Vec<Migration>,
    pub seeded: bool,
}

/// The main service that manages database interaction.
#[derive(Clone)]
pub struct DatabaseService {
    pool: SqlitePool,
}

impl DatabaseService {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Opens (creating if missing) the store file at `path`.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let svc = Self::connect_with(options).await?;
        info!(path = %path.display(), "Connected to SQLite");
        Ok(svc)
    }

    /// A private in-memory store; lives as long as the returned service.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect_with(options).await
    }

    /// Connects with a single long-lived connection.
    ///
    /// Foreign keys stay unenforced, so deleting a parent ingredient leaves its
    /// children's `parent_id` dangling instead of failing.
    pub async fn connect_with(options: SqliteConnectOptions) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options.foreign_keys(false))
            .await?;
        Ok(Self { pool })
    }

    /// Applies pending schema migrations, then seeds an empty store.
    pub async fn initialize(&self) -> Result<InitReport, StoreError> {
        let migrations = storage::ensure_schema(&self.pool).await?;
        let seeded = storage::seed_if_empty(&self.pool).await?;
        Ok(InitReport { migrations, seeded })
    }

    // --- ingredients ---

    /// Rows written by older clients may hold text where numbers belong; those
    /// columns decode to `None` (or a truthiness test for the flag) instead of
    /// failing the whole listing.
    pub async fn list_ingredients(&self) -> Result<IngredientGroups, StoreError> {
        let rows: Vec<Ingredient> = sqlx::query_as(
            "SELECT id,
                    CAST(name AS TEXT) AS name,
                    CASE WHEN typeof(parent_id) = 'integer' THEN parent_id END AS parent_id,
                    CAST(unit AS TEXT) AS unit,
                    CASE WHEN typeof(rdi) IN ('integer', 'real') THEN CAST(rdi AS REAL) END AS rdi,
                    CASE typeof(is_daily_value)
                        WHEN 'null' THEN 0
                        WHEN 'text' THEN lower(trim(is_daily_value)) NOT IN ('', 'false', 'f', '0')
                        WHEN 'blob' THEN length(is_daily_value) > 0
                        ELSE is_daily_value <> 0
                    END AS is_daily_value
             FROM ingredients ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(IngredientGroups::partition(rows))
    }

    /// Inserts a row and returns the id the store assigned.
    pub async fn create_ingredient(&self, new: &NewIngredient) -> Result<i64, StoreError> {
        let id = sqlx::query(
            "INSERT INTO ingredients (name, parent_id, unit, rdi, is_daily_value) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(new.name.as_deref())
        .bind(new.parent_id)
        .bind(new.unit.as_deref())
        .bind(new.rdi)
        .bind(new.is_daily_value)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        debug!(id, "Inserted ingredient");
        Ok(id)
    }

    /// Replaces all mutable fields of `id`. Returns the number of rows touched (0 or 1).
    pub async fn update_ingredient(&self, id: i64, new: &NewIngredient) -> Result<u64, StoreError> {
        let affected = sqlx::query(
            "UPDATE ingredients SET name = ?, parent_id = ?, unit = ?, rdi = ?, is_daily_value = ?
             WHERE id = ?",
        )
        .bind(new.name.as_deref())
        .bind(new.parent_id)
        .bind(new.unit.as_deref())
        .bind(new.rdi)
        .bind(new.is_daily_value)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(affected)
    }

    /// Deletes `id` without touching its children. Returns the number of rows removed.
    pub async fn delete_ingredient(&self, id: i64) -> Result<u64, StoreError> {
        let affected = sqlx::query("DELETE FROM ingredients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected)
    }

    // --- panels ---

    /// Stores the panel document; fails when the SKU is missing or already taken.
    pub async fn create_panel(&self, panel: &NewPanel) -> Result<i64, StoreError> {
        let json_data = panel.json_data()?;
        let id = sqlx::query("INSERT INTO panels (sku, json_data) VALUES (?, ?)")
            .bind(panel.sku.as_deref())
            .bind(json_data)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        Ok(id)
    }

    pub async fn list_panels(&self) -> Result<Vec<Panel>, StoreError> {
        let rows = sqlx::query("SELECT id, sku, json_data FROM panels ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let mut panels = Vec::with_capacity(rows.len());
        for row in rows {
            let json_data: String = row.try_get("json_data")?;
            let fields = match serde_json::from_str::<JsonValue>(&json_data)? {
                JsonValue::Object(map) => map,
                // A scalar document has no fields to flatten.
                _ => Map::new(),
            };
            panels.push(Panel {
                id: row.try_get("id")?,
                sku: row.try_get("sku")?,
                fields,
            });
        }
        Ok(panels)
    }

    // --- settings ---

    pub async fn get_settings(&self) -> Result<Settings, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Upserts each present key. Returns how many keys were written.
    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<usize, StoreError> {
        let entries = update.entries();
        let mut tx = self.pool.begin().await?;
        for (key, value) in &entries {
            sqlx::query(
                "INSERT INTO settings (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(*key)
            .bind(value.as_str())
            .execute(tx.as_mut())
            .await?;
        }
        tx.commit().await?;
        Ok(entries.len())
    }

    // --- reference tables ---

    pub async fn list_allergens(&self) -> Result<Vec<Allergen>, StoreError> {
        let rows = sqlx::query_as("SELECT id, name FROM allergens ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_organizations(
        &self,
        kind: OrganizationKind,
    ) -> Result<Vec<Organization>, StoreError> {
        let sql = format!("SELECT id, name, address FROM {} ORDER BY id", kind.table_name());
        let rows = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
