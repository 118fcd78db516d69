//! Schema creation and forward migration for the SQLite store.
//!
//! The applied schema version is kept in `PRAGMA user_version`. Each pending
//! [`Migration`] runs in its own transaction together with the version bump, so
//! a crash mid-step leaves the store at the previous version rather than half
//! rewritten.

use crate::app::error::StoreError;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// Tables owned by the data service, in creation order.
pub const TABLES: &[&str] = &[
    "ingredients",
    "panels",
    "allergens",
    "manufacturers",
    "distributors",
    "settings",
];

/// Column removed from `ingredients` by [`Migration::DropLegacyIngredientColumns`].
/// Its presence identifies a store created under the old layout.
pub const LEGACY_INGREDIENT_COLUMN: &str = "symbol";

/// Current `ingredients` columns, in table order.
pub const INGREDIENT_COLUMNS: &[&str] = &["id", "name", "parent_id", "unit", "rdi", "is_daily_value"];

fn create_ingredients_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            parent_id INTEGER,
            unit TEXT,
            rdi REAL,
            is_daily_value BOOLEAN,
            FOREIGN KEY (parent_id) REFERENCES ingredients(id)
        )"
    )
}

const CREATE_PANELS: &str = "CREATE TABLE IF NOT EXISTS panels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sku TEXT UNIQUE NOT NULL,
    json_data TEXT NOT NULL
)";

const CREATE_ALLERGENS: &str = "CREATE TABLE IF NOT EXISTS allergens (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)";

const CREATE_MANUFACTURERS: &str = "CREATE TABLE IF NOT EXISTS manufacturers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT
)";

const CREATE_DISTRIBUTORS: &str = "CREATE TABLE IF NOT EXISTS distributors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT
)";

const CREATE_SETTINGS: &str = "CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";

/// Ordered schema steps. A step's version is its position, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    /// Create every table that does not exist yet.
    CreateTables,
    /// Rebuild `ingredients` without `panel_name` and `symbol`.
    DropLegacyIngredientColumns,
}

impl Migration {
    pub const ALL: [Migration; 2] = [Migration::CreateTables, Migration::DropLegacyIngredientColumns];

    pub fn version(self) -> i64 {
        match self {
            Migration::CreateTables => 1,
            Migration::DropLegacyIngredientColumns => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Migration::CreateTables => "create_tables",
            Migration::DropLegacyIngredientColumns => "drop_legacy_ingredient_columns",
        }
    }

    async fn apply(self, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
        match self {
            Migration::CreateTables => {
                sqlx::query(&create_ingredients_sql("ingredients"))
                    .execute(&mut *conn)
                    .await?;
                for ddl in [
                    CREATE_PANELS,
                    CREATE_ALLERGENS,
                    CREATE_MANUFACTURERS,
                    CREATE_DISTRIBUTORS,
                    CREATE_SETTINGS,
                ] {
                    sqlx::query(ddl).execute(&mut *conn).await?;
                }
                Ok(())
            }
            Migration::DropLegacyIngredientColumns => {
                if !has_column(&mut *conn, "ingredients", LEGACY_INGREDIENT_COLUMN).await? {
                    debug!("ingredients has no legacy columns; nothing to rebuild");
                    return Ok(());
                }
                info!("Legacy ingredients layout detected; rebuilding table");
                sqlx::query("DROP TABLE IF EXISTS ingredients_new")
                    .execute(&mut *conn)
                    .await?;
                sqlx::query(&create_ingredients_sql("ingredients_new"))
                    .execute(&mut *conn)
                    .await?;
                // Ids are copied verbatim, so parent_id values stay valid after the rename.
                sqlx::query(
                    "INSERT INTO ingredients_new (id, name, parent_id, unit, rdi, is_daily_value)
                     SELECT id, name, parent_id, unit, rdi, is_daily_value FROM ingredients",
                )
                .execute(&mut *conn)
                .await?;
                sqlx::query("DROP TABLE ingredients").execute(&mut *conn).await?;
                sqlx::query("ALTER TABLE ingredients_new RENAME TO ingredients")
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            }
        }
    }
}

/// Highest version in [`Migration::ALL`].
pub fn latest_version() -> i64 {
    Migration::ALL.iter().map(|m| m.version()).max().unwrap_or(0)
}

/// Reads the applied schema version (0 for a store this service never touched).
pub async fn schema_version(pool: &SqlitePool) -> Result<i64, StoreError> {
    let v: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(v)
}

/// Brings the store up to [`latest_version`]. Returns the steps that ran; empty when
/// the store was already current.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<Vec<Migration>, StoreError> {
    let current = schema_version(pool).await?;
    let mut applied = Vec::new();

    for step in Migration::ALL {
        if step.version() <= current {
            continue;
        }
        let mut tx = pool.begin().await?;
        step.apply(tx.as_mut()).await?;
        // PRAGMA does not accept bound parameters.
        sqlx::query(&format!("PRAGMA user_version = {}", step.version()))
            .execute(tx.as_mut())
            .await?;
        tx.commit().await?;
        info!(version = step.version(), step = step.name(), "Applied schema migration");
        applied.push(step);
    }

    Ok(applied)
}

/// Column names of `table`, in declaration order.
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>, StoreError> {
    let cols: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info(?) ORDER BY cid")
            .bind(table)
            .fetch_all(pool)
            .await?;
    Ok(cols)
}

async fn has_column(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
) -> Result<bool, sqlx::Error> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
        .bind(table)
        .bind(column)
        .fetch_one(conn)
        .await?;
    Ok(n > 0)
}
