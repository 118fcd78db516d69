use supplement_admin::infra::{config, logging};
use supplement_admin::storage::schema::{self, TABLES};
use supplement_admin::DatabaseService;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--no-init]\n\
         \n\
         Opens the store at data/supplement.db (relative to the working directory),\n\
         applies pending schema steps and the starter dataset, then prints the\n\
         schema version and per-table row counts.\n\
         \n\
         --no-init   only inspect; do not migrate or seed\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let init = !args.iter().any(|a| a == "--no-init");

    let db_path = config::database_path();
    println!("> Preflight:");
    println!("  store={}", db_path.display());
    println!("  port={}", config::port());
    println!("  client={}", config::static_dir().display());

    let db_service = DatabaseService::open(&db_path).await?;
    let pool = db_service.pool();

    if init {
        let report = db_service.initialize().await?;
        for step in &report.migrations {
            println!("  applied schema step {} ({})", step.version(), step.name());
        }
        if report.seeded {
            println!("  seeded starter dataset");
        }
    }

    let version = schema::schema_version(pool).await?;
    println!(
        "  schema version: {} (latest {})",
        version,
        schema::latest_version()
    );

    for table in TABLES {
        let columns = schema::table_columns(pool, table).await?;
        if columns.is_empty() {
            println!("  {:<14} missing", table);
            continue;
        }
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await?;
        println!("  {:<14} {:>5} rows  [{}]", table, count, columns.join(", "));
    }

    if version < schema::latest_version() {
        return Err(anyhow::anyhow!(
            "Store is behind the latest schema. Re-run without --no-init"
        ));
    }

    println!("> Preflight OK.");
    Ok(())
}
