use anyhow::Context;
use clap::Parser;
use userstore::config::{DatabaseSettings, Settings};
use userstore::db;

/// Apply the embedded database migrations and exit
#[derive(Debug, Parser)]
#[command(name = "migrate", version)]
struct Args {
    /// Connection URL; defaults to the application's DATABASE_URL settings
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let database = match args.database_url {
        Some(url) => DatabaseSettings::from_url(&url)?,
        None => {
            Settings::load()
                .context("Failed to load application settings")?
                .database
        }
    };

    println!(
        "Running migrations against {} on {}:{}",
        database.database_name, database.host, database.port
    );

    let pool = db::create_pool(&database).await?;
    db::run_migrations(&pool).await?;

    println!("✅ Migrations completed successfully");

    Ok(())
}
