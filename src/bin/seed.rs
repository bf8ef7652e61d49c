use catalog_back::{config::AppConfig, database, error::Result, seed, store::PgProductStore};
use tracing::Level;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Seeding failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::create_pool(&config.database).await?;

    let seeded = seed::run(&PgProductStore::new(pool.clone())).await;
    pool.close().await;

    let count = seeded?;
    tracing::info!("Database seeded successfully with {} products", count);

    Ok(())
}
