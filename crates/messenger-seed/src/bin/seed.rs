//! Seeds the messenger database with users, chats, memberships and messages.
//!
//! Run with:
//! ```
//! SEED_USERS=100 SEED_CHATS=20 SEED_MESSAGES=500 cargo run -p messenger-seed --bin seed
//! ```
//!
//! Set `SEED_DRY_RUN=1` to generate into memory without a database.

use messenger_seed::builders::ScenarioBuilder;
use messenger_seed::config::SeedConfig;
use messenger_seed::db::{ChatStore, MemoryStore, PgStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;

    let store: Box<dyn ChatStore> = if config.dry_run {
        tracing::info!("Dry run: seeding into memory");
        Box::new(MemoryStore::new())
    } else {
        let store = PgStore::connect(config.database.connect_options()?).await?;
        tracing::info!("Connected to database");
        if config.create_schema {
            store.create_schema().await?;
        }
        Box::new(store)
    };

    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = ScenarioBuilder::from_config(&config)?
        .with_metrics(true)
        .build(store.as_ref(), &mut rng)
        .await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Users: {}", result.user_ids.len());
    tracing::info!("  Chats: {}", result.chat_ids.len());
    tracing::info!("  Memberships: {}", result.membership_count);
    tracing::info!("  Messages: {}", result.message_count);
    if let Some(metrics) = &result.metrics {
        tracing::info!("Metrics: {}", serde_json::to_string(metrics)?);
    }

    Ok(())
}
