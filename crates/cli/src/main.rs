use std::sync::Arc;

use anyhow::Context;
use cinesearch_catalog::CatalogApi;
use cinesearch_core::config::PipelineConfig;
use cinesearch_core::search_count::CounterStore;
use cinesearch_db::PgCounterStore;
use cinesearch_events::EventBus;
use cinesearch_pipeline::{MemoryCounterStore, SearchPipeline};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinesearch=info,cinesearch_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PipelineConfig::from_env().context("invalid pipeline configuration")?;
    let catalog = CatalogApi::from_config(&config).context("failed to build catalog client")?;
    tracing::info!(base_url = %catalog.base_url(), "Catalog client ready");

    let store = counter_store().await?;
    let events = Arc::new(EventBus::default());
    let pipeline = SearchPipeline::new(config, Arc::new(catalog), store, events);

    let renderer = tokio::spawn(render::run(pipeline.subscribe()));
    pipeline.init()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line.context("failed to read stdin")? {
                Some(line) => pipeline.on_raw_term_change(line),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    pipeline.shutdown().await;
    drop(pipeline);
    renderer.await.context("renderer task failed")?;
    Ok(())
}

/// Postgres when `DATABASE_URL` is set, otherwise a process-local store.
async fn counter_store() -> anyhow::Result<Arc<dyn CounterStore>> {
    let Some(database_url) = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()) else {
        tracing::warn!("DATABASE_URL not set, search counts will not persist");
        return Ok(Arc::new(MemoryCounterStore::new()));
    };

    let pool = cinesearch_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connection pool created");

    cinesearch_db::health_check(&pool)
        .await
        .context("database health check failed")?;
    tracing::info!("Database health check passed");

    cinesearch_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgCounterStore::new(pool)))
}
