use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use nightfall_app::scheduler::spawn_pipelines;
use nightfall_app::session::UiSession;
use nightfall_app::state::{AppState, CatalogEvent};
use nightfall_metadata::list::{DEFAULT_BASE_URL, ListingClient};
use nightfall_metadata::provider::DetailsProvider;
use nightfall_metadata::tmdb::TmdbClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // DB path: use NIGHTFALL_DB env or default
    let db_path = std::env::var("NIGHTFALL_DB").unwrap_or_else(|_| "nightfall.db".to_string());
    info!(db_path = %db_path, "connecting to store");

    let pool = nightfall_store::connect(&db_path)
        .await
        .context("failed to connect to store")?;

    nightfall_store::migrate::run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("migrations complete");

    let store = Arc::new(nightfall_store::kv::SqliteStore::new(pool));
    let state = AppState::new(store.clone());
    let session = UiSession::new(store);

    // Absent (or placeholder) credential means degrade mode: remote feeds
    // serve stubs and no enrichment runs.
    let details: Option<Arc<dyn DetailsProvider>> = match std::env::var("NIGHTFALL_TMDB_API_KEY") {
        Ok(key) if !key.is_empty() && key != "YOUR_API_KEY_HERE" => {
            Some(Arc::new(TmdbClient::new(key)))
        }
        _ => {
            info!("no TMDB API key configured, serving stub metadata only");
            None
        }
    };

    let list_base =
        std::env::var("NIGHTFALL_LIST_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let lists = Arc::new(ListingClient::new(list_base));

    // Log pipeline progress from the event bus.
    {
        let mut events = state.events.subscribe();
        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                match event {
                    CatalogEvent::ListLoaded { source, count } => {
                        info!(%source, count, "feed list loaded")
                    }
                    CatalogEvent::BatchCommitted { source, entries } => {
                        debug!(%source, entries, "enrichment batch committed")
                    }
                    CatalogEvent::PipelineFinished { source, enriched } => {
                        info!(%source, enriched, "pipeline finished")
                    }
                }
            }
        });
    }

    let mut tasks = tokio::task::JoinSet::new();
    spawn_pipelines(&state, lists, details, &mut tasks);

    // Restore the previous session against what is already renderable.
    let user_added = session.user_added().await;
    let catalog = state.full_catalog(&user_added).await;
    let snapshot = session.restore(&catalog).await;
    info!(
        section = %snapshot.section,
        detail_view = snapshot.detail_view,
        curated = state.curated.all_titles().len(),
        "session restored, initial render ready"
    );

    // The curated rows render immediately, so the host is idle from here.
    state.idle.signal_idle();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested, cancelling pipelines");
            state.cancel.cancel();
        }
        _ = async { while tasks.join_next().await.is_some() {} } => {}
    }
    while tasks.join_next().await.is_some() {}

    let user_added = session.user_added().await;
    let catalog = state.full_catalog(&user_added).await;
    let my_list = state.my_list(&user_added).await;
    let enriched = catalog.iter().filter(|e| e.is_enriched()).count();
    info!(
        titles = catalog.len(),
        enriched,
        my_list = my_list.len(),
        "catalog ready"
    );

    Ok(())
}
