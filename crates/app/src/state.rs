use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tokio_util::sync::CancellationToken;

use nightfall_catalog::browse;
use nightfall_catalog::curated::CuratedCatalog;
use nightfall_core::{CatalogEntry, SourceKind};
use nightfall_store::cache::TtlCache;
use nightfall_store::kv::KeyValueStore;

use crate::idle::IdleGate;

/// One remote feed's current in-memory collection. Written by its pipeline
/// between suspension points, read by everything else.
pub type Feed = Arc<RwLock<Vec<CatalogEntry>>>;

/// Progress events emitted by the enrichment pipelines.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CatalogEvent {
    #[serde(rename = "list_loaded")]
    ListLoaded { source: SourceKind, count: usize },
    #[serde(rename = "batch_committed")]
    BatchCommitted { source: SourceKind, entries: usize },
    #[serde(rename = "pipeline_finished")]
    PipelineFinished { source: SourceKind, enriched: bool },
}

/// Top-level application state. Owns the curated catalog, the three remote
/// feeds, and the shared plumbing the pipelines need.
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub cache: TtlCache,
    pub curated: CuratedCatalog,
    pub movies: Feed,
    pub tv_shows: Feed,
    pub anime: Feed,
    pub events: broadcast::Sender<CatalogEvent>,
    pub idle: Arc<IdleGate>,
    pub cancel: CancellationToken,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            cache: TtlCache::new(store.clone()),
            store,
            curated: CuratedCatalog::load(),
            movies: Feed::default(),
            tv_shows: Feed::default(),
            anime: Feed::default(),
            events,
            idle: Arc::new(IdleGate::new()),
            cancel: CancellationToken::new(),
        }
    }

    pub fn feed(&self, source: SourceKind) -> Feed {
        match source {
            SourceKind::Movie => self.movies.clone(),
            SourceKind::Tv => self.tv_shows.clone(),
            SourceKind::Anime => self.anime.clone(),
        }
    }

    /// The full searchable catalog at this instant.
    pub async fn full_catalog(&self, user_added: &[CatalogEntry]) -> Vec<CatalogEntry> {
        let curated = self.curated.all_titles();
        let movies = self.movies.read().await;
        let tv_shows = self.tv_shows.read().await;
        let anime = self.anime.read().await;
        browse::full_catalog(&curated, user_added, &movies, &tv_shows, &anime)
    }

    /// "My List" at this instant: pinned franchise picks first.
    pub async fn my_list(&self, user_added: &[CatalogEntry]) -> Vec<CatalogEntry> {
        let anime = self.anime.read().await;
        browse::my_list(&self.curated.my_list, user_added, &anime)
    }
}
