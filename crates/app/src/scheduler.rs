//! Progressive enrichment scheduler.
//!
//! One pipeline per remote feed: publish the cached list if fresh, fetch
//! the live list, then enrich stubs in fixed-size batches — franchise
//! matches and the head of the list first, the remainder once the host
//! goes idle. Each batch runs its lookups concurrently, joins, commits by
//! merge key into the shared feed, and persists the whole collection.
//! Batches commit strictly in cursor order within one feed; feeds are
//! independent of each other.
//!
//! Cancellation is cooperative: checked at the top of every batch, before
//! every lookup, and during inter-batch delays. Committed batches stay.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use nightfall_catalog::browse::is_franchise_title;
use nightfall_core::{CatalogEntry, SourceKind};
use nightfall_metadata::enrich::enrich_entry;
use nightfall_metadata::provider::{DetailsProvider, ListSource};
use nightfall_store::cache::{DEFAULT_TTL, TtlCache};

use crate::idle::IdleGate;
use crate::state::{AppState, CatalogEvent, Feed};

/// Cache namespace owned by one feed. No two pipelines share one.
pub fn cache_namespace(source: SourceKind) -> &'static str {
    match source {
        SourceKind::Movie => "nightfall.cache.movies",
        SourceKind::Tv => "nightfall.cache.tvshows",
        SourceKind::Anime => "nightfall.cache.anime",
    }
}

/// Batching knobs for one feed's pipeline.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub batch_size: usize,
    /// Head-of-list size folded into the high-priority set. Everything is
    /// high priority when this covers the whole list.
    pub priority_head: usize,
    pub high_delay: Duration,
    pub low_delay: Duration,
    pub idle_timeout: Duration,
}

impl BatchPlan {
    pub fn for_source(source: SourceKind) -> Self {
        match source {
            // The anime feed is large; only franchise picks and the first
            // page block the idle gate.
            SourceKind::Anime => Self {
                batch_size: 25,
                priority_head: 250,
                ..Self::base()
            },
            SourceKind::Movie | SourceKind::Tv => Self {
                batch_size: 30,
                priority_head: usize::MAX,
                ..Self::base()
            },
        }
    }

    fn base() -> Self {
        Self {
            batch_size: 30,
            priority_head: usize::MAX,
            high_delay: Duration::from_millis(250),
            low_delay: Duration::from_millis(450),
            idle_timeout: Duration::from_secs(3),
        }
    }
}

/// One feed's load-then-enrich pipeline.
pub struct EnrichmentPipeline {
    pub source: SourceKind,
    pub lists: Arc<dyn ListSource>,
    /// `None` means no metadata credential is configured: the feed serves
    /// stubs indefinitely. A degrade mode, not an error.
    pub details: Option<Arc<dyn DetailsProvider>>,
    pub cache: TtlCache,
    pub feed: Feed,
    pub events: broadcast::Sender<CatalogEvent>,
    pub idle: Arc<IdleGate>,
    pub cancel: CancellationToken,
    pub plan: BatchPlan,
}

impl EnrichmentPipeline {
    pub fn new(
        state: &AppState,
        source: SourceKind,
        lists: Arc<dyn ListSource>,
        details: Option<Arc<dyn DetailsProvider>>,
    ) -> Self {
        Self {
            source,
            lists,
            details,
            cache: state.cache.clone(),
            feed: state.feed(source),
            events: state.events.clone(),
            idle: state.idle.clone(),
            cancel: state.cancel.clone(),
            plan: BatchPlan::for_source(source),
        }
    }

    pub async fn run(self) {
        let namespace = cache_namespace(self.source);

        if let Some(cached) = self.cache.read(namespace, DEFAULT_TTL).await {
            if !cached.is_empty() {
                info!(source = %self.source, entries = cached.len(), "serving cached list");
                *self.feed.write().await = cached;
            }
        }

        let stubs = match self.lists.fetch_list(self.source, &self.cancel).await {
            Ok(stubs) => stubs,
            Err(e) => {
                // Prior cached/in-memory state stays; no retry.
                debug!(source = %self.source, error = %e, "list fetch failed, keeping prior state");
                return;
            }
        };

        info!(source = %self.source, entries = stubs.len(), "list loaded");
        *self.feed.write().await = stubs.clone();
        self.cache.write(namespace, &stubs).await;
        let _ = self.events.send(CatalogEvent::ListLoaded {
            source: self.source,
            count: stubs.len(),
        });

        let Some(details) = self.details.clone() else {
            debug!(source = %self.source, "no metadata credential, serving stubs");
            let _ = self.events.send(CatalogEvent::PipelineFinished {
                source: self.source,
                enriched: false,
            });
            return;
        };

        let (high, low) = partition(&stubs, self.plan.priority_head);
        self.run_batches(&details, &high, self.plan.high_delay).await;

        if !low.is_empty() && !self.cancel.is_cancelled() {
            self.idle.wait(self.plan.idle_timeout).await;
            self.run_batches(&details, &low, self.plan.low_delay).await;
        }

        let _ = self.events.send(CatalogEvent::PipelineFinished {
            source: self.source,
            enriched: true,
        });
    }

    async fn run_batches(
        &self,
        details: &Arc<dyn DetailsProvider>,
        candidates: &[CatalogEntry],
        delay: Duration,
    ) {
        for batch in candidates.chunks(self.plan.batch_size) {
            if self.cancel.is_cancelled() {
                return;
            }

            let mut lookups = JoinSet::new();
            for entry in batch {
                let details = details.clone();
                let entry = entry.clone();
                let cancel = self.cancel.clone();
                let source = self.source;
                lookups.spawn(async move {
                    if cancel.is_cancelled() {
                        entry
                    } else {
                        enrich_entry(details.as_ref(), &entry, source).await
                    }
                });
            }

            let mut enriched = Vec::with_capacity(batch.len());
            while let Some(res) = lookups.join_next().await {
                if let Ok(entry) = res {
                    enriched.push(entry);
                }
            }

            let committed = self.commit(&enriched).await;
            let _ = self.events.send(CatalogEvent::BatchCommitted {
                source: self.source,
                entries: committed,
            });

            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Replace matching feed entries and persist the whole collection.
    async fn commit(&self, enriched: &[CatalogEntry]) -> usize {
        let by_key: HashMap<String, &CatalogEntry> = enriched
            .iter()
            .filter_map(|e| commit_key(e).map(|k| (k, e)))
            .collect();

        let snapshot = {
            let mut feed = self.feed.write().await;
            let mut replaced = 0;
            for item in feed.iter_mut() {
                if let Some(update) = commit_key(item).and_then(|k| by_key.get(&k)) {
                    *item = (*update).clone();
                    replaced += 1;
                }
            }
            (feed.clone(), replaced)
        };

        self.cache.write(cache_namespace(self.source), &snapshot.0).await;
        snapshot.1
    }
}

/// Lookup key for batch commits. The remote id alone, when present: an
/// ambiguous anime entry may flip kind during enrichment, which would
/// change its full identity key and orphan the update.
fn commit_key(entry: &CatalogEntry) -> Option<String> {
    match entry.tmdb_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => Some(id.to_string()),
        None => entry.identity_key(),
    }
}

/// Split stubs into the high-priority set (franchise matches plus the head
/// of the list, deduplicated, in that order) and the low-priority
/// remainder.
fn partition(
    stubs: &[CatalogEntry],
    priority_head: usize,
) -> (Vec<CatalogEntry>, Vec<CatalogEntry>) {
    let head = priority_head.min(stubs.len());
    let mut high = Vec::new();
    let mut seen = HashSet::new();

    for entry in stubs
        .iter()
        .filter(|e| is_franchise_title(&e.title))
        .chain(stubs[..head].iter())
    {
        let Some(key) = entry.identity_key() else {
            continue;
        };
        if seen.insert(key) {
            high.push(entry.clone());
        }
    }

    let low = stubs
        .iter()
        .filter(|e| {
            e.identity_key()
                .map(|k| !seen.contains(&k))
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    (high, low)
}

/// Spawn one pipeline per remote feed onto the provided join set.
pub fn spawn_pipelines(
    state: &AppState,
    lists: Arc<dyn ListSource>,
    details: Option<Arc<dyn DetailsProvider>>,
    tasks: &mut JoinSet<()>,
) {
    for source in [SourceKind::Movie, SourceKind::Tv, SourceKind::Anime] {
        let pipeline = EnrichmentPipeline::new(state, source, lists.clone(), details.clone());
        tasks.spawn(pipeline.run());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_core::MediaKind;

    fn stub(title: &str, id: u32) -> CatalogEntry {
        let mut e = CatalogEntry::new(title, MediaKind::Tv);
        e.tmdb_id = Some(id.to_string());
        e
    }

    #[test]
    fn partition_puts_franchise_matches_first() {
        let stubs = vec![
            stub("Monster", 1),
            stub("Bleach", 2),
            stub("Frieren", 3),
            stub("One Piece", 4),
        ];
        let (high, low) = partition(&stubs, 1);
        let titles: Vec<_> = high.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Bleach", "One Piece", "Monster"]);
        let titles: Vec<_> = low.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Frieren"]);
    }

    #[test]
    fn partition_with_full_head_leaves_low_empty() {
        let stubs = vec![stub("A", 1), stub("B", 2)];
        let (high, low) = partition(&stubs, usize::MAX);
        assert_eq!(high.len(), 2);
        assert!(low.is_empty());
    }

    #[test]
    fn partition_sets_are_disjoint() {
        let stubs: Vec<_> = (0..20).map(|i| stub(&format!("t{i}"), i)).collect();
        let (high, low) = partition(&stubs, 5);
        let high_keys: HashSet<_> = high.iter().filter_map(|e| e.identity_key()).collect();
        assert!(low.iter().all(|e| !high_keys.contains(&e.identity_key().unwrap())));
        assert_eq!(high.len() + low.len(), stubs.len());
    }

    #[test]
    fn plans_match_feed_characteristics() {
        let anime = BatchPlan::for_source(SourceKind::Anime);
        assert_eq!(anime.batch_size, 25);
        assert_eq!(anime.priority_head, 250);

        let movie = BatchPlan::for_source(SourceKind::Movie);
        assert_eq!(movie.batch_size, 30);
        assert_eq!(movie.priority_head, usize::MAX);
        assert!(movie.high_delay < movie.low_delay);
    }
}
