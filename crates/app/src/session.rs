//! Persisted UI session.
//!
//! Mirrors what the presentation layer remembers between sessions: the
//! current section, the selected title, whether the detail view was open,
//! and the user's own additions. Storage failures are swallowed — losing
//! session state is never worse than a fresh visit.

use std::sync::Arc;

use tracing::debug;

use nightfall_core::CatalogEntry;
use nightfall_store::kv::KeyValueStore;

pub mod keys {
    pub const SECTION: &str = "nightfall.currentSection";
    pub const SELECTED: &str = "nightfall.selectedTitle";
    pub const DETAIL_VIEW: &str = "nightfall.isDetailView";
    pub const LAST_SECTION: &str = "nightfall.lastSection";
    pub const USER_ADDED: &str = "nightfall.userAddedTitles";
}

pub const DEFAULT_SECTION: &str = "home";

/// Session state restored at startup.
#[derive(Debug, Clone)]
pub struct UiSnapshot {
    pub section: String,
    pub selected: Option<CatalogEntry>,
    pub detail_view: bool,
}

pub struct UiSession {
    store: Arc<dyn KeyValueStore>,
}

impl UiSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "session read failed");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            debug!(key, error = %e, "session write failed");
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            debug!(key, error = %e, "session remove failed");
        }
    }

    /// Rebuild the last session against the current catalog. The detail
    /// view only survives when its title still resolves.
    pub async fn restore(&self, catalog: &[CatalogEntry]) -> UiSnapshot {
        let section = self
            .get(keys::SECTION)
            .await
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());

        let selected = match self.get(keys::SELECTED).await {
            Some(title) => catalog.iter().find(|e| e.title == title).cloned(),
            None => None,
        };

        let detail_view =
            self.get(keys::DETAIL_VIEW).await.as_deref() == Some("true") && selected.is_some();

        UiSnapshot {
            section,
            selected,
            detail_view,
        }
    }

    /// Navigate to a section, leaving any detail view.
    pub async fn navigate(&self, section: &str) {
        self.remove(keys::SELECTED).await;
        self.set(keys::DETAIL_VIEW, "false").await;
        self.set(keys::SECTION, section).await;
    }

    /// Open the detail view for `chosen`, resolving the richest matching
    /// entry from the catalog. Remembers where the user came from.
    pub async fn select(&self, catalog: &[CatalogEntry], chosen: &CatalogEntry) -> CatalogEntry {
        let current = self
            .get(keys::SECTION)
            .await
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());
        self.set(keys::LAST_SECTION, &current).await;

        let resolved = catalog
            .iter()
            .find(|e| e.same_content(chosen))
            .cloned()
            .unwrap_or_else(|| chosen.clone());

        self.set(keys::SELECTED, &resolved.title).await;
        self.set(keys::DETAIL_VIEW, "true").await;
        resolved
    }

    /// Close the detail view; returns the section to land on.
    pub async fn back_to_browse(&self) -> String {
        self.remove(keys::SELECTED).await;
        self.set(keys::DETAIL_VIEW, "false").await;
        let section = self
            .get(keys::LAST_SECTION)
            .await
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());
        self.set(keys::SECTION, &section).await;
        section
    }

    /// The user's own additions, oldest first.
    pub async fn user_added(&self) -> Vec<CatalogEntry> {
        let Some(raw) = self.get(keys::USER_ADDED).await else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(error = %e, "user-added list malformed, starting empty");
                Vec::new()
            }
        }
    }

    pub async fn add_entry(&self, entry: CatalogEntry) {
        let mut entries = self.user_added().await;
        entries.push(entry);
        self.save_user_added(&entries).await;
    }

    /// Remove by id when both sides have one, by title otherwise.
    pub async fn remove_entry(&self, entry: &CatalogEntry) {
        let mut entries = self.user_added().await;
        entries.retain(|e| !e.same_content(entry));
        self.save_user_added(&entries).await;
    }

    async fn save_user_added(&self, entries: &[CatalogEntry]) {
        match serde_json::to_string(entries) {
            Ok(raw) => self.set(keys::USER_ADDED, &raw).await,
            Err(e) => debug!(error = %e, "user-added list serialize failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_core::MediaKind;
    use nightfall_store::kv::MemoryStore;

    fn session() -> UiSession {
        UiSession::new(Arc::new(MemoryStore::new()))
    }

    fn entry(title: &str, id: Option<&str>) -> CatalogEntry {
        let mut e = CatalogEntry::new(title, MediaKind::Movie);
        e.tmdb_id = id.map(String::from);
        e
    }

    #[tokio::test]
    async fn fresh_session_restores_defaults() {
        let snapshot = session().restore(&[]).await;
        assert_eq!(snapshot.section, "home");
        assert!(snapshot.selected.is_none());
        assert!(!snapshot.detail_view);
    }

    #[tokio::test]
    async fn select_resolves_full_entry_and_back_returns_to_last_section() {
        let session = session();
        session.navigate("tvshows").await;

        let mut full = entry("Foo", Some("42"));
        full.description = "rich".into();
        let catalog = vec![full.clone()];

        let picked = session.select(&catalog, &entry("Foo", Some("42"))).await;
        assert_eq!(picked.description, "rich");

        let snapshot = session.restore(&catalog).await;
        assert!(snapshot.detail_view);
        assert_eq!(snapshot.selected.unwrap().title, "Foo");

        let section = session.back_to_browse().await;
        assert_eq!(section, "tvshows");
        let snapshot = session.restore(&catalog).await;
        assert!(!snapshot.detail_view);
        assert_eq!(snapshot.section, "tvshows");
    }

    #[tokio::test]
    async fn detail_view_dropped_when_title_no_longer_resolves() {
        let session = session();
        let catalog = vec![entry("Foo", Some("42"))];
        session.select(&catalog, &catalog[0]).await;

        // Catalog without the selected title: stale selection is ignored.
        let snapshot = session.restore(&[]).await;
        assert!(snapshot.selected.is_none());
        assert!(!snapshot.detail_view);
    }

    #[tokio::test]
    async fn user_added_entries_roundtrip_and_remove_by_id_or_title() {
        let session = session();
        session.add_entry(entry("Mine", Some("7"))).await;
        session.add_entry(entry("Other", None)).await;
        assert_eq!(session.user_added().await.len(), 2);

        // Different title, same id: removed.
        session.remove_entry(&entry("Renamed", Some("7"))).await;
        let left = session.user_added().await;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].title, "Other");

        // No ids on either side: removed by title.
        session.remove_entry(&entry("Other", None)).await;
        assert!(session.user_added().await.is_empty());
    }
}
