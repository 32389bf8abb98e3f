//! Remote listing client.
//!
//! One GET per feed against `<base>/{movie|tv|anime}` yields minimal stub
//! records (`{ data: [{ tmdb, title, ...optional art }] }`). Results are
//! truncated per feed to bound memory and the enrichment workload.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use nightfall_core::{CatalogEntry, SourceKind};

use crate::provider::ListSource;
use crate::{MetadataError, embed, placeholder};

pub const DEFAULT_BASE_URL: &str = "https://vidsrc.cc/api/list";

const MOVIE_LIST_LIMIT: usize = 240;
const SERIES_LIST_LIMIT: usize = 1500;

/// Maximum stubs kept per feed.
pub fn list_limit(source: SourceKind) -> usize {
    match source {
        SourceKind::Movie => MOVIE_LIST_LIMIT,
        SourceKind::Tv | SourceKind::Anime => SERIES_LIST_LIMIT,
    }
}

pub struct ListingClient {
    base_url: String,
    client: reqwest::Client,
}

impl ListingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ListingClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ListSource for ListingClient {
    async fn fetch_list(
        &self,
        source: SourceKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<CatalogEntry>, MetadataError> {
        let url = format!("{}/{}", self.base_url, source.as_str());
        debug!(url = %url, "list request");

        let request = self.client.get(&url).send();
        let resp = tokio::select! {
            _ = cancel.cancelled() => return Err(MetadataError::Cancelled),
            resp = request => resp.map_err(|e| MetadataError::Network(e.to_string()))?,
        };

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "list endpoint returned {}",
                resp.status()
            )));
        }

        let payload: serde_json::Value = tokio::select! {
            _ = cancel.cancelled() => return Err(MetadataError::Cancelled),
            body = resp.json() => {
                body.map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))?
            }
        };

        Ok(stubs_from_payload(source, &payload))
    }
}

/// Map a listing payload to stub entries: records missing id or title are
/// dropped, the rest get placeholder art and default playback servers.
pub fn stubs_from_payload(source: SourceKind, payload: &serde_json::Value) -> Vec<CatalogEntry> {
    let Some(items) = payload["data"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| stub_from_item(source, item))
        .take(list_limit(source))
        .collect()
}

fn stub_from_item(source: SourceKind, item: &serde_json::Value) -> Option<CatalogEntry> {
    let tmdb_id = match &item["tmdb"] {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return None,
    };
    let title = item["title"].as_str().filter(|t| !t.is_empty())?;

    let kind = source.default_media_kind();
    let mut entry = CatalogEntry::new(title, kind);
    entry.tmdb_id = Some(tmdb_id.clone());
    entry.poster = payload_art(item, POSTER_FIELDS).unwrap_or_else(|| placeholder::poster(source));
    entry.backdrop =
        payload_art(item, BACKDROP_FIELDS).unwrap_or_else(|| placeholder::backdrop(source));
    entry.duration = "N/A".to_string();
    entry.rating = "N/A".to_string();
    entry.director = "Various".to_string();
    entry.quality = "HD".to_string();
    if source == SourceKind::Anime {
        entry.genre = "Anime".to_string();
    }
    if kind == nightfall_core::MediaKind::Tv {
        entry.seasons = 1;
        entry.episodes = 10;
        entry.episodes_per_season = vec![10];
    }
    // Anime feeds get the full server list up front; vidsrc alone resolves
    // bare TMDB ids reliably for the others.
    entry.servers = match source {
        SourceKind::Anime => embed::full_servers(kind, &tmdb_id),
        _ => embed::default_servers(kind, &tmdb_id),
    };

    Some(entry)
}

const POSTER_FIELDS: &[&str] = &["poster", "poster_path", "posterUrl", "poster_url", "image", "img"];
const BACKDROP_FIELDS: &[&str] = &[
    "backdrop",
    "backdrop_path",
    "backdropUrl",
    "backdrop_url",
    "cover",
    "coverUrl",
];

/// Some feeds carry usable art inline, under varying field names. Only
/// absolute http(s) URLs are trusted.
fn payload_art(item: &serde_json::Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| {
        item[*field]
            .as_str()
            .map(str::trim)
            .filter(|v| v.starts_with("http"))
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_core::MediaKind;
    use serde_json::json;

    #[test]
    fn maps_listing_records_to_stubs() {
        let payload = json!({
            "data": [
                { "tmdb": 42, "title": "Foo" },
                { "tmdb": 7, "title": "" },
                { "title": "No id" },
                { "tmdb": "9", "title": "Bar" }
            ]
        });

        let stubs = stubs_from_payload(SourceKind::Movie, &payload);
        assert_eq!(stubs.len(), 2);

        let foo = &stubs[0];
        assert_eq!(foo.title, "Foo");
        assert_eq!(foo.tmdb_id.as_deref(), Some("42"));
        assert_eq!(foo.kind, MediaKind::Movie);
        assert!(foo.poster.starts_with("data:image/svg+xml"));
        assert_eq!(foo.servers.len(), 1);
        assert_eq!(foo.servers[0].url, "https://vidsrc.cc/v2/embed/movie/42");
        assert!(!foo.is_enriched());
    }

    #[test]
    fn malformed_payload_maps_to_empty() {
        assert!(stubs_from_payload(SourceKind::Tv, &json!({"data": "nope"})).is_empty());
        assert!(stubs_from_payload(SourceKind::Tv, &json!(null)).is_empty());
    }

    #[test]
    fn truncates_to_per_feed_limit() {
        let items: Vec<_> = (0..300)
            .map(|i| json!({ "tmdb": i, "title": format!("t{i}") }))
            .collect();
        let payload = json!({ "data": items });

        assert_eq!(
            stubs_from_payload(SourceKind::Movie, &payload).len(),
            MOVIE_LIST_LIMIT
        );
        assert_eq!(stubs_from_payload(SourceKind::Tv, &payload).len(), 300);
    }

    #[test]
    fn anime_stubs_default_to_tv_with_full_servers() {
        let payload = json!({ "data": [{ "tmdb": 5, "title": "Bleach" }] });
        let stubs = stubs_from_payload(SourceKind::Anime, &payload);
        let stub = &stubs[0];
        assert_eq!(stub.kind, MediaKind::Tv);
        assert_eq!(stub.genre, "Anime");
        assert_eq!(stub.seasons, 1);
        assert_eq!(stub.episodes_per_season, [10]);
        assert_eq!(stub.servers.len(), 3);
    }

    #[test]
    fn anime_art_passes_through_only_absolute_urls() {
        let payload = json!({
            "data": [
                { "tmdb": 1, "title": "A", "poster": "https://cdn/a.jpg", "cover": "/rel.jpg" }
            ]
        });
        let stubs = stubs_from_payload(SourceKind::Anime, &payload);
        assert_eq!(stubs[0].poster, "https://cdn/a.jpg");
        assert!(stubs[0].backdrop.starts_with("data:image/svg+xml"));
    }
}
