//! Applying rich details onto stub entries.
//!
//! Enrichment is monotonic-or-no-op: a field only changes when the details
//! carry a replacement, so a failed or partial lookup can never regress an
//! entry to empty. Applying identical details twice yields identical
//! output.

use tracing::debug;

use nightfall_core::{CatalogEntry, MediaKind, SourceKind};

use crate::provider::DetailsProvider;
use crate::tmdb::image_url;
use crate::{TitleDetails, embed};

/// Look up and apply details for one entry. Any failure returns the entry
/// unchanged; nothing escapes this boundary.
pub async fn enrich_entry(
    provider: &dyn DetailsProvider,
    entry: &CatalogEntry,
    source: SourceKind,
) -> CatalogEntry {
    let Some(id) = entry.tmdb_id.clone() else {
        return entry.clone();
    };

    match source {
        SourceKind::Movie => match provider.movie_details(&id).await {
            Ok(details) => enriched_movie(entry, &details),
            Err(e) => {
                debug!(id, error = %e, "movie enrichment failed, keeping prior entry");
                entry.clone()
            }
        },
        SourceKind::Tv => match provider.tv_details(&id).await {
            Ok(details) => enriched_tv(entry, &details),
            Err(e) => {
                debug!(id, error = %e, "tv enrichment failed, keeping prior entry");
                entry.clone()
            }
        },
        // Anime ids are ambiguous: try the tv lookup first, fall back to
        // movie, and let the winning lookup decide the entry's kind.
        SourceKind::Anime => match provider.tv_details(&id).await {
            Ok(details) => {
                let mut out = enriched_tv(entry, &details);
                out.servers = embed::full_servers(MediaKind::Tv, embed_id(&id, &details));
                out
            }
            Err(_) => match provider.movie_details(&id).await {
                Ok(details) => {
                    let mut out = enriched_movie(entry, &details);
                    out.kind = MediaKind::Movie;
                    out.servers = embed::full_servers(MediaKind::Movie, embed_id(&id, &details));
                    out
                }
                Err(e) => {
                    debug!(id, error = %e, "anime enrichment failed, keeping prior entry");
                    entry.clone()
                }
            },
        },
    }
}

fn embed_id<'a>(tmdb_id: &'a str, details: &'a TitleDetails) -> &'a str {
    details.imdb_id.as_deref().unwrap_or(tmdb_id)
}

/// Apply movie details. Playback servers are rebuilt around the IMDB id
/// when one is known; otherwise the stub's vidsrc server stays.
pub fn enriched_movie(entry: &CatalogEntry, details: &TitleDetails) -> CatalogEntry {
    let mut out = apply_common(entry, details);
    if let Some(runtime) = details.runtime_minutes {
        out.duration = format!("{runtime}m");
    }
    if let Some(imdb) = details.imdb_id.as_deref() {
        out.servers = embed::full_servers(MediaKind::Movie, imdb);
    }
    out
}

/// Apply tv details, including season structure.
pub fn enriched_tv(entry: &CatalogEntry, details: &TitleDetails) -> CatalogEntry {
    let mut out = apply_common(entry, details);
    if let Some(runtime) = details.episode_runtime_minutes {
        out.duration = format!("{runtime}m per episode");
    }
    if let Some(seasons) = details.seasons.filter(|n| *n > 0) {
        out.seasons = seasons;
    }
    if let Some(episodes) = details.episodes.filter(|n| *n > 0) {
        out.episodes = episodes;
    }
    if !details.episodes_per_season.is_empty() {
        out.episodes_per_season = details.episodes_per_season.clone();
    }
    if let Some(imdb) = details.imdb_id.as_deref() {
        out.servers = embed::full_servers(MediaKind::Tv, imdb);
    }
    out
}

fn apply_common(entry: &CatalogEntry, details: &TitleDetails) -> CatalogEntry {
    let mut out = entry.clone();

    if let Some(title) = details.title.as_deref() {
        out.title = title.to_string();
    }
    if let Some(overview) = details.overview.as_deref() {
        out.description = overview.to_string();
    }
    if let Some(date) = details.release_date.as_deref() {
        out.release_date = date.to_string();
    }
    if let Some(vote) = details.vote_average {
        out.rating = format!("{vote:.1}");
    }
    if !details.genres.is_empty() {
        out.genre = details.genres.join(", ");
    }
    if !details.cast.is_empty() {
        out.cast = details.cast.join(", ");
    }
    if let Some(director) = details.director.as_deref() {
        out.director = director.to_string();
    }

    if let Some(poster) = details.poster_path.as_deref() {
        out.poster = image_url("w500", poster);
    } else if let Some(backdrop) = details.backdrop_path.as_deref() {
        // A backdrop beats placeholder art when the poster is missing.
        out.poster = image_url("w500", backdrop);
    }
    if let Some(backdrop) = details.backdrop_path.as_deref() {
        out.backdrop = image_url("w780", backdrop);
    }

    out
}
