//! Browsing helpers over merged collections: franchise pinning, search,
//! shuffled rows, recommendations, and the composed views the UI renders.

use rand::seq::SliceRandom;

use nightfall_core::CatalogEntry;

use crate::merge::{dedupe, merge};

/// Titles matching these keywords are pinned to the top of "My List" and
/// enriched ahead of everything else.
pub const FRANCHISE_KEYWORDS: &[&str] = &[
    "bleach",
    "naruto",
    "naruto shippuden",
    "one piece",
    "dragon ball",
    "dragonball",
    "dragon ball z",
    "dragonball z",
    "dragon ball super",
    "dragon ball gt",
];

/// Keyword allow-list match: exact title or substring, case-insensitive.
pub fn is_franchise_title(title: &str) -> bool {
    let title = title.trim().to_lowercase();
    if title.is_empty() {
        return false;
    }
    FRANCHISE_KEYWORDS
        .iter()
        .any(|needle| title == *needle || title.contains(needle))
}

/// Franchise-matched entries, deduplicated, source order preserved.
pub fn pinned_picks(entries: &[CatalogEntry]) -> Vec<CatalogEntry> {
    dedupe(
        entries
            .iter()
            .filter(|e| is_franchise_title(&e.title))
            .cloned(),
    )
}

/// Case-insensitive substring search over titles.
pub fn search(entries: &[CatalogEntry], term: &str) -> Vec<CatalogEntry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    entries
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Shuffled copy of a row, for variety between renders.
pub fn shuffled(entries: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let mut out = entries.to_vec();
    out.shuffle(&mut rand::thread_rng());
    out
}

/// Up to `limit` random peers of `selected`, excluding it.
pub fn recommendations(
    entries: &[CatalogEntry],
    selected: &CatalogEntry,
    limit: usize,
) -> Vec<CatalogEntry> {
    let mut peers: Vec<_> = entries
        .iter()
        .filter(|e| !e.same_content(selected))
        .cloned()
        .collect();
    peers.shuffle(&mut rand::thread_rng());
    peers.truncate(limit);
    peers
}

/// "My List": pinned franchise picks, then the curated list, user-added
/// entries, and the remote anime feed.
pub fn my_list(
    curated: &[CatalogEntry],
    user_added: &[CatalogEntry],
    anime: &[CatalogEntry],
) -> Vec<CatalogEntry> {
    let pinned = pinned_picks(anime);
    merge(&[&pinned, curated, user_added, anime])
}

/// The full searchable catalog: curated titles first, then user-added and
/// every remote feed.
pub fn full_catalog(
    curated: &[CatalogEntry],
    user_added: &[CatalogEntry],
    movies: &[CatalogEntry],
    tv_shows: &[CatalogEntry],
    anime: &[CatalogEntry],
) -> Vec<CatalogEntry> {
    merge(&[curated, user_added, movies, tv_shows, anime])
}
