//! Catalog merge engine.
//!
//! Merge rules:
//! 1. Entries are keyed by [`CatalogEntry::identity_key`].
//! 2. First occurrence wins and is kept verbatim.
//! 3. `merge` concatenates in argument order, so earlier sources win ties.
//!
//! Entries with no identity (neither id nor title) are silently dropped;
//! there are no error conditions.

use std::collections::HashSet;

use nightfall_core::CatalogEntry;

/// Stable, order-preserving dedupe over identity keys.
pub fn dedupe<I>(entries: I) -> Vec<CatalogEntry>
where
    I: IntoIterator<Item = CatalogEntry>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for entry in entries {
        let Some(key) = entry.identity_key() else {
            continue;
        };
        if seen.insert(key) {
            out.push(entry);
        }
    }
    out
}

/// Combine sources into one duplicate-free collection. Earlier sources
/// take priority over later ones.
pub fn merge(sources: &[&[CatalogEntry]]) -> Vec<CatalogEntry> {
    dedupe(sources.iter().flat_map(|s| s.iter().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_core::MediaKind;

    fn entry(title: &str, id: Option<&str>) -> CatalogEntry {
        let mut e = CatalogEntry::new(title, MediaKind::Movie);
        e.tmdb_id = id.map(String::from);
        e
    }

    #[test]
    fn dedupe_keeps_unique_identity_keys() {
        let out = dedupe(vec![
            entry("Foo", Some("1")),
            entry("Bar", Some("2")),
            entry("Foo again", Some("1")),
            entry("Bar", None), // same title as above but keyed by title, not id
        ]);
        let keys: Vec<_> = out.iter().map(|e| e.identity_key().unwrap()).collect();
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn dedupe_keeps_earliest_occurrence_verbatim() {
        let mut first = entry("Foo", Some("1"));
        first.description = "the original".into();
        let mut second = entry("Foo", Some("1"));
        second.description = "the duplicate".into();

        let out = dedupe(vec![first.clone(), second]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0], first);
    }

    #[test]
    fn dedupe_drops_entries_without_identity() {
        let out = dedupe(vec![entry("", None), entry("   ", None), entry("Foo", None)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Foo");
    }

    #[test]
    fn dedupe_separates_same_title_across_kinds() {
        let movie = entry("Foo", None);
        let mut tv = CatalogEntry::new("Foo", MediaKind::Tv);
        tv.tmdb_id = None;
        let out = dedupe(vec![movie, tv]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn merge_equals_dedupe_of_concatenation() {
        let a = vec![entry("Foo", Some("1")), entry("Bar", Some("2"))];
        let b = vec![entry("Baz", Some("3")), entry("Foo", Some("1"))];

        let merged = merge(&[&a, &b]);
        let concat: Vec<_> = a.iter().chain(b.iter()).cloned().collect();
        assert_eq!(merged, dedupe(concat));
    }

    #[test]
    fn merge_earlier_sources_win_ties() {
        let mut ours = entry("Foo", Some("1"));
        ours.rating = "9.0".into();
        let mut theirs = entry("Foo", Some("1"));
        theirs.rating = "2.0".into();

        let merged = merge(&[std::slice::from_ref(&ours), std::slice::from_ref(&theirs)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].rating, "9.0");
    }

    #[test]
    fn merge_preserves_first_occurrence_order() {
        let a = vec![entry("C", Some("3")), entry("A", Some("1"))];
        let b = vec![entry("B", Some("2")), entry("A", Some("1"))];
        let merged = merge(&[&a, &b]);
        let titles: Vec<_> = merged.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }
}
