//! Inline placeholder art for stub entries.
//!
//! Stubs render before any image fetch can complete, so posters and
//! backdrops start as self-contained SVG data URIs labeled by feed.

use nightfall_core::SourceKind;

fn label(source: SourceKind) -> &'static str {
    match source {
        SourceKind::Movie => "MOVIE",
        SourceKind::Tv => "TV",
        SourceKind::Anime => "ANIME",
    }
}

fn data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        urlencoding::encode(svg)
    )
}

/// 220x330 poster card.
pub fn poster(source: SourceKind) -> String {
    let text = label(source);
    data_uri(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="220" height="330" viewBox="0 0 220 330"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#111827"/><stop offset="1" stop-color="#1f2937"/></linearGradient></defs><rect width="220" height="330" rx="18" fill="url(#g)"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" fill="#94a3b8" font-family="Arial, sans-serif" font-size="14">{text}</text></svg>"##
    ))
}

/// 780x439 backdrop card.
pub fn backdrop(source: SourceKind) -> String {
    let text = label(source);
    data_uri(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="780" height="439" viewBox="0 0 780 439"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#0b1220"/><stop offset="1" stop-color="#111827"/></linearGradient></defs><rect width="780" height="439" rx="20" fill="url(#g)"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" fill="#94a3b8" font-family="Arial, sans-serif" font-size="18">{text}</text></svg>"##
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_inline_data_uris() {
        for source in [SourceKind::Movie, SourceKind::Tv, SourceKind::Anime] {
            let p = poster(source);
            assert!(p.starts_with("data:image/svg+xml"));
            // No raw markup may survive URL encoding.
            assert!(!p.contains('<'));
            assert!(backdrop(source).starts_with("data:image/svg+xml"));
        }
    }

    #[test]
    fn placeholders_are_labeled_per_feed() {
        assert!(poster(SourceKind::Anime).contains("ANIME"));
        assert!(poster(SourceKind::Movie).contains("MOVIE"));
    }
}
