//! Playback embed URL construction.
//!
//! Downstream providers index primarily by IMDB id, so enriched entries
//! use the cross-reference id when one is known; stubs fall back to the
//! TMDB numeric id, which only the vidsrc provider resolves.

use nightfall_core::{MediaKind, PlaybackServer};

const TWOEMBED_BASE: &str = "https://www.2embed.cc";
const VIDSRC_EMBED_BASE: &str = "https://vidsrc-embed.ru/embed";
const VIDSRC_BASE: &str = "https://vidsrc.cc/v2/embed";

/// Single vidsrc server for stubs, which only have a TMDB id.
pub fn default_servers(kind: MediaKind, tmdb_id: &str) -> Vec<PlaybackServer> {
    vec![PlaybackServer::new(
        "Server 3",
        format!("{VIDSRC_BASE}/{}/{tmdb_id}", kind.as_str()),
    )]
}

/// Full three-provider list keyed by `embed_id` (IMDB id preferred).
pub fn full_servers(kind: MediaKind, embed_id: &str) -> Vec<PlaybackServer> {
    match kind {
        MediaKind::Movie => vec![
            PlaybackServer::new("Server 1", format!("{TWOEMBED_BASE}/embed/{embed_id}")),
            PlaybackServer::new("Server 2", format!("{VIDSRC_EMBED_BASE}/movie/{embed_id}")),
            PlaybackServer::new("Server 3", format!("{VIDSRC_BASE}/movie/{embed_id}")),
        ],
        MediaKind::Tv => vec![
            PlaybackServer::new("Server 1", format!("{TWOEMBED_BASE}/embedtv/{embed_id}")),
            PlaybackServer::new("Server 2", format!("{VIDSRC_EMBED_BASE}/tv/{embed_id}")),
            PlaybackServer::new("Server 3", format!("{VIDSRC_BASE}/tv/{embed_id}")),
        ],
    }
}

/// Point a tv embed URL at one season/episode. Each provider has its own
/// path convention; unknown providers get query parameters.
pub fn episode_url(base: &str, season: u32, episode: u32) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.contains("vidsrc-embed.ru/embed/tv/") {
        return format!("{trimmed}/{season}-{episode}");
    }
    if trimmed.contains("vidsrc.cc/v2/embed/tv/") {
        return format!("{trimmed}/{season}/{episode}");
    }
    format!("{trimmed}?s={season}&e={episode}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_servers_use_tmdb_id() {
        let servers = default_servers(MediaKind::Movie, "42");
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "https://vidsrc.cc/v2/embed/movie/42");
    }

    #[test]
    fn full_servers_are_ordered_and_keyed_by_embed_id() {
        let servers = full_servers(MediaKind::Tv, "tt999");
        let urls: Vec<_> = servers.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://www.2embed.cc/embedtv/tt999",
                "https://vidsrc-embed.ru/embed/tv/tt999",
                "https://vidsrc.cc/v2/embed/tv/tt999",
            ]
        );
        assert_eq!(servers[0].label, "Server 1");
    }

    #[test]
    fn episode_url_per_provider_conventions() {
        assert_eq!(
            episode_url("https://vidsrc-embed.ru/embed/tv/tt1", 2, 5),
            "https://vidsrc-embed.ru/embed/tv/tt1/2-5"
        );
        assert_eq!(
            episode_url("https://vidsrc.cc/v2/embed/tv/tt1/", 2, 5),
            "https://vidsrc.cc/v2/embed/tv/tt1/2/5"
        );
        assert_eq!(
            episode_url("https://www.2embed.cc/embedtv/tt1", 2, 5),
            "https://www.2embed.cc/embedtv/tt1?s=2&e=5"
        );
    }
}
