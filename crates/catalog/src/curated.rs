//! Static curated catalog, loaded once at startup and never mutated.
//!
//! These rows render immediately while the remote feeds are still loading,
//! so every entry ships with complete display metadata.

use nightfall_core::{CatalogEntry, MediaKind, PlaybackServer};

/// The curated rows the home screen is built from.
pub struct CuratedCatalog {
    pub trending: Vec<CatalogEntry>,
    pub movies: Vec<CatalogEntry>,
    pub tv_shows: Vec<CatalogEntry>,
    pub new_popular: Vec<CatalogEntry>,
    pub my_list: Vec<CatalogEntry>,
}

impl CuratedCatalog {
    pub fn load() -> Self {
        Self {
            trending: vec![
                movie(
                    "Inception",
                    "27205",
                    "2010-07-16",
                    "148m",
                    "8.4",
                    "Action, Science Fiction",
                    "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea.",
                ),
                movie(
                    "Interstellar",
                    "157336",
                    "2014-11-05",
                    "169m",
                    "8.4",
                    "Adventure, Drama, Science Fiction",
                    "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
                ),
                tv(
                    "Breaking Bad",
                    "1396",
                    "2008-01-20",
                    "47m per episode",
                    "8.9",
                    "Crime, Drama",
                    "A chemistry teacher diagnosed with cancer turns to manufacturing methamphetamine.",
                    5,
                    62,
                    &[7, 13, 13, 13, 16],
                ),
            ],
            movies: vec![
                movie(
                    "The Dark Knight",
                    "155",
                    "2008-07-18",
                    "152m",
                    "8.5",
                    "Action, Crime, Drama",
                    "Batman raises the stakes in his war on crime as the Joker wreaks havoc on Gotham.",
                ),
                movie(
                    "Parasite",
                    "496243",
                    "2019-05-30",
                    "132m",
                    "8.5",
                    "Comedy, Thriller, Drama",
                    "All unemployed, Ki-taek's family takes a peculiar interest in the wealthy Park family.",
                ),
                movie(
                    "Mad Max: Fury Road",
                    "76341",
                    "2015-05-15",
                    "120m",
                    "7.6",
                    "Action, Adventure, Science Fiction",
                    "An apocalyptic story set in the furthest reaches of our planet.",
                ),
            ],
            tv_shows: vec![
                tv(
                    "Dark",
                    "70523",
                    "2017-12-01",
                    "53m per episode",
                    "8.4",
                    "Drama, Mystery, Science Fiction",
                    "A missing child sets four families on a frantic hunt for answers across three generations.",
                    3,
                    26,
                    &[10, 8, 8],
                ),
                tv(
                    "The Wire",
                    "1438",
                    "2002-06-02",
                    "59m per episode",
                    "8.6",
                    "Crime, Drama",
                    "The Baltimore drug scene, seen through the eyes of drug dealers and law enforcement.",
                    5,
                    60,
                    &[13, 12, 12, 13, 10],
                ),
            ],
            new_popular: vec![
                movie(
                    "Dune: Part Two",
                    "693134",
                    "2024-02-27",
                    "167m",
                    "8.2",
                    "Science Fiction, Adventure",
                    "Paul Atreides unites with Chani and the Fremen while seeking revenge against the conspirators who destroyed his family.",
                ),
                tv(
                    "Severance",
                    "95396",
                    "2022-02-17",
                    "50m per episode",
                    "8.4",
                    "Drama, Mystery, Science Fiction",
                    "Mark leads a team of office workers whose memories have been surgically divided between work and personal lives.",
                    2,
                    19,
                    &[9, 10],
                ),
            ],
            my_list: vec![
                tv(
                    "Attack on Titan",
                    "1429",
                    "2013-04-07",
                    "24m per episode",
                    "8.7",
                    "Anime, Action, Drama",
                    "Humanity fights for survival behind enormous walls against giant humanoid Titans.",
                    4,
                    87,
                    &[25, 12, 22, 28],
                ),
                movie(
                    "Spirited Away",
                    "129",
                    "2001-07-20",
                    "125m",
                    "8.5",
                    "Animation, Family, Fantasy",
                    "A young girl wanders into a world ruled by gods, witches, and spirits.",
                ),
            ],
        }
    }

    /// Every curated title, deduplicated, row order preserved.
    pub fn all_titles(&self) -> Vec<CatalogEntry> {
        crate::merge(&[
            &self.trending,
            &self.movies,
            &self.tv_shows,
            &self.new_popular,
            &self.my_list,
        ])
    }
}

fn base(
    title: &str,
    tmdb_id: &str,
    kind: MediaKind,
    release_date: &str,
    duration: &str,
    rating: &str,
    genre: &str,
    description: &str,
) -> CatalogEntry {
    let mut e = CatalogEntry::new(title, kind);
    e.tmdb_id = Some(tmdb_id.to_string());
    e.poster = format!("https://image.tmdb.org/t/p/w500/curated/{tmdb_id}.jpg");
    e.backdrop = format!("https://image.tmdb.org/t/p/w780/curated/{tmdb_id}.jpg");
    e.description = description.to_string();
    e.release_date = release_date.to_string();
    e.duration = duration.to_string();
    e.rating = rating.to_string();
    e.genre = genre.to_string();
    e.quality = "HD".to_string();
    e.director = "Various".to_string();
    e.servers = vec![PlaybackServer::new(
        "Server 3",
        format!("https://vidsrc.cc/v2/embed/{}/{tmdb_id}", kind.as_str()),
    )];
    e
}

fn movie(
    title: &str,
    tmdb_id: &str,
    release_date: &str,
    duration: &str,
    rating: &str,
    genre: &str,
    description: &str,
) -> CatalogEntry {
    base(
        title,
        tmdb_id,
        MediaKind::Movie,
        release_date,
        duration,
        rating,
        genre,
        description,
    )
}

#[allow(clippy::too_many_arguments)]
fn tv(
    title: &str,
    tmdb_id: &str,
    release_date: &str,
    duration: &str,
    rating: &str,
    genre: &str,
    description: &str,
    seasons: u32,
    episodes: u32,
    per_season: &[u32],
) -> CatalogEntry {
    let mut e = base(
        title,
        tmdb_id,
        MediaKind::Tv,
        release_date,
        duration,
        rating,
        genre,
        description,
    );
    e.seasons = seasons;
    e.episodes = episodes;
    e.episodes_per_season = per_season.to_vec();
    e
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curated_entries_are_complete_and_unique() {
        let catalog = CuratedCatalog::load();
        let all = catalog.all_titles();
        assert!(!all.is_empty());
        for entry in &all {
            assert!(entry.is_enriched(), "{} should ship enriched", entry.title);
            assert!(entry.tmdb_id.is_some());
            assert!(!entry.servers.is_empty());
        }
        let keys: std::collections::HashSet<_> =
            all.iter().map(|e| e.identity_key().unwrap()).collect();
        assert_eq!(keys.len(), all.len());
    }

    #[test]
    fn tv_entries_carry_season_structure() {
        let catalog = CuratedCatalog::load();
        for entry in catalog.tv_shows {
            assert!(entry.seasons > 0);
            assert_eq!(entry.episodes_per_season.len() as u32, entry.seasons);
        }
    }
}
