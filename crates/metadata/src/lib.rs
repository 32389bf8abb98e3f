pub mod embed;
pub mod enrich;
pub mod list;
pub mod placeholder;
pub mod provider;
pub mod tmdb;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("cancelled")]
    Cancelled,
}

/// Rich metadata for one title, parsed from the details endpoint.
///
/// Absent fields stay `None`/empty; enrichment keeps the entry's prior
/// value for those.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TitleDetails {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    /// Movie runtime in minutes.
    pub runtime_minutes: Option<i64>,
    /// Typical episode runtime in minutes, tv only.
    pub episode_runtime_minutes: Option<i64>,
    pub vote_average: Option<f64>,
    pub genres: Vec<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Cross-reference id preferred for playback embeds when present.
    pub imdb_id: Option<String>,
    pub seasons: Option<u32>,
    pub episodes: Option<u32>,
    /// Episode counts per season, season order, specials excluded.
    pub episodes_per_season: Vec<u32>,
    pub cast: Vec<String>,
    pub director: Option<String>,
}
