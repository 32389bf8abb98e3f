//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use tracing::debug;

use crate::provider::DetailsProvider;
use crate::{MetadataError, TitleDetails};

const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Full image URL for a TMDB path at a given size (`w500`, `w780`, ...).
/// Paths that are already absolute pass through unchanged.
pub fn image_url(size: &str, path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{IMAGE_BASE}/{size}{path}")
    }
}

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl DetailsProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn movie_details(&self, provider_id: &str) -> Result<TitleDetails, MetadataError> {
        let data = self
            .get_json(
                &format!("/movie/{provider_id}"),
                &[("append_to_response", "external_ids,credits")],
            )
            .await?;

        Ok(parse_movie_details(&data))
    }

    async fn tv_details(&self, provider_id: &str) -> Result<TitleDetails, MetadataError> {
        let data = self
            .get_json(
                &format!("/tv/{provider_id}"),
                &[("append_to_response", "external_ids,credits")],
            )
            .await?;

        Ok(parse_tv_details(&data))
    }
}

fn parse_movie_details(data: &serde_json::Value) -> TitleDetails {
    let (cast, director) = extract_credits(data.get("credits"));

    TitleDetails {
        title: data["title"].as_str().map(|s| s.to_string()),
        overview: non_empty(data["overview"].as_str()),
        release_date: non_empty(data["release_date"].as_str()),
        runtime_minutes: data["runtime"].as_i64(),
        episode_runtime_minutes: None,
        vote_average: data["vote_average"].as_f64(),
        genres: extract_genres(data),
        poster_path: non_empty(data["poster_path"].as_str()),
        backdrop_path: non_empty(data["backdrop_path"].as_str()),
        imdb_id: non_empty(data["external_ids"]["imdb_id"].as_str()),
        seasons: None,
        episodes: None,
        episodes_per_season: Vec::new(),
        cast,
        director,
    }
}

fn parse_tv_details(data: &serde_json::Value) -> TitleDetails {
    let (cast, director) = extract_credits(data.get("credits"));

    // Specials (season 0) are excluded from the per-season counts.
    let mut seasons: Vec<(i64, u32)> = data["seasons"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|s| {
                    let number = s["season_number"].as_i64()?;
                    (number > 0)
                        .then(|| (number, s["episode_count"].as_u64().unwrap_or(0) as u32))
                })
                .collect()
        })
        .unwrap_or_default();
    seasons.sort_by_key(|(number, _)| *number);

    TitleDetails {
        title: data["name"].as_str().map(|s| s.to_string()),
        overview: non_empty(data["overview"].as_str()),
        release_date: non_empty(data["first_air_date"].as_str()),
        runtime_minutes: None,
        episode_runtime_minutes: data["episode_run_time"]
            .as_array()
            .and_then(|a| a.first())
            .and_then(|v| v.as_i64()),
        vote_average: data["vote_average"].as_f64(),
        genres: extract_genres(data),
        poster_path: non_empty(data["poster_path"].as_str()),
        backdrop_path: non_empty(data["backdrop_path"].as_str()),
        imdb_id: non_empty(data["external_ids"]["imdb_id"].as_str()),
        seasons: data["number_of_seasons"].as_u64().map(|n| n as u32),
        episodes: data["number_of_episodes"].as_u64().map(|n| n as u32),
        episodes_per_season: seasons.into_iter().map(|(_, count)| count).collect(),
        cast,
        director,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(|s| s.to_string())
}

fn extract_genres(data: &serde_json::Value) -> Vec<String> {
    data["genres"]
        .as_array()
        .map(|gs| {
            gs.iter()
                .filter_map(|g| g["name"].as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn extract_credits(credits: Option<&serde_json::Value>) -> (Vec<String>, Option<String>) {
    let mut cast = Vec::new();
    let mut director = None;

    if let Some(credits) = credits {
        if let Some(people) = credits["cast"].as_array() {
            for person in people.iter().take(5) {
                if let Some(name) = person["name"].as_str() {
                    cast.push(name.to_string());
                }
            }
        }

        if let Some(crew) = credits["crew"].as_array() {
            director = crew
                .iter()
                .find(|p| p["job"].as_str() == Some("Director"))
                .and_then(|p| p["name"].as_str())
                .map(|s| s.to_string());
        }
    }

    (cast, director)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_movie_details_from_json() {
        let json = serde_json::json!({
            "title": "Inception",
            "overview": "A thief who steals corporate secrets...",
            "release_date": "2010-07-16",
            "runtime": 148,
            "vote_average": 8.364,
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ],
            "external_ids": { "imdb_id": "tt1375666" },
            "credits": {
                "cast": [
                    { "name": "Leonardo DiCaprio", "character": "Cobb" },
                    { "name": "Joseph Gordon-Levitt", "character": "Arthur" }
                ],
                "crew": [
                    { "name": "Emma Thomas", "job": "Producer" },
                    { "name": "Christopher Nolan", "job": "Director" }
                ]
            }
        });

        let details = parse_movie_details(&json);
        assert_eq!(details.title.as_deref(), Some("Inception"));
        assert_eq!(details.runtime_minutes, Some(148));
        assert_eq!(details.imdb_id.as_deref(), Some("tt1375666"));
        assert_eq!(details.genres, ["Action", "Science Fiction"]);
        assert_eq!(details.cast.len(), 2);
        assert_eq!(details.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(details.seasons, None);
    }

    #[test]
    fn parse_tv_details_from_json() {
        let json = serde_json::json!({
            "name": "Breaking Bad",
            "overview": "A high school chemistry teacher...",
            "first_air_date": "2008-01-20",
            "episode_run_time": [47, 50],
            "vote_average": 8.9,
            "number_of_seasons": 5,
            "number_of_episodes": 62,
            "seasons": [
                { "season_number": 2, "episode_count": 13 },
                { "season_number": 0, "episode_count": 4 },
                { "season_number": 1, "episode_count": 7 }
            ],
            "external_ids": { "imdb_id": "tt0903747" }
        });

        let details = parse_tv_details(&json);
        assert_eq!(details.title.as_deref(), Some("Breaking Bad"));
        assert_eq!(details.episode_runtime_minutes, Some(47));
        assert_eq!(details.seasons, Some(5));
        assert_eq!(details.episodes, Some(62));
        // Specials dropped, seasons ordered.
        assert_eq!(details.episodes_per_season, [7, 13]);
        assert_eq!(details.imdb_id.as_deref(), Some("tt0903747"));
    }

    #[test]
    fn empty_strings_parse_as_absent() {
        let json = serde_json::json!({
            "title": "Foo",
            "overview": "",
            "release_date": "",
            "external_ids": { "imdb_id": "" }
        });
        let details = parse_movie_details(&json);
        assert_eq!(details.overview, None);
        assert_eq!(details.release_date, None);
        assert_eq!(details.imdb_id, None);
    }

    #[test]
    fn image_url_passes_absolute_urls_through() {
        assert_eq!(
            image_url("w500", "/p.jpg"),
            "https://image.tmdb.org/t/p/w500/p.jpg"
        );
        assert_eq!(image_url("w500", "https://cdn/img.jpg"), "https://cdn/img.jpg");
    }
}
