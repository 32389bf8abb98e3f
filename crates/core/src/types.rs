use serde::{Deserialize, Serialize};

/// What a catalog entry ultimately is once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote listing feed. Anime resolves to movie or tv during enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Movie,
    Tv,
    Anime,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Anime => "anime",
        }
    }

    /// Media kind a stub from this feed is assumed to be before enrichment.
    pub fn default_media_kind(self) -> MediaKind {
        match self {
            Self::Movie => MediaKind::Movie,
            Self::Tv | Self::Anime => MediaKind::Tv,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate playback source. Order in `CatalogEntry::servers` is display
/// and priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackServer {
    pub label: String,
    pub url: String,
}

impl PlaybackServer {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// The unit of content shown in a catalog row.
///
/// Stubs from the listing endpoint carry only title, id, and placeholder
/// art; enrichment fills the display metadata in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    /// Normalized string form of the remote numeric id. Identity key when
    /// present.
    #[serde(default)]
    pub tmdb_id: Option<String>,
    pub kind: MediaKind,
    /// URL or inline data URI.
    pub poster: String,
    pub backdrop: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub seasons: u32,
    #[serde(default)]
    pub episodes: u32,
    #[serde(default)]
    pub episodes_per_season: Vec<u32>,
    #[serde(default)]
    pub servers: Vec<PlaybackServer>,
}

impl CatalogEntry {
    /// Bare entry with every display field empty. Callers fill in what
    /// they know.
    pub fn new(title: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            title: title.into(),
            tmdb_id: None,
            kind,
            poster: String::new(),
            backdrop: String::new(),
            description: String::new(),
            release_date: String::new(),
            duration: String::new(),
            rating: String::new(),
            genre: String::new(),
            country: String::new(),
            cast: String::new(),
            director: String::new(),
            quality: String::new(),
            seasons: 0,
            episodes: 0,
            episodes_per_season: Vec::new(),
            servers: Vec::new(),
        }
    }

    /// Key used to deduplicate entries across sources:
    /// `kind:tmdb_id`, or `kind:lowercased-title` when there is no id.
    ///
    /// Entries with neither an id nor a title have no identity and are
    /// dropped by dedupe.
    pub fn identity_key(&self) -> Option<String> {
        let kind = self.kind.as_str();
        if let Some(id) = self
            .tmdb_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return Some(format!("{kind}:{id}"));
        }
        let title = self.title.trim().to_lowercase();
        if title.is_empty() {
            None
        } else {
            Some(format!("{kind}:{title}"))
        }
    }

    /// Derived, never stored: true once metadata has been populated from
    /// the details endpoint.
    pub fn is_enriched(&self) -> bool {
        !self.description.is_empty() || !self.release_date.is_empty()
    }

    /// Count of non-empty display fields. Enrichment must never decrease
    /// this.
    pub fn populated_field_count(&self) -> usize {
        [
            &self.description,
            &self.release_date,
            &self.duration,
            &self.rating,
            &self.genre,
            &self.country,
            &self.cast,
            &self.director,
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .count()
    }

    /// True when `other` refers to the same content: ids compared when both
    /// sides have one, titles otherwise.
    pub fn same_content(&self, other: &CatalogEntry) -> bool {
        match (self.tmdb_id.as_deref(), other.tmdb_id.as_deref()) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a == b,
            _ => self.title == other.title,
        }
    }
}
