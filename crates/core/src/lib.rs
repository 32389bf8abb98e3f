pub mod types;

pub use types::{CatalogEntry, MediaKind, PlaybackServer, SourceKind};
