use tokio_util::sync::CancellationToken;

use nightfall_core::{CatalogEntry, SourceKind};

use crate::{MetadataError, TitleDetails};

/// A details provider that can look up rich metadata by remote id.
#[async_trait::async_trait]
pub trait DetailsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Full metadata for a movie by provider ID.
    async fn movie_details(&self, provider_id: &str) -> Result<TitleDetails, MetadataError>;

    /// Full metadata for a TV series by provider ID.
    async fn tv_details(&self, provider_id: &str) -> Result<TitleDetails, MetadataError>;
}

/// A listing feed yielding stub entries for one source kind.
#[async_trait::async_trait]
pub trait ListSource: Send + Sync {
    /// One cancellable call. Errors mean "keep whatever you had".
    async fn fetch_list(
        &self,
        source: SourceKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<CatalogEntry>, MetadataError>;
}
