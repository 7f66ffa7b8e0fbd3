//! Process-wide emote lookup tables.
//!
//! One write-once cell per source plus one for the viewer identity that
//! scopes the channel catalogs. Concurrent callers of a cold cell wait on the
//! same in-flight fetch. The cells live in a generation that `reset` replaces.

mod catalog;
mod table;

pub use catalog::{EmoteCatalog, PronounCatalog};
pub use table::{EmoteLookupEntry, EmoteLookupTable};

use std::future::Future;
use std::sync::{Arc, RwLock};

use catalog_client::CatalogEmote;
use tokio::sync::OnceCell;

use crate::DecorateError;
use crate::config::{FailurePolicies, FailurePolicy};
use crate::third_party::EmoteSource;

/// Outcome of a lookup-table access.
#[derive(Debug, Clone)]
pub enum CatalogLookup {
    Ready(Arc<EmoteLookupTable>),
    /// The catalog could not be fetched; substitution for the source is skipped.
    Unavailable,
}

impl CatalogLookup {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn table(&self) -> Option<&EmoteLookupTable> {
        match self {
            Self::Ready(table) => Some(table),
            Self::Unavailable => None,
        }
    }
}

/// One generation of cached values. `reset` swaps in a fresh one.
#[derive(Default)]
struct CacheCells {
    identity: OnceCell<String>,
    bttv_global: OnceCell<CatalogLookup>,
    bttv_channel: OnceCell<CatalogLookup>,
    ffz_channel: OnceCell<CatalogLookup>,
}

impl CacheCells {
    fn source(&self, source: EmoteSource) -> &OnceCell<CatalogLookup> {
        match source {
            EmoteSource::BttvGlobal => &self.bttv_global,
            EmoteSource::BttvChannel => &self.bttv_channel,
            EmoteSource::FfzChannel => &self.ffz_channel,
        }
    }
}

/// Memoized emote catalogs for one channel.
pub struct LookupCache<C> {
    catalog: Arc<C>,
    channel: Option<String>,
    policies: FailurePolicies,
    cells: RwLock<Arc<CacheCells>>,
}

impl<C: EmoteCatalog> LookupCache<C> {
    pub fn new(catalog: Arc<C>, channel: Option<String>, policies: FailurePolicies) -> Self {
        let channel = channel
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        Self {
            catalog,
            channel,
            policies,
            cells: RwLock::new(Arc::default()),
        }
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Numeric ID of the configured channel, resolved once.
    ///
    /// Failures are returned to the caller and not cached.
    pub async fn viewer_identity(&self) -> Result<String, DecorateError> {
        self.identity_in(&self.cells()).await
    }

    /// Global BTTV emotes.
    pub async fn global_table(&self) -> CatalogLookup {
        let cells = self.cells();
        self.load(&cells, EmoteSource::BttvGlobal, || async {
            Ok::<_, DecorateError>(self.catalog.fetch_bttv_global().await?)
        })
        .await
    }

    /// The channel's BTTV emotes (own and shared).
    pub async fn channel_table(&self) -> CatalogLookup {
        let cells = self.cells();
        self.load(&cells, EmoteSource::BttvChannel, || async {
            let channel_id = self.identity_in(&cells).await?;
            Ok::<_, DecorateError>(self.catalog.fetch_bttv_channel(&channel_id).await?)
        })
        .await
    }

    /// The channel's FFZ emotes.
    pub async fn alternate_channel_table(&self) -> CatalogLookup {
        let cells = self.cells();
        self.load(&cells, EmoteSource::FfzChannel, || async {
            let channel_id = self.identity_in(&cells).await?;
            Ok::<_, DecorateError>(self.catalog.fetch_ffz_channel(&channel_id).await?)
        })
        .await
    }

    pub async fn table(&self, source: EmoteSource) -> CatalogLookup {
        match source {
            EmoteSource::BttvGlobal => self.global_table().await,
            EmoteSource::BttvChannel => self.channel_table().await,
            EmoteSource::FfzChannel => self.alternate_channel_table().await,
        }
    }

    /// Drop every cached value; the next access fetches again.
    ///
    /// Fetches already in flight finish against the old generation.
    pub fn reset(&self) {
        let mut guard = match self.cells.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::default();
        tracing::info!(channel = ?self.channel, "Emote lookup caches reset");
    }

    fn cells(&self) -> Arc<CacheCells> {
        let guard = match self.cells.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(&guard)
    }

    async fn identity_in(&self, cells: &CacheCells) -> Result<String, DecorateError> {
        let id = cells
            .identity
            .get_or_try_init(|| async {
                let channel = self.channel.as_deref().ok_or(DecorateError::MissingChannel)?;
                let id = self.catalog.fetch_channel_id(channel).await?;
                tracing::info!(channel, id, "Viewer identity resolved");
                Ok::<_, DecorateError>(id)
            })
            .await?;
        Ok(id.clone())
    }

    async fn load<F, Fut>(&self, cells: &CacheCells, source: EmoteSource, fetch: F) -> CatalogLookup
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CatalogEmote>, DecorateError>>,
    {
        let policy = self.policies.for_source(source);
        let result = cells
            .source(source)
            .get_or_try_init(|| async move {
                match fetch().await {
                    Ok(emotes) => {
                        let table = EmoteLookupTable::from_emotes(emotes);
                        tracing::debug!(%source, count = table.len(), "Emote lookup table cached");
                        Ok(CatalogLookup::Ready(Arc::new(table)))
                    }
                    // Nothing to fetch until a channel is configured.
                    Err(DecorateError::MissingChannel) => {
                        tracing::debug!(%source, "No channel configured; source disabled");
                        Ok(CatalogLookup::Unavailable)
                    }
                    Err(e) => match policy {
                        FailurePolicy::CacheEmpty => {
                            tracing::warn!(%source, error = %e, "Emote catalog unavailable; caching empty result");
                            Ok(CatalogLookup::Unavailable)
                        }
                        FailurePolicy::Retry => {
                            tracing::warn!(%source, error = %e, "Emote catalog unavailable; will retry");
                            Err(e)
                        }
                    },
                }
            })
            .await;

        match result {
            Ok(lookup) => lookup.clone(),
            Err(_) => CatalogLookup::Unavailable,
        }
    }
}
