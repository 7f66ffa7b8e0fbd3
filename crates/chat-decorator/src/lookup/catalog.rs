use std::future::Future;

use catalog_client::{CatalogClient, CatalogEmote, CatalogError, PronounName, UserPronoun};

/// Source of emote catalogs and the channel identity that scopes them.
pub trait EmoteCatalog: Send + Sync {
    fn fetch_channel_id(
        &self,
        channel: &str,
    ) -> impl Future<Output = Result<String, CatalogError>> + Send;

    fn fetch_bttv_global(
        &self,
    ) -> impl Future<Output = Result<Vec<CatalogEmote>, CatalogError>> + Send;

    fn fetch_bttv_channel(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<Vec<CatalogEmote>, CatalogError>> + Send;

    fn fetch_ffz_channel(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<Vec<CatalogEmote>, CatalogError>> + Send;
}

/// Source of pronoun names and per-user pronoun records.
pub trait PronounCatalog: Send + Sync {
    fn fetch_pronoun_names(
        &self,
    ) -> impl Future<Output = Result<Vec<PronounName>, CatalogError>> + Send;

    fn fetch_user_pronouns(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<UserPronoun>, CatalogError>> + Send;
}

impl EmoteCatalog for CatalogClient {
    async fn fetch_channel_id(&self, channel: &str) -> Result<String, CatalogError> {
        self.resolve_channel_id(channel).await
    }

    async fn fetch_bttv_global(&self) -> Result<Vec<CatalogEmote>, CatalogError> {
        self.get_bttv_global_emotes().await
    }

    async fn fetch_bttv_channel(&self, channel_id: &str) -> Result<Vec<CatalogEmote>, CatalogError> {
        self.get_bttv_channel_emotes(channel_id).await
    }

    async fn fetch_ffz_channel(&self, channel_id: &str) -> Result<Vec<CatalogEmote>, CatalogError> {
        self.get_ffz_channel_emotes(channel_id).await
    }
}

impl PronounCatalog for CatalogClient {
    async fn fetch_pronoun_names(&self) -> Result<Vec<PronounName>, CatalogError> {
        self.get_pronoun_names().await
    }

    async fn fetch_user_pronouns(&self, username: &str) -> Result<Vec<UserPronoun>, CatalogError> {
        self.get_user_pronouns(username).await
    }
}
