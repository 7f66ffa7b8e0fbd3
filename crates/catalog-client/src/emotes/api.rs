use super::*;
use crate::{CatalogClient, CatalogError, build_url};

impl CatalogClient {
    /// Fetch the global BTTV emote set.
    pub async fn get_bttv_global_emotes(&self) -> Result<Vec<CatalogEmote>, CatalogError> {
        let url = build_url(&self.endpoints.bttv_base, &["emotes", "global"])?;
        let emotes: Vec<CatalogEmote> = self.get_json(&url).await?;
        tracing::debug!(count = emotes.len(), "Fetched BTTV global emotes");
        Ok(emotes)
    }

    /// Fetch a channel's BTTV emotes, channel-owned first, then shared.
    pub async fn get_bttv_channel_emotes(
        &self,
        channel_id: &str,
    ) -> Result<Vec<CatalogEmote>, CatalogError> {
        let url = build_url(&self.endpoints.bttv_base, &["users", "twitch", channel_id])?;
        let resp: BttvChannelEmotes = self.get_json(&url).await?;
        let emotes = resp.into_merged();
        tracing::debug!(
            count = emotes.len(),
            channel_id,
            "Fetched BTTV channel emotes"
        );
        Ok(emotes)
    }

    /// Fetch a channel's FFZ emotes through the BTTV mirror.
    pub async fn get_ffz_channel_emotes(
        &self,
        channel_id: &str,
    ) -> Result<Vec<CatalogEmote>, CatalogError> {
        let url = build_url(
            &self.endpoints.bttv_base,
            &["frankerfacez", "users", "twitch", channel_id],
        )?;
        let emotes: Vec<CatalogEmote> = self.get_json(&url).await?;
        tracing::debug!(
            count = emotes.len(),
            channel_id,
            "Fetched FFZ channel emotes"
        );
        Ok(emotes)
    }
}
