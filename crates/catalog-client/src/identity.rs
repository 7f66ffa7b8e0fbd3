use crate::{CatalogClient, CatalogError, build_url};

impl CatalogClient {
    /// Resolve a channel login to its numeric Twitch user ID.
    ///
    /// decapi answers unknown users with `200` and a plain-text error, so the
    /// body must look like an ID to be accepted.
    pub async fn resolve_channel_id(&self, channel: &str) -> Result<String, CatalogError> {
        let url = build_url(&self.endpoints.identity_base, &[channel])?;
        let body = self.get_text(&url).await?;
        let id = parse_numeric_id(&body)?;
        tracing::debug!(channel, id, "Resolved channel identity");
        Ok(id)
    }
}

pub(crate) fn parse_numeric_id(body: &str) -> Result<String, CatalogError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CatalogError::InvalidIdentity(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}
