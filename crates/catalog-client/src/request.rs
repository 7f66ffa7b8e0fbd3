use url::Url;

use crate::{CatalogClient, CatalogError};

impl CatalogClient {
    /// Send an unauthenticated GET request and return the body on success.
    pub(crate) async fn get_text(&self, url: &Url) -> Result<String, CatalogError> {
        let resp = self.http.get(url.clone()).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Catalog request rejected");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    /// GET and decode a JSON body.
    pub(crate) async fn get_json<T>(&self, url: &Url) -> Result<T, CatalogError>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
