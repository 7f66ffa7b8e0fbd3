//! alejo.io pronoun service.

use serde::{Deserialize, Serialize};

use crate::{CatalogClient, CatalogError, build_url};

/// Entry of the pronoun-name catalog, e.g. `hehim` -> `He/Him`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounName {
    pub name: String,
    pub display: String,
}

/// A user's configured pronoun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPronoun {
    pub pronoun_id: String,
    #[serde(default)]
    pub login: Option<String>,
}

impl CatalogClient {
    /// Fetch every pronoun name the service knows about.
    pub async fn get_pronoun_names(&self) -> Result<Vec<PronounName>, CatalogError> {
        let url = build_url(&self.endpoints.pronouns_base, &["pronouns"])?;
        let names: Vec<PronounName> = self.get_json(&url).await?;
        tracing::debug!(count = names.len(), "Fetched pronoun names");
        Ok(names)
    }

    /// Fetch the pronoun records of one user; empty when none are set.
    pub async fn get_user_pronouns(&self, username: &str) -> Result<Vec<UserPronoun>, CatalogError> {
        let url = build_url(&self.endpoints.pronouns_base, &["users", username])?;
        self.get_json(&url).await
    }
}
