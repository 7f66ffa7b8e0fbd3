//! HTTP client for the catalogs a chat overlay decorates messages with.
//!
//! Covers channel identity resolution (decapi), BTTV/FFZ emote catalogs
//! served by the BTTV API, and the alejo.io pronoun service.

pub mod emotes;
mod identity;
pub mod pronouns;
mod request;

pub use emotes::{BttvChannelEmotes, CatalogEmote};
pub use pronouns::{PronounName, UserPronoun};

use url::Url;

const DECAPI_ID_BASE: &str = "https://decapi.me/twitch/id";
const BTTV_API_BASE: &str = "https://api.betterttv.net/3/cached";
const PRONOUNS_API_BASE: &str = "https://pronouns.alejo.io/api";

/// Unified error type for the catalog-client crate.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog request failed (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Channel identity is not numeric: {0:?}")]
    InvalidIdentity(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Endpoint cannot take path segments: {0}")]
    InvalidEndpoint(String),
}

/// Base URLs of every external service the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    pub identity_base: String,
    pub bttv_base: String,
    pub pronouns_base: String,
}

impl Default for CatalogEndpoints {
    fn default() -> Self {
        Self {
            identity_base: DECAPI_ID_BASE.into(),
            bttv_base: BTTV_API_BASE.into(),
            pronouns_base: PRONOUNS_API_BASE.into(),
        }
    }
}

impl CatalogEndpoints {
    /// Point every service at one base URL (local mirrors, tests).
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            identity_base: format!("{base}/twitch/id"),
            bttv_base: format!("{base}/3/cached"),
            pronouns_base: format!("{base}/api"),
        }
    }
}

/// Catalog client with a shared connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoints: CatalogEndpoints,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_endpoints(CatalogEndpoints::default())
    }

    pub fn with_endpoints(endpoints: CatalogEndpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn build_url(base: &str, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidEndpoint(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
