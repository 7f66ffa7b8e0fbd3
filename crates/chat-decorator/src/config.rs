//! Decorator configuration: overlay page URL + environment overrides.

use catalog_client::CatalogEndpoints;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::third_party::EmoteSource;

/// What a lookup cache keeps after a failed catalog fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Cache nothing; the next access fetches again.
    #[default]
    Retry,
    /// Cache the failure; the source stays empty for the cache lifetime.
    CacheEmpty,
}

impl FailurePolicy {
    pub fn from_str_setting(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "retry" => Some(Self::Retry),
            "cache-empty" | "cache_empty" | "cache" => Some(Self::CacheEmpty),
            _ => None,
        }
    }
}

/// Per-source failure policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePolicies {
    pub bttv_global: FailurePolicy,
    pub bttv_channel: FailurePolicy,
    pub ffz_channel: FailurePolicy,
}

impl FailurePolicies {
    pub fn for_source(&self, source: EmoteSource) -> FailurePolicy {
        match source {
            EmoteSource::BttvGlobal => self.bttv_global,
            EmoteSource::BttvChannel => self.bttv_channel,
            EmoteSource::FfzChannel => self.ffz_channel,
        }
    }
}

/// Runtime configuration for a [`crate::MessageDecorator`].
#[derive(Debug, Clone, Default)]
pub struct DecoratorConfig {
    /// Channel login whose BTTV/FFZ emotes are loaded.
    pub channel: Option<String>,
    pub failure_policies: FailurePolicies,
    pub endpoints: CatalogEndpoints,
}

impl DecoratorConfig {
    /// Load from the overlay page URL (its `channel` query parameter), a
    /// `.env` file if present, and environment overrides.
    pub fn load(page_url: Option<&str>) -> Result<Self, anyhow::Error> {
        load_dotenv();
        let mut config = match page_url {
            Some(url) => Self::from_page_url(url)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read the `channel` query parameter of the overlay page URL.
    pub fn from_page_url(page_url: &str) -> Result<Self, anyhow::Error> {
        let url = Url::parse(page_url)?;
        let channel = url
            .query_pairs()
            .find(|(key, _)| key == "channel")
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(Self {
            channel,
            ..Self::default()
        })
    }

    /// Apply `CHANNEL`, `*_FAILURE_POLICY` and `CATALOG_BASE_URL` overrides.
    /// Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(channel) = get("CHANNEL").map(|v| v.trim().to_string()) {
            if !channel.is_empty() {
                self.channel = Some(channel);
            }
        }

        let policy_keys = [
            ("BTTV_GLOBAL_FAILURE_POLICY", &mut self.failure_policies.bttv_global),
            ("BTTV_CHANNEL_FAILURE_POLICY", &mut self.failure_policies.bttv_channel),
            ("FFZ_CHANNEL_FAILURE_POLICY", &mut self.failure_policies.ffz_channel),
        ];
        for (key, slot) in policy_keys {
            let Some(raw) = get(key) else {
                continue;
            };
            match FailurePolicy::from_str_setting(&raw) {
                Some(policy) => *slot = policy,
                None => tracing::warn!(key, value = %raw, "Ignoring unknown failure policy"),
            }
        }

        if let Some(base) = get("CATALOG_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.endpoints = CatalogEndpoints::rooted_at(base.trim());
        }
    }
}

fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}
