//! In-memory catalogs for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use catalog_client::{CatalogEmote, CatalogError, PronounName, UserPronoun};

use crate::lookup::{EmoteCatalog, PronounCatalog};

#[derive(Default)]
pub(crate) struct CallCounts {
    pub(crate) identity: AtomicUsize,
    pub(crate) bttv_global: AtomicUsize,
    pub(crate) bttv_channel: AtomicUsize,
    pub(crate) ffz_channel: AtomicUsize,
    pub(crate) pronoun_names: AtomicUsize,
    pub(crate) user_pronouns: AtomicUsize,
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    channel_ids: HashMap<String, String>,
    bttv_global: Vec<CatalogEmote>,
    bttv_channel: Vec<CatalogEmote>,
    ffz_channel: Vec<CatalogEmote>,
    user_pronouns: HashMap<String, Vec<UserPronoun>>,
    delay: Duration,
    pub(crate) fail_identity: AtomicBool,
    pub(crate) fail_bttv_global: AtomicBool,
    pub(crate) fail_bttv_channel: AtomicBool,
    pub(crate) fail_ffz_channel: AtomicBool,
    pub(crate) fail_pronoun_names: AtomicBool,
    pub(crate) fail_user_pronouns: AtomicBool,
    pub(crate) calls: CallCounts,
    pub(crate) requested_channel_ids: Mutex<Vec<String>>,
}

fn emotes(entries: &[(&str, &str)]) -> Vec<CatalogEmote> {
    entries
        .iter()
        .map(|(code, id)| CatalogEmote {
            id: id.to_string(),
            code: code.to_string(),
            image_type: "png".into(),
        })
        .collect()
}

fn unavailable() -> CatalogError {
    CatalogError::Status {
        status: 503,
        message: "service unavailable".into(),
    }
}

impl FakeCatalog {
    pub(crate) fn with_channel(mut self, login: &str, id: &str) -> Self {
        self.channel_ids.insert(login.to_string(), id.to_string());
        self
    }

    pub(crate) fn with_bttv_global(mut self, entries: &[(&str, &str)]) -> Self {
        self.bttv_global = emotes(entries);
        self
    }

    pub(crate) fn with_bttv_channel(mut self, entries: &[(&str, &str)]) -> Self {
        self.bttv_channel = emotes(entries);
        self
    }

    pub(crate) fn with_ffz_channel(mut self, entries: &[(&str, &str)]) -> Self {
        self.ffz_channel = emotes(entries);
        self
    }

    pub(crate) fn with_pronouns(mut self, username: &str, pronoun_ids: &[&str]) -> Self {
        let records = pronoun_ids
            .iter()
            .map(|id| UserPronoun {
                pronoun_id: id.to_string(),
                login: Some(username.to_string()),
            })
            .collect();
        self.user_pronouns.insert(username.to_string(), records);
        self
    }

    /// Records served for `username` exactly as given, logins included.
    pub(crate) fn with_pronoun_records(mut self, username: &str, records: Vec<UserPronoun>) -> Self {
        self.user_pronouns.insert(username.to_string(), records);
        self
    }

    pub(crate) fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    async fn enter(&self, counter: &AtomicUsize, fail: &AtomicBool) -> Result<(), CatalogError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if fail.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    fn record_channel_id(&self, channel_id: &str) {
        let mut guard = match self.requested_channel_ids.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(channel_id.to_string());
    }
}

impl EmoteCatalog for FakeCatalog {
    async fn fetch_channel_id(&self, channel: &str) -> Result<String, CatalogError> {
        self.enter(&self.calls.identity, &self.fail_identity).await?;
        self.channel_ids
            .get(channel)
            .cloned()
            .ok_or_else(|| CatalogError::InvalidIdentity(format!("User not found: {channel}")))
    }

    async fn fetch_bttv_global(&self) -> Result<Vec<CatalogEmote>, CatalogError> {
        self.enter(&self.calls.bttv_global, &self.fail_bttv_global).await?;
        Ok(self.bttv_global.clone())
    }

    async fn fetch_bttv_channel(&self, channel_id: &str) -> Result<Vec<CatalogEmote>, CatalogError> {
        self.enter(&self.calls.bttv_channel, &self.fail_bttv_channel).await?;
        self.record_channel_id(channel_id);
        Ok(self.bttv_channel.clone())
    }

    async fn fetch_ffz_channel(&self, channel_id: &str) -> Result<Vec<CatalogEmote>, CatalogError> {
        self.enter(&self.calls.ffz_channel, &self.fail_ffz_channel).await?;
        self.record_channel_id(channel_id);
        Ok(self.ffz_channel.clone())
    }
}

impl PronounCatalog for FakeCatalog {
    async fn fetch_pronoun_names(&self) -> Result<Vec<PronounName>, CatalogError> {
        self.enter(&self.calls.pronoun_names, &self.fail_pronoun_names).await?;
        Ok([("hehim", "He/Him"), ("sheher", "She/Her"), ("theythem", "They/Them")]
            .iter()
            .map(|(name, display)| PronounName {
                name: name.to_string(),
                display: display.to_string(),
            })
            .collect())
    }

    async fn fetch_user_pronouns(&self, username: &str) -> Result<Vec<UserPronoun>, CatalogError> {
        self.enter(&self.calls.user_pronouns, &self.fail_user_pronouns).await?;
        Ok(self.user_pronouns.get(username).cloned().unwrap_or_default())
    }
}
