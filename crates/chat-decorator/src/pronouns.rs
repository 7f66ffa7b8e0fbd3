//! Pronoun lookup with a per-user single-flight cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use crate::DecorateError;
use crate::lookup::PronounCatalog;

type UserSlot = Arc<OnceCell<Option<String>>>;

/// Memoized pronoun display text per username.
pub struct PronounCache<C> {
    catalog: Arc<C>,
    /// Pronoun ID -> display text, e.g. `theythem` -> `They/Them`.
    names: OnceCell<HashMap<String, String>>,
    users: Mutex<HashMap<String, UserSlot>>,
}

impl<C: PronounCatalog> PronounCache<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            names: OnceCell::new(),
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Pronoun display text for `username`, or `None` if the user has none set.
    ///
    /// A successful answer (including `None`) is cached for the cache
    /// lifetime; a failed user fetch is returned and retried next time.
    pub async fn pronouns_for(&self, username: &str) -> Result<Option<String>, DecorateError> {
        let key = username.trim().to_lowercase();
        if key.is_empty() {
            return Ok(None);
        }

        let names = self.names().await;
        let slot = self.user_slot(&key);
        let pronoun = slot
            .get_or_try_init(|| async {
                let records = self.catalog.fetch_user_pronouns(&key).await?;
                let pronouns = records
                    .iter()
                    .find(|record| {
                        record
                            .login
                            .as_deref()
                            .is_none_or(|login| login.eq_ignore_ascii_case(&key))
                    })
                    .and_then(|record| names.get(&record.pronoun_id))
                    .cloned();
                tracing::debug!(username = %key, pronouns = ?pronouns, "Resolved user pronouns");
                Ok::<_, DecorateError>(pronouns)
            })
            .await?;
        Ok(pronoun.clone())
    }

    /// Number of users with a cached answer.
    pub fn cached_users(&self) -> usize {
        let guard = match self.users.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.values().filter(|slot| slot.initialized()).count()
    }

    /// The name catalog is fetched once whatever the outcome.
    async fn names(&self) -> &HashMap<String, String> {
        self.names
            .get_or_init(|| async {
                match self.catalog.fetch_pronoun_names().await {
                    Ok(names) => {
                        let map: HashMap<String, String> = names
                            .into_iter()
                            .map(|pronoun| (pronoun.name, pronoun.display))
                            .collect();
                        tracing::debug!(count = map.len(), "Pronoun names cached");
                        map
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to fetch pronoun names");
                        HashMap::new()
                    }
                }
            })
            .await
    }

    fn user_slot(&self, key: &str) -> UserSlot {
        let mut guard = match self.users.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entry(key.to_string()).or_default().clone()
    }
}
