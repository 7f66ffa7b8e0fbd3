//! Message decorator: emote substitution plus speaker metadata.

use std::sync::Arc;

use catalog_client::CatalogClient;
use serde::Serialize;

use crate::DecorateError;
use crate::config::DecoratorConfig;
use crate::lookup::{EmoteCatalog, LookupCache, PronounCatalog};
use crate::pipeline::replace_emotes_with_image_tags;
use crate::pronouns::PronounCache;
use crate::tags::MessageTags;

/// A chat message ready for the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedMessage {
    #[serde(rename = "messageHTML")]
    pub message_html: String,
    pub pronouns_text: Option<String>,
    pub display_name: String,
    pub user_color: Option<String>,
    pub is_slash_me_message: bool,
    pub badge_keys: Vec<String>,
}

/// Decorates messages against shared, process-wide caches.
pub struct MessageDecorator<C> {
    lookup: Arc<LookupCache<C>>,
    pronouns: Arc<PronounCache<C>>,
}

impl<C> Clone for MessageDecorator<C> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            pronouns: Arc::clone(&self.pronouns),
        }
    }
}

impl MessageDecorator<CatalogClient> {
    /// Decorator backed by the real catalog services.
    pub fn from_config(config: &DecoratorConfig) -> Self {
        let client = Arc::new(CatalogClient::with_endpoints(config.endpoints.clone()));
        Self::new(client, config)
    }
}

impl<C: EmoteCatalog + PronounCatalog> MessageDecorator<C> {
    pub fn new(catalog: Arc<C>, config: &DecoratorConfig) -> Self {
        let lookup = LookupCache::new(
            Arc::clone(&catalog),
            config.channel.clone(),
            config.failure_policies,
        );
        Self::from_parts(Arc::new(lookup), Arc::new(PronounCache::new(catalog)))
    }

    pub fn from_parts(lookup: Arc<LookupCache<C>>, pronouns: Arc<PronounCache<C>>) -> Self {
        Self { lookup, pronouns }
    }

    pub fn lookup(&self) -> &LookupCache<C> {
        &self.lookup
    }

    /// Forget every cached emote catalog and the channel identity. Clones
    /// share the caches, so they see the reset too.
    pub fn reset_emote_caches(&self) {
        self.lookup.reset();
    }

    /// Substitute emotes in `message` and attach the sender's metadata.
    ///
    /// Catalog failures only disable the affected emote source; a failed
    /// pronoun lookup fails the whole call.
    pub async fn decorate(
        &self,
        tags: &MessageTags,
        message: &str,
    ) -> Result<DecoratedMessage, DecorateError> {
        let message_html =
            replace_emotes_with_image_tags(&self.lookup, message, tags.emotes.as_ref()).await;
        let pronouns_text = self.pronouns.pronouns_for(&tags.username).await?;

        Ok(DecoratedMessage {
            message_html,
            pronouns_text,
            display_name: tags.display_name.clone(),
            user_color: tags.color.clone(),
            is_slash_me_message: tags.is_action(),
            badge_keys: tags.badge_keys(),
        })
    }
}
