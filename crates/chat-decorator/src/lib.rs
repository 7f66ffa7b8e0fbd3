//! Chat message decoration for stream overlays.
//!
//! Turns a raw chat line into an HTML fragment with emote `<img>` tags
//! (Twitch native, BTTV global, BTTV channel, FFZ channel) and attaches
//! the speaker's pronouns, display name, color and badges.

pub mod config;
pub mod decorator;
pub mod escape;
pub mod lookup;
pub mod native;
pub mod pipeline;
pub mod pronouns;
pub mod tags;
pub mod third_party;

#[cfg(test)]
mod test_support;

pub use config::{DecoratorConfig, FailurePolicies, FailurePolicy};
pub use decorator::{DecoratedMessage, MessageDecorator};
pub use lookup::{
    CatalogLookup, EmoteCatalog, EmoteLookupEntry, EmoteLookupTable, LookupCache, PronounCatalog,
};
pub use native::{EmoteOccurrenceMap, ReplacementSpan, replace_native_emotes};
pub use pronouns::PronounCache;
pub use tags::MessageTags;
pub use third_party::{EmoteSource, replace_code_emotes};

use catalog_client::CatalogError;

/// Unified error type for the chat-decorator crate.
#[derive(Debug, thiserror::Error)]
pub enum DecorateError {
    #[error("No channel configured for channel-scoped lookups")]
    MissingChannel,

    #[error("Catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),
}
