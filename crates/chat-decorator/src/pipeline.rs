//! Emote substitution pipeline: native ranges first, then each third-party
//! source in [`EmoteSource::PIPELINE`] order.

use crate::lookup::{CatalogLookup, EmoteCatalog, LookupCache};
use crate::native::{EmoteOccurrenceMap, replace_native_emotes};
use crate::third_party::{EmoteSource, replace_code_emotes};

/// Run one code-based stage. An unavailable catalog leaves the message as is.
pub async fn substitute_source<C: EmoteCatalog>(
    lookup: &LookupCache<C>,
    source: EmoteSource,
    message: String,
) -> String {
    match lookup.table(source).await {
        CatalogLookup::Ready(table) => replace_code_emotes(&message, &table, source),
        CatalogLookup::Unavailable => message,
    }
}

/// Replace every emote in `message` with an `<img>` tag.
pub async fn replace_emotes_with_image_tags<C: EmoteCatalog>(
    lookup: &LookupCache<C>,
    message: &str,
    emotes: Option<&EmoteOccurrenceMap>,
) -> String {
    let mut result = replace_native_emotes(message, emotes);
    for source in EmoteSource::PIPELINE {
        result = substitute_source(lookup, source, result).await;
    }
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::config::FailurePolicies;
    use crate::native::native_image_tag;
    use crate::test_support::FakeCatalog;

    fn cache(catalog: FakeCatalog) -> (Arc<FakeCatalog>, LookupCache<FakeCatalog>) {
        let catalog = Arc::new(catalog.with_channel("somestreamer", "71092938"));
        let cache = LookupCache::new(
            catalog.clone(),
            Some("somestreamer".into()),
            FailurePolicies::default(),
        );
        (catalog, cache)
    }

    #[tokio::test]
    async fn applies_all_sources_after_native_emotes() {
        let (_, cache) = cache(
            FakeCatalog::default()
                .with_bttv_global(&[("SourPls", "g1")])
                .with_bttv_channel(&[("catJAM", "c1")])
                .with_ffz_channel(&[("OMEGALUL", "128054")]),
        );
        let emotes: EmoteOccurrenceMap =
            [("25".to_string(), vec!["0-4".to_string()])].into_iter().collect();

        let result = replace_emotes_with_image_tags(
            &cache,
            "Kappa SourPls catJAM OMEGALUL",
            Some(&emotes),
        )
        .await;

        assert_eq!(
            result,
            format!(
                "{} {} {} {}",
                native_image_tag("25"),
                EmoteSource::BttvGlobal.image_tag("g1"),
                EmoteSource::BttvChannel.image_tag("c1"),
                EmoteSource::FfzChannel.image_tag("128054"),
            )
        );
    }

    #[tokio::test]
    async fn unavailable_source_is_skipped() {
        let catalog = FakeCatalog::default()
            .with_bttv_global(&[("SourPls", "g1")])
            .with_ffz_channel(&[("OMEGALUL", "128054")]);
        catalog.fail_bttv_global.store(true, Ordering::SeqCst);
        let (_, cache) = cache(catalog);

        let result = replace_emotes_with_image_tags(&cache, "SourPls OMEGALUL", None).await;
        assert_eq!(
            result,
            format!("SourPls {}", EmoteSource::FfzChannel.image_tag("128054"))
        );
    }

    #[tokio::test]
    async fn earlier_source_wins_for_shared_code() {
        let (_, cache) = cache(
            FakeCatalog::default()
                .with_bttv_global(&[("Clap", "global")])
                .with_bttv_channel(&[("Clap", "channel")]),
        );

        let result = replace_emotes_with_image_tags(&cache, "Clap", None).await;
        assert_eq!(result, EmoteSource::BttvGlobal.image_tag("global"));
    }

    #[tokio::test]
    async fn plain_message_still_loads_each_table_once() {
        let (catalog, cache) = cache(FakeCatalog::default().with_bttv_global(&[("LUL", "x")]));

        for _ in 0..3 {
            let result = replace_emotes_with_image_tags(&cache, "hello chat", None).await;
            assert_eq!(result, "hello chat");
        }
        assert_eq!(catalog.calls.bttv_global.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.calls.bttv_channel.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.calls.ffz_channel.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.calls.identity.load(Ordering::SeqCst), 1);
    }
}
