//! Twitch-native emote substitution driven by the `emotes` tag ranges.
//!
//! Ranges count Unicode codepoints, not bytes or grapheme clusters, so all
//! slicing here goes through `char` offsets.

use std::collections::HashMap;

/// Twitch emoticon CDN base.
pub const TWITCH_URL_PREFIX: &str = "https://static-cdn.jtvnw.net/emoticons/v2";

/// Emote ID -> `"start-end"` inclusive codepoint ranges. Only the first range
/// of each ID is used.
pub type EmoteOccurrenceMap = HashMap<String, Vec<String>>;

/// One pending splice, in codepoint offsets (`end_index` exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementSpan {
    pub start_index: usize,
    pub end_index: usize,
    pub replacement_text: String,
}

pub fn native_image_tag(emote_id: &str) -> String {
    format!(r#"<img src="{TWITCH_URL_PREFIX}/{emote_id}/default/light/2.0" alt="emote" />"#)
}

/// Build the splice list, ordered by start index descending.
pub fn replacement_spans(emotes: &EmoteOccurrenceMap) -> Vec<ReplacementSpan> {
    let mut spans: Vec<(&str, ReplacementSpan)> = Vec::with_capacity(emotes.len());

    for (emote_id, ranges) in emotes {
        let Some(first) = ranges.first() else {
            continue;
        };
        let Some((start, end)) = parse_range(first) else {
            tracing::warn!(emote_id, range = %first, "Skipping malformed emote range");
            continue;
        };
        spans.push((
            emote_id.as_str(),
            ReplacementSpan {
                start_index: start,
                end_index: end.saturating_add(1),
                replacement_text: native_image_tag(emote_id),
            },
        ));
    }

    // Tie-break on ID so equal starts splice in a stable order.
    spans.sort_by(|(id_a, a), (id_b, b)| {
        b.start_index
            .cmp(&a.start_index)
            .then_with(|| id_a.cmp(id_b))
    });
    spans.into_iter().map(|(_, span)| span).collect()
}

/// Replace every native emote occurrence with an `<img>` tag.
///
/// Spans are applied right to left so each splice leaves the offsets of the
/// spans still pending untouched.
pub fn replace_native_emotes(message: &str, emotes: Option<&EmoteOccurrenceMap>) -> String {
    let Some(emotes) = emotes else {
        return message.to_string();
    };

    let mut result = message.to_string();
    for span in replacement_spans(emotes) {
        result = splice_codepoints(&result, &span);
    }
    result
}

/// Parse the raw IRC `emotes` tag, e.g. `25:0-4,12-16/1902:6-10`.
pub fn parse_emotes_tag(raw: &str) -> Option<EmoteOccurrenceMap> {
    let mut map = EmoteOccurrenceMap::new();
    for entry in raw.split('/') {
        let Some((emote_id, ranges)) = entry.split_once(':') else {
            continue;
        };
        let emote_id = emote_id.trim();
        let ranges: Vec<String> = ranges
            .split(',')
            .map(str::trim)
            .filter(|range| !range.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if emote_id.is_empty() || ranges.is_empty() {
            continue;
        }
        map.insert(emote_id.to_string(), ranges);
    }

    if map.is_empty() { None } else { Some(map) }
}

fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, end) = range.split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}

fn splice_codepoints(text: &str, span: &ReplacementSpan) -> String {
    let prefix_end = byte_offset(text, span.start_index);
    let suffix_start = byte_offset(text, span.end_index);
    let mut out =
        String::with_capacity(prefix_end + span.replacement_text.len() + text.len() - suffix_start);
    out.push_str(&text[..prefix_end]);
    out.push_str(&span.replacement_text);
    out.push_str(&text[suffix_start..]);
    out
}

/// Byte offset of the `n`th codepoint, clamped to the end of `text`.
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
