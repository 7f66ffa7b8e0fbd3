//! Code-addressed emote substitution (BTTV global, BTTV channel, FFZ channel).

use std::fmt;

use regex::NoExpand;

use crate::lookup::EmoteLookupTable;

const BTTV_URL_PREFIX: &str = "https://cdn.betterttv.net/emote";
const FFZ_URL_PREFIX: &str = "https://cdn.betterttv.net/frankerfacez_emote";

/// A third-party emote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmoteSource {
    BttvGlobal,
    BttvChannel,
    FfzChannel,
}

impl EmoteSource {
    /// Order in which sources are applied to a message.
    pub const PIPELINE: [EmoteSource; 3] = [Self::BttvGlobal, Self::BttvChannel, Self::FfzChannel];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BttvGlobal => "bttv-global",
            Self::BttvChannel => "bttv-channel",
            Self::FfzChannel => "ffz-channel",
        }
    }

    pub fn image_tag(self, emote_id: &str) -> String {
        match self {
            Self::BttvGlobal | Self::BttvChannel => {
                format!(r#"<img src="{BTTV_URL_PREFIX}/{emote_id}/2x" />"#)
            }
            Self::FfzChannel => format!(r#"<img src="{FFZ_URL_PREFIX}/{emote_id}/2" />"#),
        }
    }
}

impl fmt::Display for EmoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace every whole-word occurrence of a known code with `source`'s tag.
///
/// Codes are applied one after another in table order against the message as
/// already rewritten by earlier codes, so a code that also occurs inside a
/// previously inserted tag or next to another code's replacement can still
/// match there.
pub fn replace_code_emotes(message: &str, table: &EmoteLookupTable, source: EmoteSource) -> String {
    if !table.codes().any(|code| message.contains(code)) {
        return message.to_string();
    }

    let mut result = message.to_string();
    for matcher in table.matchers() {
        if !result.contains(matcher.code.as_str()) {
            continue;
        }
        let tag = source.image_tag(&matcher.entry.id);
        result = matcher
            .pattern
            .replace_all(&result, NoExpand(&tag))
            .into_owned();
    }
    result
}
