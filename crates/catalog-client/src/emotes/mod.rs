//! BTTV and FFZ emote catalogs.
//!
//! All three catalogs are served by the BTTV API: the global BTTV set,
//! a channel's BTTV set (own plus shared emotes), and the channel's FFZ set
//! mirrored by BTTV.

mod api;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One emote as listed by a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEmote {
    // FFZ emotes carry numeric IDs; BTTV uses hex strings.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub code: String,
    #[serde(rename = "imageType", default)]
    pub image_type: String,
}

/// BTTV response for `users/twitch/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BttvChannelEmotes {
    #[serde(rename = "channelEmotes", default)]
    pub channel_emotes: Vec<CatalogEmote>,
    #[serde(rename = "sharedEmotes", default)]
    pub shared_emotes: Vec<CatalogEmote>,
}

impl BttvChannelEmotes {
    /// Channel-owned emotes followed by shared ones.
    pub fn into_merged(self) -> Vec<CatalogEmote> {
        let mut out = self.channel_emotes;
        out.extend(self.shared_emotes);
        out
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number emote id, got {other}"
        ))),
    }
}
