//! Per-message tags consumed by the decorator.

use std::collections::{HashMap, HashSet};

use crate::native::{EmoteOccurrenceMap, parse_emotes_tag};

/// Tag dictionary of one chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTags {
    /// Sender login; keys the pronoun lookup.
    pub username: String,
    pub display_name: String,
    pub color: Option<String>,
    /// `"action"` for `/me` messages.
    pub message_type: Option<String>,
    pub emotes: Option<EmoteOccurrenceMap>,
    /// Badge set -> version, in tag order.
    pub badges: Option<Vec<(String, String)>>,
}

impl MessageTags {
    /// Build from raw IRCv3 tags (`display-name`, `color`, `emotes`, `badges`,
    /// `message-type`, `login`/`username`). Values are unescaped.
    pub fn from_irc_tags(tags: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            tags.get(key)
                .map(|value| unescape_tag_value(value))
                .filter(|value| !value.is_empty())
        };

        let display_name = get("display-name").unwrap_or_default();
        let username = get("login")
            .or_else(|| get("username"))
            .unwrap_or_else(|| display_name.to_lowercase());

        Self {
            username,
            display_name,
            color: get("color"),
            message_type: get("message-type"),
            emotes: get("emotes").and_then(|raw| parse_emotes_tag(&raw)),
            badges: get("badges").and_then(|raw| parse_badges_tag(&raw)),
        }
    }

    pub fn is_action(&self) -> bool {
        self.message_type.as_deref() == Some("action")
    }

    /// Badge set names in tag order; empty when no badges tag was present.
    pub fn badge_keys(&self) -> Vec<String> {
        self.badges
            .as_ref()
            .map(|badges| badges.iter().map(|(set, _)| set.clone()).collect())
            .unwrap_or_default()
    }
}

/// Parse a `badges` tag such as `broadcaster/1,subscriber/12`.
///
/// A repeated set keeps its first position and last version.
pub fn parse_badges_tag(raw: &str) -> Option<Vec<(String, String)>> {
    let mut badges: Vec<(String, String)> = Vec::new();
    let mut seen = HashSet::new();
    for item in raw.split(',') {
        let (set, version) = item.split_once('/').unwrap_or((item, ""));
        let set = set.trim();
        if set.is_empty() {
            continue;
        }
        if seen.insert(set.to_string()) {
            badges.push((set.to_string(), version.trim().to_string()));
        } else if let Some(existing) = badges.iter_mut().find(|(name, _)| name == set) {
            existing.1 = version.trim().to_string();
        }
    }

    if badges.is_empty() { None } else { Some(badges) }
}

/// Undo IRCv3 tag value escaping.
pub fn unescape_tag_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(':') => out.push(';'),
            Some('s') => out.push(' '),
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            // A trailing lone backslash is dropped.
            None => {}
        }
    }
    out
}
