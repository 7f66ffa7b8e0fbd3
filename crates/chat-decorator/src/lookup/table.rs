use std::collections::HashMap;

use catalog_client::CatalogEmote;
use regex::Regex;

use crate::escape::escape_pattern;

/// Identifies one third-party emote image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteLookupEntry {
    pub id: String,
    /// Informational; the URL shape is fixed per source.
    pub image_type: String,
}

pub(crate) struct CodeMatcher {
    pub(crate) code: String,
    pub(crate) entry: EmoteLookupEntry,
    pub(crate) pattern: Regex,
}

/// Emote code -> entry, iterated in catalog order.
///
/// Each code carries a precompiled matcher bounded by ASCII word boundaries,
/// so letters outside ASCII never count as part of a word.
#[derive(Default)]
pub struct EmoteLookupTable {
    matchers: Vec<CodeMatcher>,
    /// Code -> position in `matchers`.
    index: HashMap<String, usize>,
}

impl EmoteLookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from catalog emotes. A repeated code keeps its first position
    /// and takes the later entry.
    pub fn from_emotes<I>(emotes: I) -> Self
    where
        I: IntoIterator<Item = CatalogEmote>,
    {
        let mut table = Self::new();
        for emote in emotes {
            table.insert(
                emote.code,
                EmoteLookupEntry {
                    id: emote.id,
                    image_type: emote.image_type,
                },
            );
        }
        table
    }

    /// Add or replace one code. Empty codes are ignored.
    pub fn insert(&mut self, code: String, entry: EmoteLookupEntry) {
        if code.is_empty() {
            return;
        }
        if let Some(&pos) = self.index.get(&code) {
            self.matchers[pos].entry = entry;
            return;
        }

        let pattern = match Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", escape_pattern(&code))) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(code, error = %e, "Skipping emote code with unusable pattern");
                return;
            }
        };
        self.index.insert(code.clone(), self.matchers.len());
        self.matchers.push(CodeMatcher {
            code,
            entry,
            pattern,
        });
    }

    pub fn get(&self, code: &str) -> Option<&EmoteLookupEntry> {
        self.index.get(code).map(|&pos| &self.matchers[pos].entry)
    }

    /// Codes in catalog order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub(crate) fn matchers(&self) -> &[CodeMatcher] {
        &self.matchers
    }
}

impl std::fmt::Debug for EmoteLookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.matchers.iter().map(|m| (&m.code, &m.entry)))
            .finish()
    }
}

impl FromIterator<CatalogEmote> for EmoteLookupTable {
    fn from_iter<T: IntoIterator<Item = CatalogEmote>>(iter: T) -> Self {
        Self::from_emotes(iter)
    }
}
