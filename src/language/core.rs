use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::{from_str, Value};

use crate::error::{Error, Result};
use crate::pool::WordPool;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const DEFAULT_LANGUAGE: &str = "english";

/// A named list of candidate words
#[derive(Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    pub words: Vec<String>,
}

// Word lists are accepted either as `{"name": .., "words": [..]}` or as a bare
// array. Entries are kept as raw json values so one bad entry does not sink
// the whole list.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Named { name: String, words: Vec<Value> },
    Bare(Vec<Value>),
}

impl Language {
    /// Word list compiled into the binary, e.g. `english`
    pub fn bundled(name: &str) -> Result<Self> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| Error::EmbeddedList(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::EmbeddedList(name.to_string()))?;

        Self::from_json_str(name, contents).map_err(|_| Error::EmbeddedList(name.to_string()))
    }

    /// Parse a json word list. Entries that are not strings, or are blank,
    /// are skipped.
    pub fn from_json_str(fallback_name: &str, json: &str) -> serde_json::Result<Self> {
        let (name, raw) = match from_str::<RawList>(json)? {
            RawList::Named { name, words } => (name, words),
            RawList::Bare(words) => (fallback_name.to_string(), words),
        };

        let words = raw
            .iter()
            .filter_map(Value::as_str)
            .filter_map(clean_word)
            .collect();

        Ok(Self { name, words })
    }

    /// One word per line; blank lines and `#` comments are skipped
    pub fn from_plain_text(name: &str, text: &str) -> Self {
        let words = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .filter_map(clean_word)
            .collect();

        Self {
            name: name.to_string(),
            words,
        }
    }

    pub fn into_pool(self) -> Result<WordPool> {
        WordPool::new(self.words)
    }
}

// Outer whitespace can never be typed back (input is trimmed), so drop it here
fn clean_word(raw: &str) -> Option<String> {
    let word = raw.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_string())
    }
}
