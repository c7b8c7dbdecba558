use std::fs;
use std::path::{Path, PathBuf};

use super::core::Language;
use crate::error::{Error, Result};
use crate::pool::WordPool;

/// Supplies the candidate words for a session; called once at startup
pub trait WordSource {
    fn load_words(&self) -> Result<WordPool>;
}

/// A word list compiled into the binary
pub struct BundledWords {
    name: String,
}

impl BundledWords {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl WordSource for BundledWords {
    fn load_words(&self) -> Result<WordPool> {
        Language::bundled(&self.name)?.into_pool()
    }
}

/// A user word list on disk: `.json` files are parsed as json, anything
/// else as one word per line
pub struct FileWords {
    path: PathBuf,
}

impl FileWords {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WordSource for FileWords {
    fn load_words(&self) -> Result<WordPool> {
        let contents = fs::read_to_string(&self.path).map_err(|source| Error::WordList {
            path: self.path.clone(),
            source,
        })?;

        let name = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());

        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let language = if is_json {
            Language::from_json_str(&name, &contents).map_err(|source| Error::WordListJson {
                path: self.path.clone(),
                source,
            })?
        } else {
            Language::from_plain_text(&name, &contents)
        };

        log::info!(
            "loaded {} words from {}",
            language.words.len(),
            self.path.display()
        );
        language.into_pool()
    }
}

/// Pick the word source: a user file when one is configured, otherwise the
/// bundled list
pub fn word_source(word_list: Option<&Path>) -> Box<dyn WordSource> {
    match word_list {
        Some(path) => Box::new(FileWords::new(path)),
        None => Box::new(BundledWords::new(super::core::DEFAULT_LANGUAGE)),
    }
}
