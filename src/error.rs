use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library half of wordrush.
#[derive(Debug, Error)]
pub enum Error {
    /// The word source produced nothing usable; a session cannot start.
    #[error("no words available")]
    EmptyWordPool,

    #[error("unable to read word list {path}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse word list {path}")]
    WordListJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bundled word list `{0}` is missing or corrupt")]
    EmbeddedList(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
