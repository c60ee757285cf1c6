//! Error types for typicon-core (made by FontLab https://www.fontlab.com/)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypiconError {
    #[error("icon root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error walking icon tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("name is not valid UTF-8: {}", .0.display())]
    NonUtf8Name(PathBuf),

    #[error("icon identifier {identifier:?} is defined twice: {first} and {second}")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("codepoint for {identifier:?} would exceed U+10FFFF (base U+{base:04X}, {count} icons)")]
    CodepointOverflow {
        identifier: String,
        base: u32,
        count: usize,
    },

    #[error("cannot parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl TypiconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TypiconError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = TypiconError> = std::result::Result<T, E>;
