//! Error types for the word-level Huffman pipeline.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures that end a compression run.
#[derive(Debug, Error)]
pub enum Error {
    /// The input held no non-blank text block.
    #[error("corpus contains no text blocks")]
    EmptyCorpus,

    /// The frequency table has no entries, so no tree can be built.
    #[error("empty vocabulary: no symbols to build a code from")]
    EmptyVocabulary,

    /// Reading the corpus or writing the report failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bad command-line arguments.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures of the optional tree renderer. Never fatal to a run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("tree rendering is disabled")]
    Disabled,

    /// The Graphviz `dot` executable is missing.
    #[error("graphviz `dot` executable not available")]
    Unavailable,

    #[error("`dot` exited with {0}")]
    Failed(ExitStatus),

    #[error("could not write DOT file: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
