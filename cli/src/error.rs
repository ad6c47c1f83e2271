//! Errors that stop a CLI run.

use std::{io, path::PathBuf};

use thiserror::Error;

use reprgen::CsError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No C# sources found in the given inputs")]
    NoSources,

    /// An input is not valid C#. `src` is the full input text.
    #[error("Failed to parse {source_id}: {error}")]
    Parse {
        source_id: String,
        src: String,
        #[source]
        error: CsError,
    },

    #[error(transparent)]
    Generation(#[from] reprgen::Error),
}
