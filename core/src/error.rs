//! Errors that abort a generation pass.
//!
//! User mistakes never surface here; they are [`Diagnostic`](crate::Diagnostic)s.
//! An [`Error`] means the pass itself could not be completed, and nothing from
//! the pass is registered with the host.

use thiserror::Error;

/// Pass-aborting failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The front end rejected the bundled marker definition.
    #[error("marker definition `{source_id}` could not be parsed: {reason}")]
    MarkerSource { source_id: String, reason: String },

    /// A candidate reached the synthesizer with data no front end should
    /// produce.
    #[error("malformed candidate in `{source_id}`: {reason}")]
    MalformedCandidate { source_id: String, reason: String },

    /// Two generated sources in one pass share an id.
    #[error("generated source id `{source_id}` is not unique")]
    DuplicateSourceId { source_id: String },
}

impl Error {
    pub(crate) fn malformed(source_id: &str, reason: impl Into<String>) -> Self {
        Error::MalformedCandidate {
            source_id: source_id.to_owned(),
            reason: reason.into(),
        }
    }
}
