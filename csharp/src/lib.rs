#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! C# front end for `reprgen`.
//!
//! Parses the declaration level of C# source (namespaces, using directives,
//! attributed type declarations and member signatures) into the
//! [`reprgen_core`] syntax model, and resolves attribute names with C#
//! namespace lookup rules.
//!
//! ```
//! use reprgen_core::Frontend;
//! use reprgen_csharp::CSharp;
//!
//! let tree = CSharp::default()
//!     .parse("User.cs", "namespace Shop { public partial class User { } }")
//!     .unwrap();
//! assert_eq!(tree.scopes.len(), 2);
//! ```

use reprgen_core::{CompilationView, Frontend, Span, SyntaxTree};
use thiserror::Error;

mod config;
mod parse;
mod semantic;
mod stream;
mod tokens;
mod traits;

pub use config::{ParseConfig, RecursionGuard};
pub use parse::parse_source;
pub use semantic::CsSemanticModel;
pub use stream::{Spanned, SpannedToken, TokenStream};
pub use tokens::Token;
pub use traits::{Diagnostic, Parse, Peek};

#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
pub enum CsError {
    #[default]
    #[error("unrecognized input")]
    Lex,

    #[error("expected {expect}, found {found}")]
    Expected { expect: &'static str, found: String },

    #[error("expected {expect}, found EOF")]
    Empty { expect: &'static str },

    #[error("unterminated {what} block")]
    UnterminatedBlock { what: &'static str },

    #[error("type declarations nested {depth} deep, limit is {limit}")]
    NestingLimitExceeded { depth: usize, limit: usize },

    #[error("{source}")]
    Spanned {
        #[source]
        source: Box<CsError>,
        span: Span,
    },
}

impl CsError {
    pub fn expected<D: Diagnostic>(found: &Token) -> Self {
        Self::Expected {
            expect: D::fmt(),
            found: found.to_string(),
        }
    }

    pub fn empty<D: Diagnostic>() -> Self {
        Self::Empty { expect: D::fmt() }
    }

    /// Attach `span`. An error that already has one keeps it.
    pub fn with_span(self, span: Span) -> Self {
        match self {
            Self::Spanned { .. } => self,
            other => Self::Spanned {
                source: Box::new(other),
                span,
            },
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Spanned { span, .. } => Some(*span),
            _ => None,
        }
    }

    /// The error without its span wrapper.
    pub fn innermost(&self) -> &CsError {
        match self {
            Self::Spanned { source, .. } => source.innermost(),
            other => other,
        }
    }
}

/// The C# [`Frontend`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharp {
    config: ParseConfig,
}

impl CSharp {
    pub const fn new(config: ParseConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ParseConfig {
        &self.config
    }
}

impl Frontend for CSharp {
    type Model = CsSemanticModel;
    type Error = CsError;

    fn parse(&self, source_id: &str, text: &str) -> Result<SyntaxTree, CsError> {
        parse_source(source_id, text, &self.config)
    }

    fn model(&self, view: &CompilationView<'_>) -> CsSemanticModel {
        CsSemanticModel::from_trees(view.trees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_span_does_not_rewrap() {
        let err = CsError::Lex
            .with_span(Span::new(1, 2))
            .with_span(Span::new(5, 9));
        assert_eq!(err.span(), Some(Span::new(1, 2)));
        assert_eq!(err.innermost(), &CsError::Lex);
    }

    #[test]
    fn spanned_errors_display_their_source() {
        let err = CsError::Empty { expect: "`}`" }.with_span(Span::new(0, 0));
        assert_eq!(err.to_string(), "expected `}`, found EOF");
    }
}
