//! Error adapter for rendering generator diagnostics and CLI errors with
//! miette.
//!
//! Generator diagnostics and parse errors carry a span into an input file and
//! are rendered as a labeled snippet of that file. Every other error renders as
//! a plain message.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use reprgen::{Diagnostic, DiagnosticKind, Severity, Span};

use crate::{Outcome, error::CliError};

/// Adapter for a single generator diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Text of the source the diagnostic points into, when known.
    src: Option<&'a str>,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: Option<&'a str>) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.code()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(help_for(&self.diag.kind)))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.src?;
        let location = self.diag.location()?;
        let label = LabeledSpan::new_primary_with_span(
            Some(self.diag.kind.title().to_owned()),
            span_to_miette(location.span),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

fn help_for(kind: &DiagnosticKind) -> String {
    match kind {
        DiagnosticKind::MissingPartialModifier { .. } => "add the `partial` modifier".to_owned(),
        DiagnosticKind::ContainingTypeNotPartial { containing, .. } => {
            format!("declare `{containing}` as `partial` as well")
        }
        DiagnosticKind::DuplicateMarker { .. } => {
            "keep the marker on a single declaration of the type".to_owned()
        }
        DiagnosticKind::ToStringAlreadyDefined { .. } => {
            "remove the existing `ToString` override or the marker".to_owned()
        }
        DiagnosticKind::StaticType { .. } => "remove the `static` modifier".to_owned(),
    }
}

/// Adapter for [`CliError`] variants.
///
/// Parse errors point into their source; everything else has no snippet.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Config(_) => "reprgen::config",
            CliError::Read { .. } | CliError::Write { .. } => "reprgen::io",
            CliError::NoSources => "reprgen::input",
            CliError::Parse { .. } => "reprgen::parse",
            CliError::Generation(_) => "reprgen::generate",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CliError::NoSources => Some(Box::new("pass `.cs` files or directories containing them")),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            CliError::Parse { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let CliError::Parse { error, .. } = &self.0 else {
            return None;
        };
        let span = error.span()?;
        let label = LabeledSpan::new_primary_with_span(
            Some(error.innermost().to_string()),
            span_to_miette(span),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A generator diagnostic.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error that stopped the run.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`CliError`] into a reportable error.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// One reportable per diagnostic of a finished run, each paired with the
/// input it points into.
pub fn diagnostics_to_reportables(outcome: &Outcome) -> Vec<Reportable<'_>> {
    outcome
        .diagnostics
        .iter()
        .map(|diag| {
            let src = diag
                .location()
                .and_then(|location| outcome.inputs.get(&location.source_id))
                .map(String::as_str);
            Reportable::Diagnostic(DiagnosticAdapter::new(diag, src))
        })
        .collect()
}
