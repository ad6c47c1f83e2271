//! Diagnostics reported to the host.
//!
//! Codes and messages form a closed set: every diagnostic the pipeline can
//! produce is a [`DiagnosticKind`] variant, so tests can match on them
//! exhaustively.
//!
//! Codes are grouped by pipeline stage:
//! - `MYSG10xx` - precondition failures found by validation
//! - `MYSG1003` - driver-level duplicate detection

use core::fmt;

use crate::syntax::Location;

/// How the host should treat a diagnostic.
///
/// Severity is advisory: whether an `Error` fails the build is host policy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Stable diagnostic codes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// The marked type is not declared `partial`.
    Mysg1001,

    /// A type containing the marked type is not declared `partial`.
    Mysg1002,

    /// The marker appears on more than one declaration of the same type.
    Mysg1003,

    /// The marked type already declares a parameterless `ToString`.
    Mysg1004,

    /// The marked type is `static`.
    Mysg1005,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::Mysg1001 => "MYSG1001",
            DiagnosticCode::Mysg1002 => "MYSG1002",
            DiagnosticCode::Mysg1003 => "MYSG1003",
            DiagnosticCode::Mysg1004 => "MYSG1004",
            DiagnosticCode::Mysg1005 => "MYSG1005",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every condition the pipeline reports.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    MissingPartialModifier { type_name: String },
    ContainingTypeNotPartial { type_name: String, containing: String },
    DuplicateMarker { type_name: String },
    ToStringAlreadyDefined { type_name: String },
    StaticType { type_name: String },
}

impl DiagnosticKind {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            DiagnosticKind::MissingPartialModifier { .. } => DiagnosticCode::Mysg1001,
            DiagnosticKind::ContainingTypeNotPartial { .. } => DiagnosticCode::Mysg1002,
            DiagnosticKind::DuplicateMarker { .. } => DiagnosticCode::Mysg1003,
            DiagnosticKind::ToStringAlreadyDefined { .. } => DiagnosticCode::Mysg1004,
            DiagnosticKind::StaticType { .. } => DiagnosticCode::Mysg1005,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::DuplicateMarker { .. } => Severity::Warning,
            DiagnosticKind::MissingPartialModifier { .. }
            | DiagnosticKind::ContainingTypeNotPartial { .. }
            | DiagnosticKind::ToStringAlreadyDefined { .. }
            | DiagnosticKind::StaticType { .. } => Severity::Error,
        }
    }

    /// Short, fixed title of the diagnostic.
    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingPartialModifier { .. } => "partial keyword not found",
            DiagnosticKind::ContainingTypeNotPartial { .. } => {
                "containing type is not partial"
            }
            DiagnosticKind::DuplicateMarker { .. } => "duplicate marker",
            DiagnosticKind::ToStringAlreadyDefined { .. } => "ToString already defined",
            DiagnosticKind::StaticType { .. } => "static type cannot be augmented",
        }
    }

    /// The type the diagnostic is about.
    pub fn type_name(&self) -> &str {
        match self {
            DiagnosticKind::MissingPartialModifier { type_name }
            | DiagnosticKind::ContainingTypeNotPartial { type_name, .. }
            | DiagnosticKind::DuplicateMarker { type_name }
            | DiagnosticKind::ToStringAlreadyDefined { type_name }
            | DiagnosticKind::StaticType { type_name } => type_name,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingPartialModifier { type_name } => write!(
                f,
                "type `{type_name}` must be declared partial to generate a ToString method"
            ),
            DiagnosticKind::ContainingTypeNotPartial {
                type_name,
                containing,
            } => write!(
                f,
                "type `{containing}` must be declared partial because it contains `{type_name}`"
            ),
            DiagnosticKind::DuplicateMarker { type_name } => write!(
                f,
                "type `{type_name}` is marked on more than one declaration; only the first is generated"
            ),
            DiagnosticKind::ToStringAlreadyDefined { type_name } => write!(
                f,
                "type `{type_name}` already declares ToString()"
            ),
            DiagnosticKind::StaticType { type_name } => write!(
                f,
                "static type `{type_name}` cannot declare an instance ToString override"
            ),
        }
    }
}

/// A structured record `{code, severity, message, location}`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// `None` when no precise span is available.
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Option<Location>) -> Self {
        Self { kind, location }
    }

    pub fn code(&self) -> DiagnosticCode {
        self.kind.code()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity(), self.code(), self.kind)?;
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }
        Ok(())
    }
}
