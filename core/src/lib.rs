#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! Host-agnostic core of the `ToString` generator.
//!
//! The crate finds type declarations opted in through a marker attribute,
//! checks that they can be augmented, and synthesizes a partial
//! re-declaration carrying a generated `ToString` override. Parsing and
//! semantic lookup are supplied by a [`Frontend`]; results are handed to a
//! [`Host`].

mod compilation;
pub mod config;
pub mod descriptor;
mod diagnostic;
mod error;
mod output;
pub mod pipeline;
pub mod syntax;
pub mod traits;

pub use compilation::{Compilation, CompilationView};
pub use config::{GeneratorConfig, LineEnding};
pub use descriptor::{MarkerDescriptor, TO_STRING_GENERATOR};
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticKind, Severity};
pub use error::Error;
pub use output::{CollectingHost, GeneratedSource, PassOutput};
pub use pipeline::{Generator, Stage, TypeCandidate, Verdict};
pub use syntax::{
    Attribute, AttributeList, AttributeName, FieldDecl, Ident, Item, Location, Member,
    MethodDecl, Modifier, NamespaceDecl, PropertyDecl, QualifiedName, Scope, ScopeId, Span,
    SyntaxTree, TypeDecl, TypeKeyword, UsingDirective, Visit,
};
pub use traits::{Frontend, Host, Printer, SemanticModel, SourcePrinter, ToSource};
