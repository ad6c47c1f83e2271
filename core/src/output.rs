//! Results of a generation pass.

use crate::diagnostic::Diagnostic;
use crate::traits::Host;

/// A named unit of generated source text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub source_id: String,
    pub text: String,
}

impl GeneratedSource {
    pub fn new(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            text: text.into(),
        }
    }
}

/// Everything one pass produced, in registration order.
///
/// `sources[0]` is always the marker definition.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutput {
    pub sources: Vec<GeneratedSource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PassOutput {
    /// Sources synthesized for marked types, excluding the marker definition.
    pub fn generated(&self) -> &[GeneratedSource] {
        self.sources.get(1..).unwrap_or_default()
    }

    pub fn source(&self, source_id: &str) -> Option<&GeneratedSource> {
        self.sources.iter().find(|s| s.source_id == source_id)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }

    /// Hand every source, then every diagnostic, to `host`.
    pub fn register_with<H: Host + ?Sized>(&self, host: &mut H) {
        for source in &self.sources {
            host.register(&source.source_id, &source.text);
        }
        for diagnostic in &self.diagnostics {
            host.report(diagnostic);
        }
    }
}

/// A [`Host`] that keeps everything in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingHost {
    pub sources: Vec<GeneratedSource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, source_id: &str) -> Option<&GeneratedSource> {
        self.sources.iter().find(|s| s.source_id == source_id)
    }
}

impl Host for CollectingHost {
    fn register(&mut self, source_id: &str, source_text: &str) {
        self.sources.push(GeneratedSource::new(source_id, source_text));
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn registers_sources_before_diagnostics() {
        let output = PassOutput {
            sources: vec![
                GeneratedSource::new("marker.cs", "// marker"),
                GeneratedSource::new("Generated_A", "// a"),
            ],
            diagnostics: vec![Diagnostic::new(
                DiagnosticKind::MissingPartialModifier {
                    type_name: "B".into(),
                },
                None,
            )],
        };

        let mut host = CollectingHost::new();
        output.register_with(&mut host);

        assert_eq!(host.sources, output.sources);
        assert_eq!(host.diagnostics, output.diagnostics);
        assert_eq!(output.generated().len(), 1);
        assert!(output.has_errors());
    }

    #[test]
    fn generated_is_empty_without_sources() {
        assert!(PassOutput::default().generated().is_empty());
    }
}
