//! The generation pass.
//!
//! A [`Generator`] wires the stages together, one pass per call:
//!
//! ```text
//! Idle -> MarkerInjected -> Collected -> Resolved -> Validated -> Synthesized -> Registered
//! ```
//!
//! Everything up to `Synthesized` is a pure computation over the input trees.
//! Only a fully successful pass reaches the host; a pass aborted by an
//! [`Error`] registers nothing.

mod collect;
mod resolve;
mod synthesize;
mod validate;

pub use collect::{CandidateCollector, DeclarationIndex, TypeCandidate, collect_candidates};
pub use resolve::{find_marker, is_marked};
pub use synthesize::{RepresentationMethod, SourceUnit, TypeHeader, synthesize};
pub use validate::{Verdict, validate};

use std::collections::HashSet;
use std::fmt;

use crate::compilation::Compilation;
use crate::config::GeneratorConfig;
use crate::descriptor::MarkerDescriptor;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::Error;
use crate::output::{GeneratedSource, PassOutput};
use crate::traits::{Frontend, Host};

/// Where a pass currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    MarkerInjected,
    Collected,
    Resolved,
    Validated,
    Synthesized,
    Registered,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::MarkerInjected => "marker-injected",
            Stage::Collected => "collected",
            Stage::Resolved => "resolved",
            Stage::Validated => "validated",
            Stage::Synthesized => "synthesized",
            Stage::Registered => "registered",
        }
    }

    /// The stage after this one. `Registered` wraps back to `Idle`.
    pub fn next(&self) -> Stage {
        match self {
            Stage::Idle => Stage::MarkerInjected,
            Stage::MarkerInjected => Stage::Collected,
            Stage::Collected => Stage::Resolved,
            Stage::Resolved => Stage::Validated,
            Stage::Validated => Stage::Synthesized,
            Stage::Synthesized => Stage::Registered,
            Stage::Registered => Stage::Idle,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-pass stage tracker. Every transition is logged with the number of
/// items that survived it.
#[derive(Debug)]
struct PassState {
    stage: Stage,
}

impl PassState {
    fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    fn advance(&mut self, count: usize) {
        let from = self.stage;
        self.stage = from.next();
        log::debug!(from:% = from, to:% = self.stage, count = count; "pass stage advanced");
    }
}

/// Runs generation passes with one front end and one marker.
///
/// A `Generator` holds no per-pass state; passes are independent and may be
/// run repeatedly over the same compilation with identical results.
#[derive(Debug, Clone)]
pub struct Generator<F> {
    frontend: F,
    marker: MarkerDescriptor,
    config: GeneratorConfig,
}

impl<F: Frontend> Generator<F> {
    /// A generator for the default marker with default layout.
    pub fn new(frontend: F) -> Self {
        Self {
            frontend,
            marker: MarkerDescriptor::default(),
            config: GeneratorConfig::DEFAULT,
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_marker(mut self, marker: MarkerDescriptor) -> Self {
        self.marker = marker;
        self
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn marker(&self) -> &MarkerDescriptor {
        &self.marker
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run one pass and return its output without touching a host.
    ///
    /// `sources[0]` of the result is always the marker definition. Sources
    /// follow collection order; diagnostics are ordered by the declaration
    /// they concern.
    pub fn generate(&self, compilation: &Compilation) -> Result<PassOutput, Error> {
        let marker = &self.marker;
        let mut state = PassState::new();

        let marker_tree = self
            .frontend
            .parse(marker.source_id, marker.source_text)
            .map_err(|err| Error::MarkerSource {
                source_id: marker.source_id.to_owned(),
                reason: err.to_string(),
            })?;
        let mut view = compilation.view();
        view.inject(marker_tree);
        state.advance(view.injected().len());

        let candidates: Vec<TypeCandidate<'_>> =
            view.trees().flat_map(collect_candidates).collect();
        state.advance(candidates.len());

        let model = self.frontend.model(&view);
        let confirmed: Vec<(usize, TypeCandidate<'_>)> = candidates
            .into_iter()
            .enumerate()
            .filter(|(_, candidate)| {
                let marked = is_marked(candidate, &model, marker);
                if !marked {
                    log::trace!(type_name:% = candidate.qualified_name(); "candidate is not marked");
                }
                marked
            })
            .collect();
        state.advance(confirmed.len());

        let declarations = DeclarationIndex::from_trees(view.trees());
        let mut diagnostics: Vec<(usize, Diagnostic)> = Vec::new();
        let mut accepted = Vec::with_capacity(confirmed.len());
        for (ordinal, candidate) in confirmed {
            match validate(&candidate, &declarations, marker) {
                Verdict::Accepted => accepted.push((ordinal, candidate)),
                Verdict::Rejected(diagnostic) => {
                    log::debug!(
                        type_name:% = candidate.qualified_name(),
                        code:% = diagnostic.code();
                        "candidate rejected"
                    );
                    diagnostics.push((ordinal, diagnostic));
                }
            }
        }
        state.advance(accepted.len());

        let mut sources = vec![GeneratedSource::new(marker.source_id, marker.source_text)];
        let mut seen = HashSet::new();
        for (ordinal, candidate) in &accepted {
            let name = candidate.qualified_name();
            if !seen.insert(name.clone()) {
                diagnostics.push((
                    *ordinal,
                    Diagnostic::new(
                        DiagnosticKind::DuplicateMarker {
                            type_name: candidate.display_name(),
                        },
                        Some(candidate.location()),
                    ),
                ));
                continue;
            }
            let source = synthesize(candidate, marker, &self.config)?;
            if sources.iter().any(|s| s.source_id == source.source_id) {
                return Err(Error::DuplicateSourceId {
                    source_id: source.source_id,
                });
            }
            log::trace!(type_name:% = name, source_id = source.source_id.as_str(); "source synthesized");
            sources.push(source);
        }
        state.advance(sources.len());

        diagnostics.sort_by_key(|(ordinal, _)| *ordinal);
        Ok(PassOutput {
            sources,
            diagnostics: diagnostics.into_iter().map(|(_, d)| d).collect(),
        })
    }

    /// Run one pass and hand its output to `host`.
    ///
    /// On `Err` nothing has been registered.
    pub fn run<H: Host + ?Sized>(
        &self,
        compilation: &Compilation,
        host: &mut H,
    ) -> Result<PassOutput, Error> {
        let output = self.generate(compilation)?;
        output.register_with(host);
        log::debug!(
            sources = output.sources.len(),
            diagnostics = output.diagnostics.len();
            "pass registered"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::CompilationView;
    use crate::diagnostic::DiagnosticCode;
    use crate::output::CollectingHost;
    use crate::syntax::{
        Attribute, AttributeList, AttributeName, Ident, Item, Member, Modifier, PropertyDecl,
        QualifiedName, ScopeId, Span, SyntaxTree, TypeDecl, TypeKeyword,
    };
    use crate::traits::SemanticModel;

    /// Resolves attribute names by their last segment: `ToStringGenerator`
    /// is the marker, `Fake` is a same-named type elsewhere.
    struct ByName;

    impl SemanticModel for ByName {
        fn identity_of(
            &self,
            _tree: &SyntaxTree,
            _scope: ScopeId,
            _containing: &[&TypeDecl],
            attribute: &Attribute,
        ) -> Option<QualifiedName> {
            match attribute.name.to_string().as_str() {
                "ToStringGenerator" => Some(QualifiedName::parse(
                    "ToStringGenerator.ToStringGeneratorAttribute",
                )),
                "Fake" => Some(QualifiedName::parse("Fake.ToStringGeneratorAttribute")),
                _ => None,
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("front end refused")]
    struct Refused;

    /// Produces an empty tree for the marker, or refuses when `broken`.
    struct FakeFrontend {
        broken: bool,
    }

    impl Frontend for FakeFrontend {
        type Model = ByName;
        type Error = Refused;

        fn parse(&self, source_id: &str, _text: &str) -> Result<SyntaxTree, Refused> {
            if self.broken {
                Err(Refused)
            } else {
                Ok(SyntaxTree::new(source_id))
            }
        }

        fn model(&self, view: &CompilationView<'_>) -> ByName {
            assert_eq!(view.injected().len(), 1);
            ByName
        }
    }

    fn generator() -> Generator<FakeFrontend> {
        Generator::new(FakeFrontend { broken: false })
    }

    fn ty(name: &str, marker: Option<&str>, partial: bool, members: Vec<Member>) -> TypeDecl {
        let attributes = marker
            .map(|written| {
                vec![AttributeList {
                    target: None,
                    attributes: vec![Attribute {
                        name: AttributeName {
                            global: false,
                            segments: vec![Ident::new(written, Span::call_site())],
                        },
                        arguments: None,
                        span: Span::call_site(),
                    }],
                    span: Span::call_site(),
                }]
            })
            .unwrap_or_default();
        let mut modifiers = vec![Modifier::Public];
        if partial {
            modifiers.push(Modifier::Partial);
        }
        TypeDecl {
            attributes,
            modifiers,
            keyword: TypeKeyword::Class,
            name: Ident::new(name, Span::call_site()),
            type_params: Vec::new(),
            scope: ScopeId::ROOT,
            members,
            span: Span::call_site(),
        }
    }

    fn prop(name: &str) -> Member {
        Member::Property(PropertyDecl {
            attributes: Vec::new(),
            modifiers: vec![Modifier::Public],
            ty: "string".into(),
            name: Ident::new(name, Span::call_site()),
            span: Span::call_site(),
        })
    }

    fn compilation(decls: Vec<TypeDecl>) -> Compilation {
        let mut tree = SyntaxTree::new("Input.cs");
        tree.items = decls.into_iter().map(Item::Type).collect();
        Compilation::new(vec![tree])
    }

    #[test]
    fn stages_cycle_back_to_idle() {
        let mut stage = Stage::Idle;
        let mut seen = vec![stage];
        for _ in 0..7 {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(seen.first(), seen.last());
        assert_eq!(seen[6], Stage::Registered);
    }

    #[test]
    fn unmarked_compilation_yields_only_the_marker() {
        let output = generator()
            .generate(&compilation(vec![ty("Plain", None, true, vec![prop("A")])]))
            .unwrap();

        assert_eq!(output.sources.len(), 1);
        assert_eq!(output.sources[0].source_id, "Generated__ToStringGeneratorAttribute.cs");
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn same_named_marker_is_ignored() {
        let output = generator()
            .generate(&compilation(vec![ty("User", Some("Fake"), false, Vec::new())]))
            .unwrap();

        assert!(output.generated().is_empty());
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn rejected_and_accepted_types_are_isolated() {
        let output = generator()
            .generate(&compilation(vec![
                ty("Broken", Some("ToStringGenerator"), false, vec![prop("A")]),
                ty("Good", Some("ToStringGenerator"), true, vec![prop("B")]),
            ]))
            .unwrap();

        assert_eq!(output.generated().len(), 1);
        assert_eq!(output.generated()[0].source_id, "Generated_Good");
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].code(), DiagnosticCode::Mysg1001);
    }

    #[test]
    fn duplicate_declarations_warn_once_and_generate_once() {
        let output = generator()
            .generate(&compilation(vec![
                ty("Twin", Some("ToStringGenerator"), true, vec![prop("A")]),
                ty("Twin", Some("ToStringGenerator"), true, vec![prop("B")]),
            ]))
            .unwrap();

        assert_eq!(output.generated().len(), 1);
        assert!(output.generated()[0].text.contains("\"A:\""));
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].code(), DiagnosticCode::Mysg1003);
        assert!(!output.has_errors());
    }

    #[test]
    fn diagnostics_follow_declaration_order() {
        let output = generator()
            .generate(&compilation(vec![
                ty("Twin", Some("ToStringGenerator"), true, Vec::new()),
                ty("Twin", Some("ToStringGenerator"), true, Vec::new()),
                ty("Late", Some("ToStringGenerator"), false, Vec::new()),
            ]))
            .unwrap();

        let codes: Vec<_> = output.diagnostics.iter().map(Diagnostic::code).collect();
        assert_eq!(codes, vec![DiagnosticCode::Mysg1003, DiagnosticCode::Mysg1001]);
    }

    #[test]
    fn broken_marker_source_aborts_before_the_host() {
        let generator = Generator::new(FakeFrontend { broken: true });
        let mut host = CollectingHost::new();

        let err = generator
            .run(&compilation(Vec::new()), &mut host)
            .unwrap_err();

        assert!(matches!(err, Error::MarkerSource { .. }));
        assert!(host.sources.is_empty());
        assert!(host.diagnostics.is_empty());
    }

    #[test]
    fn malformed_candidate_registers_nothing() {
        let mut host = CollectingHost::new();
        let result = generator().run(
            &compilation(vec![
                ty("Good", Some("ToStringGenerator"), true, vec![prop("A")]),
                ty("Bad", Some("ToStringGenerator"), true, vec![prop("")]),
            ]),
            &mut host,
        );

        assert!(matches!(result, Err(Error::MalformedCandidate { .. })));
        assert_eq!(host, CollectingHost::new());
    }

    #[test]
    fn run_registers_everything_and_repeats_identically() {
        let input = compilation(vec![
            ty("A", Some("ToStringGenerator"), true, vec![prop("X")]),
            ty("B", Some("ToStringGenerator"), false, Vec::new()),
        ]);

        let mut first = CollectingHost::new();
        let mut second = CollectingHost::new();
        let out = generator().run(&input, &mut first).unwrap();
        generator().run(&input, &mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.sources, out.sources);
        assert_eq!(first.diagnostics, out.diagnostics);
    }
}
