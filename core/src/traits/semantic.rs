use crate::compilation::CompilationView;
use crate::syntax::{Attribute, QualifiedName, ScopeId, SyntaxTree, TypeDecl};

/// Resolves attribute names to declared type identities.
///
/// This is the narrow slice of a host's semantic model the pipeline needs.
/// Implementations answer `None` for anything they cannot resolve to exactly
/// one type: unknown names, ambiguous names, names outside the model.
///
/// # Example
///
/// ```
/// use reprgen_core::{Attribute, QualifiedName, ScopeId, SemanticModel, SyntaxTree, TypeDecl};
///
/// /// Resolves every attribute by its written name.
/// struct ByName;
///
/// impl SemanticModel for ByName {
///     fn identity_of(
///         &self,
///         _tree: &SyntaxTree,
///         _scope: ScopeId,
///         _containing: &[&TypeDecl],
///         attribute: &Attribute,
///     ) -> Option<QualifiedName> {
///         Some(attribute.name.to_qualified())
///     }
/// }
/// ```
pub trait SemanticModel {
    /// Fully-qualified identity of the type `attribute` refers to.
    ///
    /// The attribute sits on a declaration nested in `containing` (outermost
    /// first, empty for top-level types) inside namespace scope `scope` of
    /// `tree`. Types nested in `containing` are in scope before anything the
    /// namespace provides.
    fn identity_of(
        &self,
        tree: &SyntaxTree,
        scope: ScopeId,
        containing: &[&TypeDecl],
        attribute: &Attribute,
    ) -> Option<QualifiedName>;
}

impl<M: SemanticModel + ?Sized> SemanticModel for &M {
    fn identity_of(
        &self,
        tree: &SyntaxTree,
        scope: ScopeId,
        containing: &[&TypeDecl],
        attribute: &Attribute,
    ) -> Option<QualifiedName> {
        (**self).identity_of(tree, scope, containing, attribute)
    }
}

/// The host's parsing front end and semantic model factory.
///
/// The driver calls [`parse`](Frontend::parse) once per pass, on the marker
/// definition, and [`model`](Frontend::model) once per pass, on the view that
/// already contains it.
pub trait Frontend {
    type Model: SemanticModel;
    type Error: std::error::Error;

    /// Parse one source text.
    fn parse(&self, source_id: &str, text: &str) -> Result<SyntaxTree, Self::Error>;

    /// Build a semantic model over every tree in `view`.
    fn model(&self, view: &CompilationView<'_>) -> Self::Model;
}
