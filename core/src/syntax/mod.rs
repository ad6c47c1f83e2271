//! Host-agnostic syntax model.
//!
//! Front ends lower their concrete syntax into these types. The model keeps
//! only what the pipeline needs: namespaces and the using directives in scope,
//! type declarations with their attribute lists and modifiers, and member
//! declarations in source order.
//!
//! Every type and every attribute records the [`ScopeId`] it was declared in,
//! which lets a [`SemanticModel`](crate::SemanticModel) reconstruct the
//! lookup context without parent pointers.

mod visit;

pub use visit::Visit;

use core::fmt;

/// Byte range in a source text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Synthetic span for nodes that have no source text.
    #[inline]
    pub const fn call_site() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Length in bytes, `0` for inverted spans.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn join(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A span inside a named source.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub source_id: String,
    pub span: Span,
}

impl Location {
    pub fn new(source_id: impl Into<String>, span: Span) -> Self {
        Self {
            source_id: source_id.into(),
            span,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{}", self.source_id, self.span.start, self.span.end)
    }
}

/// An identifier exactly as written, including a leading `@` for verbatim
/// identifiers.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub text: String,
    pub span: Span,
}

impl Ident {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Name with the verbatim `@` prefix removed.
    pub fn unescaped(&self) -> &str {
        self.text.strip_prefix('@').unwrap_or(&self.text)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A dotted name such as `ToStringGenerator.ToStringGeneratorAttribute`.
///
/// The empty name denotes the global namespace.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// The global namespace.
    pub const fn global() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Splits `name` on `.`, dropping empty segments.
    pub fn parse(name: &str) -> Self {
        Self {
            segments: name
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_global(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, if any.
    pub fn simple_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Appends one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Appends every segment of `other`.
    pub fn join(&self, other: &QualifiedName) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// The enclosing name, or `None` for the global namespace.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    pub fn starts_with(&self, prefix: &QualifiedName) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Index of a [`Scope`] inside its [`SyntaxTree`].
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ScopeId(pub usize);

impl ScopeId {
    /// The compilation-unit scope every tree starts with.
    pub const ROOT: ScopeId = ScopeId(0);
}

/// A using directive.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsingDirective {
    /// `using System.Text;`
    Namespace(QualifiedName),
    /// `using Gen = ToStringGenerator.ToStringGeneratorAttribute;`
    Alias {
        alias: String,
        target: QualifiedName,
    },
    /// `using static System.Math;`
    Static(QualifiedName),
}

/// A namespace declaration's lookup context.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scope {
    /// Enclosing scope. `None` only for [`ScopeId::ROOT`].
    pub parent: Option<ScopeId>,
    /// Fully-qualified namespace of this scope.
    pub namespace: QualifiedName,
    pub usings: Vec<UsingDirective>,
}

/// One parsed source.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub source_id: String,
    /// Scope table. Index 0 is always the compilation-unit scope.
    pub scopes: Vec<Scope>,
    /// `global using` directives, which apply to every tree in a compilation.
    pub global_usings: Vec<UsingDirective>,
    pub items: Vec<Item>,
}

impl SyntaxTree {
    /// Creates a tree with only the global scope.
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            scopes: vec![Scope::default()],
            global_usings: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    /// Walks from `id` to the root, innermost first.
    pub fn scope_chain(&self, id: ScopeId) -> ScopeChain<'_> {
        ScopeChain {
            tree: self,
            next: Some(id),
            remaining: self.scopes.len(),
        }
    }

    /// Adds a scope and returns its id.
    pub fn push_scope(&mut self, scope: Scope) -> ScopeId {
        self.scopes.push(scope);
        ScopeId(self.scopes.len() - 1)
    }
}

/// Iterator returned by [`SyntaxTree::scope_chain`].
///
/// Bounded by the scope count, so a malformed parent cycle terminates.
pub struct ScopeChain<'a> {
    tree: &'a SyntaxTree,
    next: Option<ScopeId>,
    remaining: usize,
}

impl<'a> Iterator for ScopeChain<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let scope = self.tree.scope(self.next?)?;
        self.next = scope.parent;
        Some(scope)
    }
}

/// A top-level or namespace-level item.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Name as written, e.g. `B.C` in `namespace B.C` nested inside `A`.
    pub name: QualifiedName,
    /// Scope opened by this declaration.
    pub scope: ScopeId,
    /// `namespace A.B;` rather than `namespace A.B { ... }`.
    pub file_scoped: bool,
    pub items: Vec<Item>,
    pub span: Span,
}

/// The declaration keyword of a type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    Class,
    Struct,
    /// `record` or `record class`.
    Record,
    RecordStruct,
    Interface,
    Enum,
}

impl TypeKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKeyword::Class => "class",
            TypeKeyword::Struct => "struct",
            TypeKeyword::Record => "record",
            TypeKeyword::RecordStruct => "record struct",
            TypeKeyword::Interface => "interface",
            TypeKeyword::Enum => "enum",
        }
    }

    /// Whether the keyword declares something that can hold an instance
    /// `ToString` override.
    pub fn is_augmentable(&self) -> bool {
        matches!(
            self,
            TypeKeyword::Class | TypeKeyword::Struct | TypeKeyword::Record | TypeKeyword::RecordStruct
        )
    }
}

impl fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration modifiers, in the order written.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    File,
    Static,
    Sealed,
    Abstract,
    Partial,
    Readonly,
    Ref,
    Unsafe,
    New,
    Virtual,
    Override,
    Extern,
    Async,
    Volatile,
    Const,
    Required,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::File => "file",
            Modifier::Static => "static",
            Modifier::Sealed => "sealed",
            Modifier::Abstract => "abstract",
            Modifier::Partial => "partial",
            Modifier::Readonly => "readonly",
            Modifier::Ref => "ref",
            Modifier::Unsafe => "unsafe",
            Modifier::New => "new",
            Modifier::Virtual => "virtual",
            Modifier::Override => "override",
            Modifier::Extern => "extern",
            Modifier::Async => "async",
            Modifier::Volatile => "volatile",
            Modifier::Const => "const",
            Modifier::Required => "required",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "public" => Modifier::Public,
            "private" => Modifier::Private,
            "protected" => Modifier::Protected,
            "internal" => Modifier::Internal,
            "file" => Modifier::File,
            "static" => Modifier::Static,
            "sealed" => Modifier::Sealed,
            "abstract" => Modifier::Abstract,
            "partial" => Modifier::Partial,
            "readonly" => Modifier::Readonly,
            "ref" => Modifier::Ref,
            "unsafe" => Modifier::Unsafe,
            "new" => Modifier::New,
            "virtual" => Modifier::Virtual,
            "override" => Modifier::Override,
            "extern" => Modifier::Extern,
            "async" => Modifier::Async,
            "volatile" => Modifier::Volatile,
            "const" => Modifier::Const,
            "required" => Modifier::Required,
            _ => return None,
        })
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute name as written: `ToStringGenerator`, `Gen.ToStringGenerator`,
/// or `global::ToStringGenerator.ToStringGenerator`.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeName {
    /// Written with a `global::` prefix.
    pub global: bool,
    pub segments: Vec<Ident>,
}

impl AttributeName {
    pub fn to_qualified(&self) -> QualifiedName {
        QualifiedName::from_segments(self.segments.iter().map(|s| s.unescaped().to_owned()))
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            f.write_str("global::")?;
        }
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.text)?;
        }
        Ok(())
    }
}

#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: AttributeName,
    /// Argument list text between the parentheses, when present.
    pub arguments: Option<String>,
    pub span: Span,
}

/// `[target: A, B(...)]`
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeList {
    pub target: Option<Ident>,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Vec<Modifier>,
    pub keyword: TypeKeyword,
    pub name: Ident,
    pub type_params: Vec<Ident>,
    /// Namespace scope the declaration (or its outermost containing type)
    /// lives in.
    pub scope: ScopeId,
    pub members: Vec<Member>,
    pub span: Span,
}

impl TypeDecl {
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Every attribute across all attribute lists, in source order.
    pub fn all_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().flat_map(|list| list.attributes.iter())
    }

    /// Property members in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Property(property) => Some(property),
            _ => None,
        })
    }

    /// `Name` or `Name<T, U>`.
    pub fn display_name(&self) -> String {
        if self.type_params.is_empty() {
            self.name.text.clone()
        } else {
            let params: Vec<&str> = self.type_params.iter().map(|p| p.text.as_str()).collect();
            format!("{}<{}>", self.name.text, params.join(", "))
        }
    }
}

#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Vec<Modifier>,
    /// Type text as written.
    pub ty: String,
    pub name: Ident,
    pub span: Span,
}

#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub modifiers: Vec<Modifier>,
    pub ty: String,
    pub name: Ident,
    pub span: Span,
}

#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub modifiers: Vec<Modifier>,
    pub name: Ident,
    /// Number of parameters.
    pub arity: usize,
    pub span: Span,
}

/// A member declaration inside a type body.
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Property(PropertyDecl),
    Field(FieldDecl),
    Method(MethodDecl),
    Type(TypeDecl),
    /// Constructors, operators, indexers, events and anything else the
    /// pipeline does not inspect.
    Other(Span),
}
