//! Candidate collection.
//!
//! One linear walk per tree, purely syntactic: a type declaration is a
//! candidate when it can hold a generated method and carries at least one
//! attribute list. Semantic identity is left to the resolver, which then only
//! runs on this reduced set.
//!
//! A [`DeclarationIndex`] records every declaration of every type, attributed
//! or not, so that checks can see all parts of a `partial` type.

use std::collections::HashMap;

use crate::syntax::{
    Location, Member, Modifier, QualifiedName, SyntaxTree, TypeDecl, Visit,
};

/// A type declaration eligible for marker resolution.
#[derive(Debug, Clone)]
pub struct TypeCandidate<'a> {
    pub tree: &'a SyntaxTree,
    pub decl: &'a TypeDecl,
    /// Containing type declarations, outermost first.
    pub containing: Vec<&'a TypeDecl>,
    /// Enclosing namespace; global when empty.
    pub namespace: QualifiedName,
}

impl<'a> TypeCandidate<'a> {
    pub fn modifiers(&self) -> &'a [Modifier] {
        &self.decl.modifiers
    }

    pub fn members(&self) -> &'a [Member] {
        &self.decl.members
    }

    /// Namespace, containing types and the type itself, with generic arity
    /// appended as `` `N `` so that `Box<T>` and `Box<T, U>` stay distinct.
    pub fn qualified_name(&self) -> QualifiedName {
        qualified_name(&self.namespace, &self.containing, self.decl)
    }

    /// Source-level name including containing types, e.g. `Outer.Inner<T>`.
    pub fn display_name(&self) -> String {
        self.containing
            .iter()
            .copied()
            .chain(std::iter::once(self.decl))
            .map(TypeDecl::display_name)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// The type identifier's location.
    pub fn location(&self) -> Location {
        Location::new(self.tree.source_id.clone(), self.decl.name.span)
    }
}

fn qualified_name(namespace: &QualifiedName, containing: &[&TypeDecl], decl: &TypeDecl) -> QualifiedName {
    containing
        .iter()
        .copied()
        .chain(std::iter::once(decl))
        .fold(namespace.clone(), |name, decl| name.child(metadata_name(decl)))
}

fn namespace_of(tree: &SyntaxTree, decl: &TypeDecl) -> QualifiedName {
    tree.scope(decl.scope)
        .map(|scope| scope.namespace.clone())
        .unwrap_or_default()
}

fn metadata_name(decl: &TypeDecl) -> String {
    let name = decl.name.unescaped();
    match decl.type_params.len() {
        0 => name.to_owned(),
        arity => format!("{name}`{arity}"),
    }
}

/// Collects every candidate in `tree`, in declaration order.
pub fn collect_candidates(tree: &SyntaxTree) -> Vec<TypeCandidate<'_>> {
    let mut collector = CandidateCollector::new(tree);
    collector.visit_tree(tree);
    collector.candidates
}

/// Visitor backing [`collect_candidates`].
pub struct CandidateCollector<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<&'a TypeDecl>,
    candidates: Vec<TypeCandidate<'a>>,
}

impl<'a> CandidateCollector<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            candidates: Vec::new(),
        }
    }

    pub fn into_candidates(self) -> Vec<TypeCandidate<'a>> {
        self.candidates
    }
}

impl<'a> Visit<'a> for CandidateCollector<'a> {
    fn visit_type_decl(&mut self, decl: &'a TypeDecl) {
        if decl.keyword.is_augmentable() && !decl.attributes.is_empty() {
            self.candidates.push(TypeCandidate {
                tree: self.tree,
                decl,
                containing: self.stack.clone(),
                namespace: namespace_of(self.tree, decl),
            });
        }

        self.stack.push(decl);
        self.walk_type_decl(decl);
        self.stack.pop();
    }
}

/// Every declaration of every type across a set of trees, keyed by the same
/// identity as [`TypeCandidate::qualified_name`].
///
/// A `partial` type split over several declarations (in one tree or many)
/// has one entry listing each part in tree order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex<'a> {
    by_name: HashMap<QualifiedName, Vec<&'a TypeDecl>>,
}

impl<'a> DeclarationIndex<'a> {
    pub fn from_trees(trees: impl IntoIterator<Item = &'a SyntaxTree>) -> Self {
        let mut index = Self::default();
        for tree in trees {
            let mut indexer = DeclarationIndexer {
                tree,
                stack: Vec::new(),
                index: &mut index,
            };
            indexer.visit_tree(tree);
        }
        index
    }

    /// All declarations of `name`; empty when the type is unknown.
    pub fn declarations(&self, name: &QualifiedName) -> &[&'a TypeDecl] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct types.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

struct DeclarationIndexer<'a, 'i> {
    tree: &'a SyntaxTree,
    stack: Vec<&'a TypeDecl>,
    index: &'i mut DeclarationIndex<'a>,
}

impl<'a> Visit<'a> for DeclarationIndexer<'a, '_> {
    fn visit_type_decl(&mut self, decl: &'a TypeDecl) {
        let name = qualified_name(&namespace_of(self.tree, decl), &self.stack, decl);
        self.index.by_name.entry(name).or_default().push(decl);

        self.stack.push(decl);
        self.walk_type_decl(decl);
        self.stack.pop();
    }
}
