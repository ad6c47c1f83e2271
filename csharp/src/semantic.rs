//! Name lookup over the declared types of a compilation.

use std::collections::HashSet;

use reprgen_core::{
    Attribute, Item, QualifiedName, ScopeId, SemanticModel, SyntaxTree, TypeDecl, UsingDirective, Visit,
};

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Resolves attribute names against every type declared in a compilation
/// view.
///
/// Types that are not declared in the view (framework types such as
/// `System.AttributeUsageAttribute`) never resolve.
#[derive(Debug, Clone, Default)]
pub struct CsSemanticModel {
    types: HashSet<QualifiedName>,
    global_usings: Vec<UsingDirective>,
}

impl CsSemanticModel {
    pub fn from_trees<'a>(trees: impl IntoIterator<Item = &'a SyntaxTree>) -> Self {
        let mut indexer = TypeIndexer::default();
        for tree in trees {
            indexer.index(tree);
        }
        log::debug!(types = indexer.model.types.len(); "indexed declared types");
        indexer.model
    }

    /// Whether `name` is a declared type. Nested types are `Outer.Inner`.
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.types.contains(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types nested in `containing`, innermost containing type first.
    fn nested_lookup(
        &self,
        tree: &SyntaxTree,
        scope: ScopeId,
        containing: &[&TypeDecl],
        written: &[QualifiedName],
    ) -> Lookup {
        let namespace = tree
            .scope(scope)
            .map(|s| s.namespace.clone())
            .unwrap_or_default();

        for depth in (1..=containing.len()).rev() {
            let outer = containing[..depth]
                .iter()
                .fold(namespace.clone(), |name, decl| name.child(decl.name.unescaped()));
            let found = self.level(written.iter().map(|name| outer.join(name)));
            if found.is_decided() {
                return found;
            }
        }
        Lookup::Missing
    }

    /// Looks `written` up from `scope`, trying each name variant at every
    /// lookup level before moving outward.
    fn lookup(
        &self,
        tree: &SyntaxTree,
        scope: ScopeId,
        written: &[QualifiedName],
    ) -> Lookup {
        let scopes: Vec<_> = tree.scope_chain(scope).collect();

        for (idx, current) in scopes.iter().enumerate() {
            let ns = &current.namespace;
            let is_root = idx + 1 == scopes.len();

            // types declared in this namespace
            let found = self.level(written.iter().map(|name| ns.join(name)));
            if found.is_decided() {
                return found;
            }

            let usings: Vec<&UsingDirective> = if is_root {
                current.usings.iter().chain(&self.global_usings).collect()
            } else {
                current.usings.iter().collect()
            };

            // aliases
            let found = self.level(written.iter().flat_map(|name| alias_targets(&usings, name)));
            if found.is_decided() {
                return found;
            }

            // imported namespaces, simple names only
            let mut imported = Vec::new();
            for name in written.iter().filter(|name| name.len() == 1) {
                for directive in &usings {
                    if let UsingDirective::Namespace(namespace) = directive {
                        imported.push(namespace.join(name));
                    }
                }
            }
            let found = self.level(imported.into_iter());
            if found.is_decided() {
                return found;
            }

            // `namespace A.B.C` also opens A.B and A
            let stop = scopes.get(idx + 1).map_or(0, |parent| parent.namespace.len());
            let mut implicit = ns.parent();
            while let Some(outer) = implicit.filter(|n| n.len() > stop && !n.is_global()) {
                let found = self.level(written.iter().map(|name| outer.join(name)));
                if found.is_decided() {
                    return found;
                }
                implicit = outer.parent();
            }
        }

        Lookup::Missing
    }

    /// One lookup level: the candidates that name declared types.
    fn level(&self, candidates: impl Iterator<Item = QualifiedName>) -> Lookup {
        let mut hits: Vec<QualifiedName> = candidates.filter(|c| self.contains(c)).collect();
        hits.sort();
        hits.dedup();
        match hits.len() {
            0 => Lookup::Missing,
            1 => hits.pop().map_or(Lookup::Missing, Lookup::Found),
            _ => Lookup::Ambiguous(hits),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Lookup {
    Missing,
    Found(QualifiedName),
    Ambiguous(Vec<QualifiedName>),
}

impl Lookup {
    fn is_decided(&self) -> bool {
        !matches!(self, Lookup::Missing)
    }
}

/// Targets of `name` when its first segment is an alias in `usings`.
fn alias_targets(usings: &[&UsingDirective], name: &QualifiedName) -> Vec<QualifiedName> {
    let Some((first, rest)) = name.segments().split_first() else {
        return Vec::new();
    };
    usings
        .iter()
        .filter_map(|directive| match directive {
            UsingDirective::Alias { alias, target } if alias == first => {
                Some(target.join(&QualifiedName::from_segments(rest.iter().cloned())))
            }
            _ => None,
        })
        .collect()
}

/// `Name` and `NameAttribute`, unless the name already ends in the suffix.
fn name_variants(written: QualifiedName) -> Vec<QualifiedName> {
    let Some(last) = written.simple_name() else {
        return Vec::new();
    };
    if last.ends_with(ATTRIBUTE_SUFFIX) {
        return vec![written];
    }
    let suffixed = match written.parent() {
        Some(parent) => parent.child(format!("{last}{ATTRIBUTE_SUFFIX}")),
        None => written.clone(),
    };
    vec![written, suffixed]
}

impl SemanticModel for CsSemanticModel {
    fn identity_of(
        &self,
        tree: &SyntaxTree,
        scope: ScopeId,
        containing: &[&TypeDecl],
        attribute: &Attribute,
    ) -> Option<QualifiedName> {
        let variants = name_variants(attribute.name.to_qualified());

        let lookup = if attribute.name.global {
            self.level(variants.into_iter())
        } else {
            match self.nested_lookup(tree, scope, containing, &variants) {
                Lookup::Missing => self.lookup(tree, scope, &variants),
                found => found,
            }
        };

        match lookup {
            Lookup::Found(name) => Some(name),
            Lookup::Ambiguous(names) => {
                log::debug!(
                    attribute:% = attribute.name,
                    candidates:? = names;
                    "ambiguous attribute name"
                );
                None
            }
            Lookup::Missing => None,
        }
    }
}

#[derive(Default)]
struct TypeIndexer<'ast> {
    model: CsSemanticModel,
    namespace: QualifiedName,
    containing: Vec<&'ast TypeDecl>,
}

impl<'ast> TypeIndexer<'ast> {
    fn index(&mut self, tree: &'ast SyntaxTree) {
        self.model
            .global_usings
            .extend(tree.global_usings.iter().cloned());

        for item in &tree.items {
            self.index_item(tree, item);
        }
    }

    fn index_item(&mut self, tree: &'ast SyntaxTree, item: &'ast Item) {
        match item {
            Item::Namespace(namespace) => {
                for item in &namespace.items {
                    self.index_item(tree, item);
                }
            }
            Item::Type(decl) => {
                self.namespace = tree
                    .scope(decl.scope)
                    .map(|s| s.namespace.clone())
                    .unwrap_or_default();
                self.visit_type_decl(decl);
            }
        }
    }
}

impl<'ast> Visit<'ast> for TypeIndexer<'ast> {
    fn visit_type_decl(&mut self, decl: &'ast TypeDecl) {
        let name = self
            .containing
            .iter()
            .chain(std::iter::once(&decl))
            .fold(self.namespace.clone(), |name, decl| {
                name.child(decl.name.unescaped())
            });
        self.model.types.insert(name);

        self.containing.push(decl);
        self.walk_type_decl(decl);
        self.containing.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseConfig, parse_source};

    const MARKER: &str = "namespace ToStringGenerator { public class ToStringGeneratorAttribute : System.Attribute { } }";

    fn model_over(sources: &[&str]) -> (Vec<SyntaxTree>, CsSemanticModel) {
        let trees: Vec<SyntaxTree> = sources
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                parse_source(&format!("{idx}.cs"), text, &ParseConfig::DEFAULT).unwrap()
            })
            .collect();
        let model = CsSemanticModel::from_trees(&trees);
        (trees, model)
    }

    /// Resolves the first attribute in the first tree that has any.
    fn resolve_first(sources: &[&str]) -> Option<String> {
        struct First<'a> {
            stack: Vec<&'a TypeDecl>,
            found: Option<(&'a TypeDecl, Vec<&'a TypeDecl>, &'a Attribute)>,
        }

        impl<'a> Visit<'a> for First<'a> {
            fn visit_type_decl(&mut self, decl: &'a TypeDecl) {
                if self.found.is_none() {
                    self.found = decl
                        .all_attributes()
                        .next()
                        .map(|a| (decl, self.stack.clone(), a));
                }
                self.stack.push(decl);
                self.walk_type_decl(decl);
                self.stack.pop();
            }
        }

        let (trees, model) = model_over(sources);
        let mut first = First {
            stack: Vec::new(),
            found: None,
        };
        first.visit_tree(&trees[0]);
        let (decl, containing, attribute) = first.found.unwrap();
        model
            .identity_of(&trees[0], decl.scope, &containing, attribute)
            .map(|name| name.to_string())
    }

    #[test]
    fn indexes_nested_and_verbatim_names() {
        let (_, model) = model_over(&[
            "namespace A.B { class Outer { class Inner { } } } class @Top { }",
        ]);
        assert!(model.contains(&QualifiedName::parse("A.B.Outer")));
        assert!(model.contains(&QualifiedName::parse("A.B.Outer.Inner")));
        assert!(model.contains(&QualifiedName::parse("Top")));
        assert_eq!(model.len(), 3);
    }

    #[test_case::test_case("using ToStringGenerator; [ToStringGenerator] partial class U { }"; "using and suffix")]
    #[test_case::test_case("using ToStringGenerator; [ToStringGeneratorAttribute] partial class U { }"; "full name")]
    #[test_case::test_case("[ToStringGenerator.ToStringGenerator] partial class U { }"; "qualified")]
    #[test_case::test_case("[global::ToStringGenerator.ToStringGenerator] partial class U { }"; "global qualified")]
    #[test_case::test_case("using Gen = ToStringGenerator.ToStringGeneratorAttribute; [Gen] partial class U { }"; "type alias")]
    #[test_case::test_case("using TS = ToStringGenerator; [TS.ToStringGenerator] partial class U { }"; "namespace alias")]
    #[test_case::test_case("namespace ToStringGenerator.Models { [ToStringGenerator] partial class U { } }"; "implicit parent namespace")]
    #[test_case::test_case("namespace Shop { using ToStringGenerator; [ToStringGenerator] partial class U { } }"; "using inside namespace")]
    fn resolves_the_marker(user: &str) {
        assert_eq!(
            resolve_first(&[user, MARKER]).as_deref(),
            Some("ToStringGenerator.ToStringGeneratorAttribute")
        );
    }

    #[test]
    fn global_using_from_another_tree_applies() {
        let resolved = resolve_first(&[
            "[ToStringGenerator] partial class U { }",
            "global using ToStringGenerator;",
            MARKER,
        ]);
        assert_eq!(
            resolved.as_deref(),
            Some("ToStringGenerator.ToStringGeneratorAttribute")
        );
    }

    #[test]
    fn same_name_in_another_namespace_is_a_different_type() {
        let resolved = resolve_first(&[
            "namespace Other { public class ToStringGeneratorAttribute : System.Attribute { } [ToStringGenerator] partial class U { } }",
            MARKER,
        ]);
        assert_eq!(
            resolved.as_deref(),
            Some("Other.ToStringGeneratorAttribute")
        );
    }

    #[test]
    fn inner_namespace_shadows_imports() {
        let resolved = resolve_first(&[
            "using ToStringGenerator; namespace Shop { class ToStringGeneratorAttribute { } [ToStringGenerator] partial class U { } }",
            MARKER,
        ]);
        assert_eq!(resolved.as_deref(), Some("Shop.ToStringGeneratorAttribute"));
    }

    #[test]
    fn containing_type_members_shadow_imports() {
        let resolved = resolve_first(&[
            "using ToStringGenerator; namespace Shop { public partial class Outer { public class ToStringGeneratorAttribute : System.Attribute { } [ToStringGenerator] public partial class Inner { } } }",
            MARKER,
        ]);
        assert_eq!(
            resolved.as_deref(),
            Some("Shop.Outer.ToStringGeneratorAttribute")
        );
    }

    #[test]
    fn outer_containing_type_is_searched_after_inner() {
        let resolved = resolve_first(&[
            "namespace Shop { partial class A { class ToStringGeneratorAttribute { } partial class B { [ToStringGenerator] partial class C { } } } }",
            MARKER,
        ]);
        assert_eq!(resolved.as_deref(), Some("Shop.A.ToStringGeneratorAttribute"));
    }

    #[test]
    fn nested_types_without_a_shadowing_member_still_resolve() {
        let resolved = resolve_first(&[
            "using ToStringGenerator; namespace Shop { public partial class Outer { [ToStringGenerator] public partial class Inner { } } }",
            MARKER,
        ]);
        assert_eq!(
            resolved.as_deref(),
            Some("ToStringGenerator.ToStringGeneratorAttribute")
        );
    }

    #[test]
    fn ambiguous_imports_do_not_resolve() {
        let resolved = resolve_first(&[
            "using ToStringGenerator; using Other; [ToStringGenerator] partial class U { }",
            "namespace Other { class ToStringGeneratorAttribute { } }",
            MARKER,
        ]);
        assert_eq!(resolved, None);
    }

    #[test_case::test_case("[ToStringGenerator] partial class U { }"; "not imported")]
    #[test_case::test_case("using System; [Serializable] partial class U { }"; "undeclared type")]
    fn unresolved_names(user: &str) {
        assert_eq!(resolve_first(&[user, MARKER]), None);
    }
}
