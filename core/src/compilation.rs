//! Compilation snapshots.
//!
//! A [`Compilation`] is the host's read-only set of syntax trees. During a pass
//! the driver layers the injected marker definition over it in a
//! [`CompilationView`], leaving the host's snapshot untouched.

use crate::syntax::SyntaxTree;

/// The syntax trees under analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    trees: Vec<SyntaxTree>,
}

impl Compilation {
    /// A compilation over `trees`, kept in the given order.
    pub fn new(trees: Vec<SyntaxTree>) -> Self {
        Self { trees }
    }

    /// Trees in insertion order. Generated sources follow this order.
    pub fn trees(&self) -> &[SyntaxTree] {
        &self.trees
    }

    /// Append a tree after the existing ones.
    pub fn push(&mut self, tree: SyntaxTree) {
        self.trees.push(tree);
    }

    /// Number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// A view with no injected trees.
    pub fn view(&self) -> CompilationView<'_> {
        CompilationView {
            base: self,
            injected: Vec::new(),
        }
    }
}

impl FromIterator<SyntaxTree> for Compilation {
    fn from_iter<I: IntoIterator<Item = SyntaxTree>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A [`Compilation`] plus trees injected for the current pass.
#[derive(Debug, Clone)]
pub struct CompilationView<'c> {
    base: &'c Compilation,
    injected: Vec<SyntaxTree>,
}

impl<'c> CompilationView<'c> {
    /// Adds a tree visible to this view only.
    pub fn inject(&mut self, tree: SyntaxTree) {
        self.injected.push(tree);
    }

    /// The host's trees followed by injected trees.
    pub fn trees(&self) -> impl Iterator<Item = &SyntaxTree> {
        self.base.trees.iter().chain(self.injected.iter())
    }

    /// Trees added with [`inject`](CompilationView::inject) only.
    pub fn injected(&self) -> &[SyntaxTree] {
        &self.injected
    }

    /// The snapshot this view layers over.
    pub fn base(&self) -> &'c Compilation {
        self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_does_not_touch_the_snapshot() {
        let compilation: Compilation = [SyntaxTree::new("a.cs")].into_iter().collect();
        let mut view = compilation.view();
        view.inject(SyntaxTree::new("marker.cs"));

        let ids: Vec<&str> = view.trees().map(|t| t.source_id.as_str()).collect();
        assert_eq!(ids, vec!["a.cs", "marker.cs"]);
        assert_eq!(compilation.len(), 1);
    }
}
