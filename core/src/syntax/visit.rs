use super::{Item, Member, MethodDecl, NamespaceDecl, PropertyDecl, SyntaxTree, TypeDecl};

/// Visitor for traversing a [`SyntaxTree`].
///
/// Implement the `visit_*` methods you care about. Default implementations
/// call the corresponding `walk_*` methods to traverse children, so an
/// override that still wants the children visited calls `walk_*` itself.
pub trait Visit<'ast> {
    fn visit_tree(&mut self, tree: &'ast SyntaxTree) {
        self.walk_tree(tree);
    }

    fn visit_item(&mut self, item: &'ast Item) {
        self.walk_item(item);
    }

    fn visit_namespace(&mut self, namespace: &'ast NamespaceDecl) {
        self.walk_namespace(namespace);
    }

    fn visit_type_decl(&mut self, decl: &'ast TypeDecl) {
        self.walk_type_decl(decl);
    }

    fn visit_member(&mut self, member: &'ast Member) {
        self.walk_member(member);
    }

    fn visit_property(&mut self, property: &'ast PropertyDecl) {
        let _ = property; // leaf node
    }

    fn visit_method(&mut self, method: &'ast MethodDecl) {
        let _ = method; // leaf node
    }

    // Walk methods traverse child nodes

    fn walk_tree(&mut self, tree: &'ast SyntaxTree) {
        for item in &tree.items {
            self.visit_item(item);
        }
    }

    fn walk_item(&mut self, item: &'ast Item) {
        match item {
            Item::Namespace(namespace) => self.visit_namespace(namespace),
            Item::Type(decl) => self.visit_type_decl(decl),
        }
    }

    fn walk_namespace(&mut self, namespace: &'ast NamespaceDecl) {
        for item in &namespace.items {
            self.visit_item(item);
        }
    }

    fn walk_type_decl(&mut self, decl: &'ast TypeDecl) {
        for member in &decl.members {
            self.visit_member(member);
        }
    }

    fn walk_member(&mut self, member: &'ast Member) {
        match member {
            Member::Property(property) => self.visit_property(property),
            Member::Method(method) => self.visit_method(method),
            Member::Type(decl) => self.visit_type_decl(decl),
            Member::Field(_) | Member::Other(_) => {}
        }
    }
}
