//! Immutable declaration tree.
//!
//! A [`SyntaxTree`] is a snapshot: nodes are reference counted and never
//! mutated. [`SyntaxTree::replace_node`] rebuilds only the path from the root
//! to the replaced node and shares every other subtree with the original.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Byte range into the source text a tree was built from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Length in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span from a start offset and a length.
    #[must_use]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Byte offset one past the last character.
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.length
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// An identifier token, or a dotted name for namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Identifier text as written in source.
    pub text: String,
    /// Location of the identifier.
    pub span: Span,
}

impl Identifier {
    /// Creates an identifier node.
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Returns a copy carrying `text`, starting where this one starts.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        let text = text.into();
        let span = Span::new(self.span.start, text.len());
        Self { text, span }
    }
}

/// Declaration modifiers recognized by the frontends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// `public`
    Public,
    /// `private`
    Private,
    /// `protected`
    Protected,
    /// `internal`
    Internal,
    /// `static`
    Static,
    /// `readonly`
    ReadOnly,
    /// `const`
    Const,
    /// `volatile`
    Volatile,
}

impl Modifier {
    /// Maps a source keyword to a modifier.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "internal" => Some(Self::Internal),
            "static" => Some(Self::Static),
            "readonly" => Some(Self::ReadOnly),
            "const" => Some(Self::Const),
            "volatile" => Some(Self::Volatile),
            _ => None,
        }
    }
}

/// The six declaration kinds the naming rules apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `namespace Foo.Bar`
    Namespace,
    /// `class Foo`
    Class,
    /// `interface IFoo`
    Interface,
    /// `void Foo()`
    Method,
    /// `int Foo { get; }`
    Property,
    /// `int foo;`
    Field,
}

impl DeclarationKind {
    /// All kinds, in registration order.
    pub const ALL: [Self; 6] = [
        Self::Namespace,
        Self::Class,
        Self::Interface,
        Self::Method,
        Self::Property,
        Self::Field,
    ];

    /// Lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Method => "method",
            Self::Property => "property",
            Self::Field => "field",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field declaration statement, possibly binding several variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Modifiers applied to the whole statement.
    pub modifiers: BTreeSet<Modifier>,
    /// Declared type, when it is a simple or generic name.
    pub declared_type: Option<String>,
    /// Bound variables, in source order.
    pub variables: Vec<Identifier>,
}

impl FieldDeclaration {
    /// Creates a field declaration.
    #[must_use]
    pub fn new(
        modifiers: impl IntoIterator<Item = Modifier>,
        declared_type: Option<String>,
        variables: Vec<Identifier>,
    ) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            declared_type,
            variables,
        }
    }

    /// Returns true if the statement carries `modifier`.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// A declaration node, one variant per checked declaration kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationNode {
    /// Namespace with its (possibly dotted) name.
    Namespace(Identifier),
    /// Class declaration.
    Class(Identifier),
    /// Interface declaration.
    Interface(Identifier),
    /// Method declaration.
    Method(Identifier),
    /// Property declaration.
    Property(Identifier),
    /// Field declaration statement.
    Field(FieldDeclaration),
}

impl DeclarationNode {
    /// Kind of this declaration.
    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        match self {
            Self::Namespace(_) => DeclarationKind::Namespace,
            Self::Class(_) => DeclarationKind::Class,
            Self::Interface(_) => DeclarationKind::Interface,
            Self::Method(_) => DeclarationKind::Method,
            Self::Property(_) => DeclarationKind::Property,
            Self::Field(_) => DeclarationKind::Field,
        }
    }

    /// Identifiers this declaration introduces.
    ///
    /// One for every kind except fields, which yield each bound variable.
    #[must_use]
    pub fn identifiers(&self) -> &[Identifier] {
        match self {
            Self::Namespace(id)
            | Self::Class(id)
            | Self::Interface(id)
            | Self::Method(id)
            | Self::Property(id) => std::slice::from_ref(id),
            Self::Field(field) => &field.variables,
        }
    }

    /// Returns a copy with the identifier at `index` replaced.
    ///
    /// An out-of-range index returns an unchanged copy.
    #[must_use]
    pub fn with_identifier(&self, index: usize, identifier: Identifier) -> Self {
        match self {
            Self::Namespace(_) if index == 0 => Self::Namespace(identifier),
            Self::Class(_) if index == 0 => Self::Class(identifier),
            Self::Interface(_) if index == 0 => Self::Interface(identifier),
            Self::Method(_) if index == 0 => Self::Method(identifier),
            Self::Property(_) if index == 0 => Self::Property(identifier),
            Self::Field(field) if index < field.variables.len() => {
                let mut field = field.clone();
                field.variables[index] = identifier;
                Self::Field(field)
            }
            other => other.clone(),
        }
    }
}

/// A node in a [`SyntaxTree`].
///
/// Nodes that are not checked declarations (compilation units, structs,
/// enums) carry no declaration and only group their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    span: Span,
    declaration: Option<DeclarationNode>,
    children: Vec<Arc<SyntaxNode>>,
}

impl SyntaxNode {
    /// Creates a grouping node without a declaration.
    #[must_use]
    pub fn new(span: Span) -> Self {
        Self {
            span,
            declaration: None,
            children: Vec::new(),
        }
    }

    /// Creates a declaration node.
    #[must_use]
    pub fn with_declaration(span: Span, declaration: DeclarationNode) -> Self {
        Self {
            span,
            declaration: Some(declaration),
            children: Vec::new(),
        }
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.push_child(child);
        self
    }

    /// Appends a child node in place.
    pub fn push_child(&mut self, child: Self) {
        self.children.push(Arc::new(child));
    }

    /// Location of the whole node.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Declaration carried by this node, if any.
    #[must_use]
    pub fn declaration(&self) -> Option<&DeclarationNode> {
        self.declaration.as_ref()
    }

    /// Child nodes in source order.
    #[must_use]
    pub fn children(&self) -> &[Arc<SyntaxNode>] {
        &self.children
    }

    /// Returns a copy carrying `declaration` and sharing this node's children.
    ///
    /// The span keeps its start and grows or shrinks by the change in total
    /// identifier length.
    #[must_use]
    pub fn rewritten(&self, declaration: DeclarationNode) -> Self {
        let old_len = identifier_len(self.declaration.as_ref());
        let new_len = identifier_len(Some(&declaration));
        let length = (self.span.length + new_len).saturating_sub(old_len);
        Self {
            span: Span::new(self.span.start, length),
            declaration: Some(declaration),
            children: self.children.clone(),
        }
    }
}

fn identifier_len(declaration: Option<&DeclarationNode>) -> usize {
    declaration.map_or(0, |d| d.identifiers().iter().map(|id| id.text.len()).sum())
}

/// An immutable snapshot of a declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: Arc<SyntaxNode>,
}

impl SyntaxTree {
    /// Wraps a root node into a snapshot.
    #[must_use]
    pub fn new(root: SyntaxNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> &Arc<SyntaxNode> {
        &self.root
    }

    /// All nodes in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![&self.root],
        }
    }

    /// All declaration nodes in pre-order, paired with their declaration.
    pub fn declarations(&self) -> impl Iterator<Item = (&Arc<SyntaxNode>, &DeclarationNode)> {
        self.descendants()
            .filter_map(|node| node.declaration().map(|decl| (node, decl)))
    }

    /// Finds the innermost node whose span contains `span`.
    #[must_use]
    pub fn find_node(&self, span: Span) -> Option<&Arc<SyntaxNode>> {
        if !self.root.span.contains(span) {
            return None;
        }

        let mut current = &self.root;
        while let Some(child) = current.children.iter().find(|c| c.span.contains(span)) {
            current = child;
        }
        Some(current)
    }

    /// Returns a new snapshot with `old` replaced by `new`.
    ///
    /// `old` is matched by identity, so it must come from this snapshot.
    /// Returns `None` when it does not.
    #[must_use]
    pub fn replace_node(&self, old: &Arc<SyntaxNode>, new: SyntaxNode) -> Option<Self> {
        let new = Arc::new(new);
        replace_in(&self.root, old, &new).map(|root| Self { root })
    }
}

fn replace_in(
    node: &Arc<SyntaxNode>,
    old: &Arc<SyntaxNode>,
    new: &Arc<SyntaxNode>,
) -> Option<Arc<SyntaxNode>> {
    if Arc::ptr_eq(node, old) {
        return Some(Arc::clone(new));
    }

    node.children.iter().enumerate().find_map(|(i, child)| {
        replace_in(child, old, new).map(|replaced| {
            let mut children = node.children.clone();
            children[i] = replaced;
            Arc::new(SyntaxNode {
                span: node.span,
                declaration: node.declaration.clone(),
                children,
            })
        })
    })
}

/// Pre-order iterator over the nodes of a tree.
pub struct Descendants<'a> {
    stack: Vec<&'a Arc<SyntaxNode>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Arc<SyntaxNode>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // namespace app { class foo { void bar() {} } class Baz {} }
    fn sample_tree() -> SyntaxTree {
        let method = SyntaxNode::with_declaration(
            Span::new(28, 13),
            DeclarationNode::Method(Identifier::new("bar", Span::new(33, 3))),
        );
        let foo = SyntaxNode::with_declaration(
            Span::new(16, 27),
            DeclarationNode::Class(Identifier::new("foo", Span::new(22, 3))),
        )
        .with_child(method);
        let baz = SyntaxNode::with_declaration(
            Span::new(44, 12),
            DeclarationNode::Class(Identifier::new("Baz", Span::new(50, 3))),
        );
        let namespace = SyntaxNode::with_declaration(
            Span::new(0, 58),
            DeclarationNode::Namespace(Identifier::new("app", Span::new(10, 3))),
        )
        .with_child(foo)
        .with_child(baz);
        SyntaxTree::new(SyntaxNode::new(Span::new(0, 58)).with_child(namespace))
    }

    #[test]
    fn span_containment() {
        let outer = Span::new(10, 20);
        assert!(outer.contains(Span::new(10, 20)));
        assert!(outer.contains(Span::new(15, 3)));
        assert!(!outer.contains(Span::new(25, 10)));
        assert!(!outer.contains(Span::new(5, 3)));
    }

    #[test]
    fn declarations_are_pre_order() {
        let tree = sample_tree();
        let names: Vec<&str> = tree
            .declarations()
            .map(|(_, d)| d.identifiers()[0].text.as_str())
            .collect();
        assert_eq!(names, vec!["app", "foo", "bar", "Baz"]);
    }

    #[test]
    fn find_node_returns_innermost() {
        let tree = sample_tree();
        let node = tree.find_node(Span::new(33, 3)).unwrap();
        assert_eq!(node.declaration().map(DeclarationNode::kind), Some(DeclarationKind::Method));

        let node = tree.find_node(Span::new(22, 3)).unwrap();
        assert_eq!(node.declaration().map(DeclarationNode::kind), Some(DeclarationKind::Class));

        let node = tree.find_node(Span::new(10, 3)).unwrap();
        assert_eq!(
            node.declaration().map(DeclarationNode::kind),
            Some(DeclarationKind::Namespace)
        );
    }

    #[test]
    fn find_node_outside_root_is_none() {
        let tree = sample_tree();
        assert!(tree.find_node(Span::new(100, 2)).is_none());
    }

    #[test]
    fn replace_node_shares_untouched_subtrees() {
        let tree = sample_tree();
        let foo = Arc::clone(tree.find_node(Span::new(22, 3)).unwrap());
        let renamed = foo.rewritten(DeclarationNode::Class(Identifier::new("Foo", Span::new(22, 3))));

        let new_tree = tree.replace_node(&foo, renamed).unwrap();

        let old_ns = &tree.root().children()[0];
        let new_ns = &new_tree.root().children()[0];
        assert!(!Arc::ptr_eq(old_ns, new_ns));
        // Baz is untouched and shared.
        assert!(Arc::ptr_eq(&old_ns.children()[1], &new_ns.children()[1]));
        // foo's method subtree is shared too.
        assert!(Arc::ptr_eq(
            &old_ns.children()[0].children()[0],
            &new_ns.children()[0].children()[0]
        ));

        // Original snapshot is unchanged.
        let names: Vec<&str> = tree
            .declarations()
            .map(|(_, d)| d.identifiers()[0].text.as_str())
            .collect();
        assert_eq!(names, vec!["app", "foo", "bar", "Baz"]);

        let names: Vec<&str> = new_tree
            .declarations()
            .map(|(_, d)| d.identifiers()[0].text.as_str())
            .collect();
        assert_eq!(names, vec!["app", "Foo", "bar", "Baz"]);
    }

    #[test]
    fn replace_node_from_other_tree_is_none() {
        let tree = sample_tree();
        let other = sample_tree();
        let foreign = Arc::clone(other.find_node(Span::new(22, 3)).unwrap());
        assert!(tree.replace_node(&foreign, SyntaxNode::new(Span::new(0, 0))).is_none());
    }

    #[test]
    fn rewritten_adjusts_span_length() {
        let node = SyntaxNode::with_declaration(
            Span::new(0, 20),
            DeclarationNode::Interface(Identifier::new("foo", Span::new(10, 3))),
        );
        let rewritten =
            node.rewritten(DeclarationNode::Interface(Identifier::new("IFoo", Span::new(10, 4))));
        assert_eq!(rewritten.span(), Span::new(0, 21));
    }

    #[test]
    fn with_identifier_replaces_field_variable() {
        let field = DeclarationNode::Field(FieldDeclaration::new(
            [Modifier::Private, Modifier::ReadOnly],
            Some("IFoo".into()),
            vec![
                Identifier::new("a", Span::new(22, 1)),
                Identifier::new("b", Span::new(25, 1)),
            ],
        ));
        let updated = field.with_identifier(1, Identifier::new("_b", Span::new(25, 2)));
        let names: Vec<&str> = updated.identifiers().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(names, vec!["a", "_b"]);

        // Out of range leaves the node unchanged.
        assert_eq!(field.with_identifier(5, Identifier::new("x", Span::new(0, 1))), field);
    }

    #[test]
    fn modifier_keywords() {
        assert_eq!(Modifier::from_keyword("readonly"), Some(Modifier::ReadOnly));
        assert_eq!(Modifier::from_keyword("private"), Some(Modifier::Private));
        assert_eq!(Modifier::from_keyword("async"), None);
    }
}
