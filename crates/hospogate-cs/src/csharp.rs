//! C# frontend using Tree-sitter.
//!
//! Only the checked declarations survive into the [`SyntaxTree`]: every
//! other Tree-sitter node is flattened away and its declarations are
//! attached to the nearest enclosing kept node. Structs, records and enums
//! stay in the tree as plain grouping nodes so member spans nest correctly.

use hospogate_core::{
    DeclarationNode, FieldDeclaration, Identifier, Modifier, Span, SyntaxNode, SyntaxTree,
};
use hospogate_host::{Frontend, FrontendError};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

const LANGUAGE_ID: &str = "csharp";

/// Parses C# source into a declaration tree.
pub struct CSharpFrontend {
    language: Language,
}

impl CSharpFrontend {
    /// Creates a new C# frontend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a str) -> &'a str {
        src.get(node.start_byte()..node.end_byte()).unwrap_or("")
    }

    fn span(node: &Node<'_>) -> Span {
        Span::new(node.start_byte(), node.end_byte() - node.start_byte())
    }

    /// Identifier value text, without the `@` of a verbatim identifier.
    fn identifier(node: &Node<'_>, src: &str) -> Identifier {
        let text = Self::text(node, src);
        let span = Self::span(node);
        match text.strip_prefix('@') {
            Some(value) => Identifier::new(value, Span::new(span.start + 1, value.len())),
            None => Identifier::new(text, span),
        }
    }

    /// Identifier stored in the `name` field of a declaration.
    fn named(node: &Node<'_>, src: &str) -> Option<Identifier> {
        node.child_by_field_name("name")
            .map(|name| Self::identifier(&name, src))
    }

    fn first_child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
        found
    }

    /// Declared type of a field, when it is a simple or generic name.
    fn declared_type(node: &Node<'_>, src: &str) -> Option<String> {
        match node.kind() {
            "identifier" => Some(Self::text(node, src).to_owned()),
            "generic_name" => Self::first_child_of_kind(node, "identifier")
                .map(|id| Self::text(&id, src).to_owned()),
            _ => None,
        }
    }

    fn extract_field(node: &Node<'_>, src: &str) -> Option<FieldDeclaration> {
        let mut modifiers = Vec::new();
        let mut declaration = None;

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "modifier" => {
                    if let Some(modifier) = Modifier::from_keyword(Self::text(&child, src).trim()) {
                        modifiers.push(modifier);
                    }
                }
                "variable_declaration" => declaration = Some(child),
                _ => {}
            }
        }

        let declaration = declaration?;
        let declared_type = declaration
            .child_by_field_name("type")
            .and_then(|ty| Self::declared_type(&ty, src));

        let mut variables = Vec::new();
        let mut cursor = declaration.walk();
        for declarator in declaration.named_children(&mut cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let name = declarator
                .child_by_field_name("name")
                .or_else(|| Self::first_child_of_kind(&declarator, "identifier"));
            if let Some(name) = name {
                variables.push(Self::identifier(&name, src));
            }
        }

        Some(FieldDeclaration::new(modifiers, declared_type, variables))
    }

    /// Maps a Tree-sitter node to a kept tree node, if it is one.
    fn classify(node: &Node<'_>, src: &str) -> Option<SyntaxNode> {
        let declaration = match node.kind() {
            "namespace_declaration" | "file_scoped_namespace_declaration" => {
                Self::named(node, src).map(DeclarationNode::Namespace)
            }
            "class_declaration" => Self::named(node, src).map(DeclarationNode::Class),
            "interface_declaration" => Self::named(node, src).map(DeclarationNode::Interface),
            "method_declaration" => Self::named(node, src).map(DeclarationNode::Method),
            "property_declaration" => Self::named(node, src).map(DeclarationNode::Property),
            "field_declaration" => Self::extract_field(node, src).map(DeclarationNode::Field),
            "struct_declaration" | "record_declaration" | "record_struct_declaration"
            | "enum_declaration" => return Some(SyntaxNode::new(Self::span(node))),
            _ => return None,
        };

        Some(match declaration {
            Some(declaration) => SyntaxNode::with_declaration(Self::span(node), declaration),
            None => SyntaxNode::new(Self::span(node)),
        })
    }

    /// Appends the kept nodes found under `node` to `parent`.
    fn collect(node: &Node<'_>, src: &str, parent: &mut SyntaxNode) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match Self::classify(&child, src) {
                Some(mut kept) => {
                    Self::collect(&child, src, &mut kept);
                    parent.push_child(kept);
                }
                None => Self::collect(&child, src, parent),
            }
        }
    }
}

impl Default for CSharpFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for CSharpFrontend {
    fn language_id(&self) -> &'static str {
        LANGUAGE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".cs"]
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, FrontendError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| FrontendError::Language {
                language: LANGUAGE_ID,
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or(FrontendError::NoTree {
                language: LANGUAGE_ID,
            })?;
        let root = tree.root_node();
        if root.has_error() {
            debug!("C# source contains syntax errors; analyzing recovered tree");
        }

        let mut unit = SyntaxNode::new(Span::new(0, source.len()));
        Self::collect(&root, source, &mut unit);
        Ok(SyntaxTree::new(unit))
    }
}
