//! Single-node rewrites that correct a naming violation.
//!
//! [`plan_fix`] resolves a diagnostic span back to the declaration that
//! owns it and computes the corrected identifier. The resulting
//! [`CodeFix`] either rewrites the tree ([`CodeFix::apply`]) or emits the
//! equivalent [`TextEdit`] for hosts that work on source text.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::edit::TextEdit;
use crate::syntax::{DeclarationKind, DeclarationNode, Identifier, Span, SyntaxNode, SyntaxTree};

/// Errors returned when applying a fix.
#[derive(Debug, Error)]
pub enum FixError {
    /// The fix was planned against a different snapshot.
    #[error("declaration at {span} is not part of this syntax tree")]
    NodeNotFound {
        /// Span of the identifier the fix targets.
        span: Span,
    },
}

/// Returns the corrected spelling of `text` for a declaration of `kind`.
///
/// | Kind | Correction |
/// |------|------------|
/// | namespace, class, method, property | uppercase the first character |
/// | interface | prepend `I`, then uppercase the original first character; a leading lowercase `i` is taken as the prefix |
/// | field | prepend `_` |
#[must_use]
pub fn corrected_identifier(kind: DeclarationKind, text: &str) -> String {
    match kind {
        DeclarationKind::Namespace
        | DeclarationKind::Class
        | DeclarationKind::Method
        | DeclarationKind::Property => capitalize_first(text),
        DeclarationKind::Interface => match text.strip_prefix('i') {
            Some(rest) if !rest.is_empty() => format!("I{}", capitalize_first(rest)),
            _ => format!("I{}", capitalize_first(text)),
        },
        DeclarationKind::Field => format!("_{text}"),
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title offered to the user for fixing a declaration of `kind`.
#[must_use]
pub const fn fix_title(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Namespace => "Fix namespace naming",
        DeclarationKind::Class => "Fix class naming",
        DeclarationKind::Interface => "Fix interface naming",
        DeclarationKind::Method => "Fix method naming",
        DeclarationKind::Property => "Fix property naming",
        DeclarationKind::Field => "Fix field naming",
    }
}

/// The edit a fix performs: rename one identifier of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixEdit {
    /// Declaration as it appears in the snapshot.
    pub original: DeclarationNode,
    /// Index of the renamed identifier within [`DeclarationNode::identifiers`].
    pub index: usize,
    /// Corrected identifier text.
    pub replacement_identifier: String,
}

impl FixEdit {
    /// Declaration with the identifier renamed.
    #[must_use]
    pub fn replacement(&self) -> DeclarationNode {
        match self.original.identifiers().get(self.index) {
            Some(target) => {
                let renamed = target.with_text(&self.replacement_identifier);
                self.original.with_identifier(self.index, renamed)
            }
            None => self.original.clone(),
        }
    }
}

/// A planned fix for one diagnostic.
#[derive(Debug, Clone)]
pub struct CodeFix {
    kind: DeclarationKind,
    node: Arc<SyntaxNode>,
    target: Identifier,
    index: usize,
    replacement_identifier: String,
}

impl CodeFix {
    /// Kind of the declaration being fixed.
    #[must_use]
    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Title offered to the user.
    #[must_use]
    pub fn title(&self) -> &'static str {
        fix_title(self.kind)
    }

    /// Identifier being renamed.
    #[must_use]
    pub fn target(&self) -> &Identifier {
        &self.target
    }

    /// Corrected identifier text.
    #[must_use]
    pub fn replacement_identifier(&self) -> &str {
        &self.replacement_identifier
    }

    /// Builds the edit this fix performs.
    #[must_use]
    pub fn edit(&self) -> Option<FixEdit> {
        self.node.declaration().map(|original| FixEdit {
            original: original.clone(),
            index: self.index,
            replacement_identifier: self.replacement_identifier.clone(),
        })
    }

    /// Applies the fix, returning a new snapshot.
    ///
    /// `tree` is left untouched. Spans in the new snapshot stay in the
    /// coordinates of the source `tree` was parsed from: the renamed
    /// identifier keeps its start and takes the new length, while sibling
    /// and ancestor spans are not shifted. Reparse the text produced by
    /// [`CodeFix::text_edit`] to get spans for the edited source.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::NodeNotFound`] if the fix was planned against a
    /// different snapshot.
    pub fn apply(&self, tree: &SyntaxTree) -> Result<SyntaxTree, FixError> {
        let not_found = || FixError::NodeNotFound {
            span: self.target.span,
        };
        let edit = self.edit().ok_or_else(not_found)?;
        let replacement = self.node.rewritten(edit.replacement());
        tree.replace_node(&self.node, replacement).ok_or_else(not_found)
    }

    /// Text edit equivalent to [`CodeFix::apply`].
    #[must_use]
    pub fn text_edit(&self) -> TextEdit {
        TextEdit::new(self.target.span, self.replacement_identifier.clone())
    }
}

/// Plans a fix for the diagnostic reported at `span`.
///
/// Returns `None` when no declaration in `tree` owns an identifier at exactly
/// `span`, which happens when the tree changed after the diagnostic was
/// reported.
#[must_use]
pub fn plan_fix(tree: &SyntaxTree, span: Span) -> Option<CodeFix> {
    let Some(node) = tree.find_node(span) else {
        debug!("No node at {span}; skipping fix");
        return None;
    };
    let Some(declaration) = node.declaration() else {
        debug!("Node at {span} is not a checked declaration; skipping fix");
        return None;
    };
    let kind = declaration.kind();
    let Some((index, target)) = declaration
        .identifiers()
        .iter()
        .enumerate()
        .find(|(_, id)| id.span == span)
    else {
        debug!("No {kind} identifier at {span}; skipping fix");
        return None;
    };

    let target = target.clone();
    let replacement_identifier = corrected_identifier(kind, &target.text);
    if replacement_identifier == target.text {
        debug!("Correcting {kind} `{}` changes nothing; skipping fix", target.text);
        return None;
    }

    Some(CodeFix {
        kind,
        node: Arc::clone(node),
        target,
        index,
        replacement_identifier,
    })
}
