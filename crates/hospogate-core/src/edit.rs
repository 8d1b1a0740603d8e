//! Text edits, the printed form of a tree rewrite.

use crate::syntax::Span;
use serde::{Deserialize, Serialize};

/// Replace the text at `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// Range of the original text to replace.
    pub span: Span,
    /// Replacement text.
    pub new_text: String,
}

impl TextEdit {
    /// Creates a text edit.
    #[must_use]
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// Applies `edits` to `source`.
///
/// Edits are applied back to front so earlier offsets stay valid. An edit
/// that overlaps one already applied, or that does not fall on character
/// boundaries of `source`, is dropped.
///
/// Returns the new text and the number of edits applied.
#[must_use]
pub fn apply_text_edits(source: &str, edits: &[TextEdit]) -> (String, usize) {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut output = source.to_string();
    let mut applied = 0;
    let mut floor = usize::MAX;

    for edit in sorted {
        let span = edit.span;
        if span.end() > floor {
            continue;
        }
        if source.get(span.start..span.end()).is_none() {
            continue;
        }
        output.replace_range(span.start..span.end(), &edit.new_text);
        floor = span.start;
        applied += 1;
    }

    (output, applied)
}
