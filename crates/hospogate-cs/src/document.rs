//! In-memory C# document served to the fix provider.

use hospogate_core::SyntaxTree;
use hospogate_host::{CancellationToken, Document, Frontend, HostError};

use crate::csharp::CSharpFrontend;

/// A C# source file held in memory.
///
/// Every call to [`Document::syntax_root`] parses the current text, so a
/// document keeps no tree of its own.
#[derive(Default)]
pub struct CSharpDocument {
    frontend: CSharpFrontend,
    source: String,
}

impl CSharpDocument {
    /// Creates a document over `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            frontend: CSharpFrontend::new(),
            source: source.into(),
        }
    }

    /// Current source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replaces the source text.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }
}

impl Document for CSharpDocument {
    fn syntax_root(&self, cancel: &CancellationToken) -> Result<SyntaxTree, HostError> {
        cancel.check()?;
        let tree = self
            .frontend
            .parse(&self.source)
            .map_err(|e| HostError::Parse {
                message: e.to_string(),
            })?;
        cancel.check()?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_source() {
        let mut doc = CSharpDocument::new("class a {}");
        let cancel = CancellationToken::new();
        assert_eq!(doc.syntax_root(&cancel).unwrap().declarations().count(), 1);

        doc.set_source("class a {} class b {}");
        assert_eq!(doc.source(), "class a {} class b {}");
        assert_eq!(doc.syntax_root(&cancel).unwrap().declarations().count(), 2);
    }

    #[test]
    fn cancelled_before_parse() {
        let doc = CSharpDocument::new("class a {}");
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(matches!(doc.syntax_root(&cancel), Err(HostError::Cancelled)));
    }
}
