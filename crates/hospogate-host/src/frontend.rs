//! Language frontends: source text in, declaration tree out.
//!
//! `Frontend` is the extension point for languages. Implement it to turn
//! source text into the [`SyntaxTree`] the naming rules run over.

use hospogate_core::SyntaxTree;
use thiserror::Error;

/// Errors raised by a frontend.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader message.
        message: String,
    },

    /// The parser returned no tree.
    #[error("{language} parser produced no tree")]
    NoTree {
        /// Language identifier.
        language: &'static str,
    },
}

/// Parses one language into a [`SyntaxTree`].
pub trait Frontend: Send + Sync {
    /// Language identifier (e.g., `"csharp"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this frontend handles (e.g., `&[".cs"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into a declaration tree.
    ///
    /// Spans in the tree are byte offsets into `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`FrontendError`] when no tree can be produced.
    fn parse(&self, source: &str) -> Result<SyntaxTree, FrontendError>;

    /// Returns true if this frontend handles `path`.
    fn handles(&self, path: &std::path::Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.extensions().iter().any(|ext| name.ends_with(ext)))
    }
}

/// Type alias for boxed `Frontend` trait objects.
pub type FrontendBox = Box<dyn Frontend>;
