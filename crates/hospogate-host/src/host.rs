//! Interfaces consumed from the analysis host.
//!
//! A host supplies syntax trees through [`Document`], receives diagnostics
//! through [`DiagnosticSink`] and collects offered fixes through
//! [`FixRegistry`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hospogate_core::{FixError, SyntaxTree};
use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// Errors surfaced by a host while producing a syntax tree.
#[derive(Debug, Error)]
pub enum HostError {
    /// The request was cancelled before the tree was produced.
    #[error("operation cancelled")]
    Cancelled,

    /// The document could not be parsed.
    #[error("failed to parse document: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },
}

/// Cooperative cancellation token shared between a host and its requests.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Returns [`HostError::Cancelled`] once cancellation was requested.
    ///
    /// # Errors
    ///
    /// Fails if the token is cancelled.
    pub fn check(&self) -> Result<(), HostError> {
        if self.is_cancelled() {
            Err(HostError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A source document the host can produce a syntax tree for.
pub trait Document {
    /// Returns the current syntax tree of the document.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Cancelled`] if `cancel` fires first, or
    /// [`HostError::Parse`] if the document cannot be parsed.
    fn syntax_root(&self, cancel: &CancellationToken) -> Result<SyntaxTree, HostError>;
}

impl Document for SyntaxTree {
    fn syntax_root(&self, cancel: &CancellationToken) -> Result<SyntaxTree, HostError> {
        cancel.check()?;
        Ok(self.clone())
    }
}

/// Receives diagnostics from analyzers.
pub trait DiagnosticSink {
    /// Reports one diagnostic. Ownership passes to the sink.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Deferred fix application, run when the user picks the fix.
pub type ApplyFix = Box<dyn FnOnce() -> Result<SyntaxTree, FixError> + Send>;

/// Collects the fixes offered for a diagnostic.
pub trait FixRegistry {
    /// Registers a fix under `title`.
    fn register_fix(&mut self, title: &'static str, apply: ApplyFix);
}

/// A fix collected by [`RegisteredFixes`].
pub struct RegisteredFix {
    /// Title shown to the user.
    pub title: &'static str,
    /// Applies the fix.
    pub apply: ApplyFix,
}

impl std::fmt::Debug for RegisteredFix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredFix")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// A [`FixRegistry`] that keeps every registered fix in order.
#[derive(Debug, Default)]
pub struct RegisteredFixes {
    /// Fixes in registration order.
    pub fixes: Vec<RegisteredFix>,
}

impl RegisteredFixes {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FixRegistry for RegisteredFixes {
    fn register_fix(&mut self, title: &'static str, apply: ApplyFix) {
        self.fixes.push(RegisteredFix { title, apply });
    }
}
