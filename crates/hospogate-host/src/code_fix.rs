//! Code fix provider for the naming diagnostic.

use hospogate_core::fix;
use hospogate_core::DIAGNOSTIC_ID;
use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::host::{CancellationToken, Document, FixRegistry, HostError};

/// Offers a rename fix for each naming diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingCodeFixProvider;

impl NamingCodeFixProvider {
    /// Creates the provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Diagnostic ids this provider can fix.
    #[must_use]
    pub fn fixable_diagnostic_ids(&self) -> &'static [&'static str] {
        &[DIAGNOSTIC_ID]
    }

    /// Registers at most one fix for `diagnostic`.
    ///
    /// Returns `Ok(false)` when nothing was registered: the diagnostic is not
    /// one this provider fixes, or the current tree no longer has a
    /// declaration identifier at the diagnostic span.
    ///
    /// # Errors
    ///
    /// Propagates the document's [`HostError`], including cancellation.
    pub fn register_code_fixes<D>(
        &self,
        document: &D,
        diagnostic: &Diagnostic,
        cancel: &CancellationToken,
        registry: &mut dyn FixRegistry,
    ) -> Result<bool, HostError>
    where
        D: Document + ?Sized,
    {
        if !self.fixable_diagnostic_ids().contains(&diagnostic.rule_id) {
            return Ok(false);
        }

        let tree = document.syntax_root(cancel)?;
        let Some(code_fix) = fix::plan_fix(&tree, diagnostic.span) else {
            debug!(span = %diagnostic.span, "No fix available for diagnostic");
            return Ok(false);
        };

        registry.register_fix(code_fix.title(), Box::new(move || code_fix.apply(&tree)));
        Ok(true)
    }
}
