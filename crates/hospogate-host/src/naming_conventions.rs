//! The `naming-conventions` rule.
//!
//! Runs [`NamingAnalyzer`] through a [`NodeActionTable`] and converts each
//! reported diagnostic into a located [`Violation`]. Every violation whose
//! identifier still resolves in the tree carries the rename as an automatic
//! replacement.

use hospogate_core::{fix, Replacement, Severity, Suggestion, SyntaxTree, Violation, DIAGNOSTIC_ID};
use tracing::debug;

use crate::context::FileContext;
use crate::diagnostic::{Diagnostic, NAMING_DESCRIPTOR};
use crate::registration::{NamingAnalyzer, NodeActionTable};
use crate::rule::Rule;

/// Checks namespace, type, member and field names.
#[derive(Debug)]
pub struct NamingConventions {
    table: NodeActionTable,
}

impl NamingConventions {
    /// Rule name used in configuration.
    pub const NAME: &'static str = "naming-conventions";

    /// Creates the rule, skipping generated files.
    #[must_use]
    pub fn new() -> Self {
        Self::with_analyzer(NamingAnalyzer::new())
    }

    /// Creates the rule from a configured analyzer.
    #[must_use]
    pub fn with_analyzer(analyzer: NamingAnalyzer) -> Self {
        Self {
            table: NodeActionTable::for_analyzer(&analyzer),
        }
    }

    fn to_violation(ctx: &FileContext, tree: &SyntaxTree, diagnostic: Diagnostic) -> Violation {
        let location = ctx.location_for(diagnostic.span);
        let violation = Violation::new(
            diagnostic.rule_id,
            Self::NAME,
            diagnostic.severity,
            location.clone(),
            diagnostic.message,
        );

        match fix::plan_fix(tree, diagnostic.span) {
            Some(code_fix) => violation.with_suggestion(Suggestion::with_fix(
                code_fix.title(),
                Replacement::new(location, code_fix.replacement_identifier()),
            )),
            None => violation,
        }
    }
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NamingConventions {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn code(&self) -> &'static str {
        DIAGNOSTIC_ID
    }

    fn description(&self) -> &'static str {
        NAMING_DESCRIPTOR.description
    }

    fn default_severity(&self) -> Severity {
        NAMING_DESCRIPTOR.default_severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        if ctx.is_generated && !self.table.analyzes_generated_code() {
            debug!("Skipping generated file: {}", ctx.relative_path.display());
            return Vec::new();
        }

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        self.table.run(tree, ctx.is_generated, &mut diagnostics);

        diagnostics
            .into_iter()
            .map(|d| Self::to_violation(ctx, tree, d))
            .collect()
    }
}
