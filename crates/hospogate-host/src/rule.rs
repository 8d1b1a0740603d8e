//! Rule trait for defining lint rules over declaration trees.

use hospogate_core::{Severity, SyntaxTree, Violation};

use crate::context::FileContext;

/// A per-file lint rule.
///
/// Rules receive the parsed declaration tree of one file and report
/// violations located in that file.
///
/// # Example
///
/// ```ignore
/// use hospogate_host::{FileContext, Rule};
/// use hospogate_core::{SyntaxTree, Violation};
///
/// pub struct NoEmptyFiles;
///
/// impl Rule for NoEmptyFiles {
///     fn name(&self) -> &'static str { "no-empty-files" }
///     fn code(&self) -> &'static str { "HG0100" }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
///         // ...
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "naming-conventions").
    fn name(&self) -> &'static str;

    /// Returns the diagnostic id reported by this rule.
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use hospogate_core::{Location, Span, SyntaxNode};
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }

        fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                Location::new(ctx.relative_path.clone(), 1, 1).with_span(tree.root().span()),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.description(), "");
        assert_eq!(rule.default_severity(), Severity::Warning);

        let tree = SyntaxTree::new(SyntaxNode::new(Span::new(0, 4)));
        let ctx = FileContext::new(Path::new("/r/a.cs"), "a {}", Path::new("/r"));
        let violations = rule.check(&ctx, &tree);
        assert_eq!(violations[0].location.span(), Span::new(0, 4));
    }
}
