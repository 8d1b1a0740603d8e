//! Diagnostic descriptor and reported diagnostics.

use hospogate_core::{NamingViolation, Severity, Span, CATEGORY, DIAGNOSTIC_ID};

/// Static description of a diagnostic an analyzer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    /// Stable diagnostic identifier.
    pub id: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Longer description.
    pub description: &'static str,
    /// Category the diagnostic belongs to.
    pub category: &'static str,
    /// Severity used when no override is configured.
    pub default_severity: Severity,
    /// Whether the diagnostic is on unless disabled.
    pub enabled_by_default: bool,
}

/// The naming diagnostic.
pub const NAMING_DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: DIAGNOSTIC_ID,
    title: "Declaration does not follow naming conventions",
    description: "Namespaces, classes, methods and properties start with an uppercase letter, \
                  interfaces start with 'I' and an uppercase letter, and private readonly \
                  interface-typed fields start with '_'.",
    category: CATEGORY,
    default_severity: Severity::Warning,
    enabled_by_default: true,
};

/// A reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Identifier of the descriptor that produced it.
    pub rule_id: &'static str,
    /// Location of the offending identifier.
    pub span: Span,
    /// Human-readable message.
    pub message: String,
    /// Severity.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates a diagnostic for `descriptor` at its default severity.
    #[must_use]
    pub fn new(descriptor: &DiagnosticDescriptor, span: Span, message: impl Into<String>) -> Self {
        Self {
            rule_id: descriptor.id,
            span,
            message: message.into(),
            severity: descriptor.default_severity,
        }
    }
}

impl From<&NamingViolation> for Diagnostic {
    fn from(violation: &NamingViolation) -> Self {
        Self::new(&NAMING_DESCRIPTOR, violation.span(), violation.message())
    }
}
