//! Naming rules for declaration identifiers.
//!
//! | Kind | Rule |
//! |------|------|
//! | namespace | first character is uppercase |
//! | class | first character is uppercase |
//! | interface | `I` followed by an uppercase letter |
//! | method | first character is uppercase |
//! | property | first character is uppercase |
//! | field | dependency-injection fields start with `_` |
//!
//! A field counts as a dependency-injection field when it is `private`,
//! `readonly`, and its declared type name starts with `I`. The type name is
//! inspected textually, so a type called `Image` also qualifies.
//!
//! Every function here is pure. An empty identifier never violates a rule.

use crate::syntax::{DeclarationKind, DeclarationNode, FieldDeclaration, Identifier, Modifier, Span};

/// Diagnostic identifier shared by every naming rule.
pub const DIAGNOSTIC_ID: &str = "HospogateAnalyzer";

/// Diagnostic category.
pub const CATEGORY: &str = "Naming";

/// A single naming rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingRule {
    /// Namespaces start with an uppercase letter.
    Namespace,
    /// Classes start with an uppercase letter.
    Class,
    /// Interfaces start with `I` and an uppercase letter.
    Interface,
    /// Methods start with an uppercase letter.
    Method,
    /// Properties start with an uppercase letter.
    Property,
    /// Dependency-injection fields start with `_`.
    DependencyInjectionField,
}

impl NamingRule {
    /// All rules.
    pub const ALL: [Self; 6] = [
        Self::Namespace,
        Self::Class,
        Self::Interface,
        Self::Method,
        Self::Property,
        Self::DependencyInjectionField,
    ];

    /// Message reported for a violation of this rule.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Namespace => "Namespace should start with an uppercase letter.",
            Self::Class => "Class should start with an uppercase letter.",
            Self::Interface => "Interface should start with 'I' followed by an uppercase letter.",
            Self::Method => "Method should start with an uppercase letter.",
            Self::Property => "Property should start with an uppercase letter.",
            Self::DependencyInjectionField => {
                "Dependency injection field should start with '_' followed by a lowercase letter."
            }
        }
    }

    /// Declaration kind this rule applies to.
    #[must_use]
    pub const fn kind(self) -> DeclarationKind {
        match self {
            Self::Namespace => DeclarationKind::Namespace,
            Self::Class => DeclarationKind::Class,
            Self::Interface => DeclarationKind::Interface,
            Self::Method => DeclarationKind::Method,
            Self::Property => DeclarationKind::Property,
            Self::DependencyInjectionField => DeclarationKind::Field,
        }
    }
}

/// Outcome of checking one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The identifier satisfies its rule.
    Ok,
    /// The identifier violates the given rule.
    Violation(NamingRule),
}

impl Verdict {
    /// Returns true for a violation.
    #[must_use]
    pub const fn is_violation(self) -> bool {
        matches!(self, Self::Violation(_))
    }

    /// Violated rule, if any.
    #[must_use]
    pub const fn rule(self) -> Option<NamingRule> {
        match self {
            Self::Ok => None,
            Self::Violation(rule) => Some(rule),
        }
    }
}

/// A violation found on one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingViolation {
    /// Violated rule.
    pub rule: NamingRule,
    /// Offending identifier.
    pub identifier: Identifier,
}

impl NamingViolation {
    /// Message for the violated rule.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.rule.message()
    }

    /// Location of the offending identifier.
    #[must_use]
    pub fn span(&self) -> Span {
        self.identifier.span
    }
}

/// Evaluates every identifier a declaration introduces.
///
/// Field declarations are checked variable by variable, each producing its
/// own violation.
#[must_use]
pub fn evaluate(node: &DeclarationNode) -> Vec<NamingViolation> {
    match node {
        DeclarationNode::Field(field) => field
            .variables
            .iter()
            .filter_map(|variable| {
                check_field_variable(field, &variable.text)
                    .rule()
                    .map(|rule| NamingViolation {
                        rule,
                        identifier: variable.clone(),
                    })
            })
            .collect(),
        DeclarationNode::Namespace(identifier)
        | DeclarationNode::Class(identifier)
        | DeclarationNode::Interface(identifier)
        | DeclarationNode::Method(identifier)
        | DeclarationNode::Property(identifier) => check_identifier(node.kind(), &identifier.text)
            .rule()
            .map(|rule| NamingViolation {
                rule,
                identifier: identifier.clone(),
            })
            .into_iter()
            .collect(),
    }
}

/// Checks a non-field identifier against the rule for `kind`.
///
/// Field names depend on the declaration's modifiers and type, so
/// [`DeclarationKind::Field`] always yields [`Verdict::Ok`] here; use
/// [`check_field_variable`] instead.
#[must_use]
pub fn check_identifier(kind: DeclarationKind, text: &str) -> Verdict {
    match kind {
        DeclarationKind::Namespace => starts_uppercase(text, NamingRule::Namespace),
        DeclarationKind::Class => starts_uppercase(text, NamingRule::Class),
        DeclarationKind::Interface => interface_prefix(text),
        DeclarationKind::Method => starts_uppercase(text, NamingRule::Method),
        DeclarationKind::Property => starts_uppercase(text, NamingRule::Property),
        DeclarationKind::Field => Verdict::Ok,
    }
}

/// Checks one variable bound by `field`.
///
/// Only dependency-injection fields are reported. Other fields pass
/// whatever their case.
#[must_use]
pub fn check_field_variable(field: &FieldDeclaration, text: &str) -> Verdict {
    if text.is_empty() || !is_dependency_injection_field(field) {
        return Verdict::Ok;
    }
    if text.starts_with('_') {
        Verdict::Ok
    } else {
        Verdict::Violation(NamingRule::DependencyInjectionField)
    }
}

/// Returns true for a `private readonly` field whose type name starts with `I`.
#[must_use]
pub fn is_dependency_injection_field(field: &FieldDeclaration) -> bool {
    field.has_modifier(Modifier::Private)
        && field.has_modifier(Modifier::ReadOnly)
        && field
            .declared_type
            .as_deref()
            .is_some_and(|name| name.starts_with('I'))
}

fn starts_uppercase(text: &str, rule: NamingRule) -> Verdict {
    match text.chars().next() {
        Some(first) if !first.is_uppercase() => Verdict::Violation(rule),
        _ => Verdict::Ok,
    }
}

fn interface_prefix(text: &str) -> Verdict {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Verdict::Ok,
        (Some('I'), Some(second)) if second.is_uppercase() => Verdict::Ok,
        _ => Verdict::Violation(NamingRule::Interface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(text: &str, start: usize) -> Identifier {
        Identifier::new(text, Span::new(start, text.len()))
    }

    fn di_field(type_name: &str, names: &[&str]) -> FieldDeclaration {
        FieldDeclaration::new(
            [Modifier::Private, Modifier::ReadOnly],
            Some(type_name.to_string()),
            names
                .iter()
                .enumerate()
                .map(|(i, n)| id(n, 30 + i * 10))
                .collect(),
        )
    }

    #[test]
    fn uppercase_rules_flag_lowercase_start() {
        for kind in [
            DeclarationKind::Namespace,
            DeclarationKind::Class,
            DeclarationKind::Method,
            DeclarationKind::Property,
        ] {
            assert!(check_identifier(kind, "foo").is_violation(), "{kind}");
            assert!(check_identifier(kind, "_foo").is_violation(), "{kind}");
            assert!(check_identifier(kind, "1foo").is_violation(), "{kind}");
            assert!(!check_identifier(kind, "Foo").is_violation(), "{kind}");
            assert!(!check_identifier(kind, "F").is_violation(), "{kind}");
        }
    }

    #[test]
    fn unicode_uppercase_is_accepted() {
        assert_eq!(check_identifier(DeclarationKind::Class, "Élan"), Verdict::Ok);
        assert!(check_identifier(DeclarationKind::Class, "élan").is_violation());
    }

    #[test]
    fn namespace_checks_first_segment_only() {
        assert_eq!(
            check_identifier(DeclarationKind::Namespace, "myApp.core"),
            Verdict::Violation(NamingRule::Namespace)
        );
        assert_eq!(
            check_identifier(DeclarationKind::Namespace, "MyApp.core"),
            Verdict::Ok
        );
    }

    #[test]
    fn interface_requires_prefix_and_uppercase() {
        assert_eq!(check_identifier(DeclarationKind::Interface, "IFoo"), Verdict::Ok);
        for bad in ["Foo", "ifoo", "Ifoo", "foo", "I", "I_foo"] {
            assert_eq!(
                check_identifier(DeclarationKind::Interface, bad),
                Verdict::Violation(NamingRule::Interface),
                "{bad}"
            );
        }
    }

    #[test]
    fn empty_identifier_never_violates() {
        for kind in DeclarationKind::ALL {
            assert_eq!(check_identifier(kind, ""), Verdict::Ok, "{kind}");
        }
        assert_eq!(check_field_variable(&di_field("IFoo", &[]), ""), Verdict::Ok);
    }

    #[test]
    fn dependency_injection_field_requires_underscore() {
        let field = di_field("IWidgetService", &["service"]);
        assert_eq!(
            check_field_variable(&field, "service"),
            Verdict::Violation(NamingRule::DependencyInjectionField)
        );
        assert_eq!(
            check_field_variable(&field, "Service"),
            Verdict::Violation(NamingRule::DependencyInjectionField)
        );
        assert_eq!(check_field_variable(&di_field("IWidget", &[]), "_widget"), Verdict::Ok);
    }

    #[test]
    fn non_interface_type_is_never_dependency_injected() {
        let field = di_field("Widget", &["service", "Service"]);
        assert!(!is_dependency_injection_field(&field));
        assert!(evaluate(&DeclarationNode::Field(field)).is_empty());
    }

    #[test]
    fn dependency_injection_needs_private_and_readonly() {
        let public = FieldDeclaration::new(
            [Modifier::Public, Modifier::ReadOnly],
            Some("IFoo".into()),
            vec![id("foo", 0)],
        );
        let mutable = FieldDeclaration::new([Modifier::Private], Some("IFoo".into()), vec![id("foo", 0)]);
        let untyped = FieldDeclaration::new([Modifier::Private, Modifier::ReadOnly], None, vec![id("foo", 0)]);
        assert!(!is_dependency_injection_field(&public));
        assert!(!is_dependency_injection_field(&mutable));
        assert!(!is_dependency_injection_field(&untyped));
    }

    #[test]
    fn textual_heuristic_accepts_any_i_prefixed_type() {
        // `Image` is not an interface, but the name alone decides.
        assert!(is_dependency_injection_field(&di_field("Image", &["image"])));
    }

    #[test]
    fn non_injected_field_outside_case_rule_is_not_reported() {
        let field = FieldDeclaration::new([Modifier::Private], Some("int".into()), vec![id("Count", 0)]);
        assert!(evaluate(&DeclarationNode::Field(field)).is_empty());
    }

    #[test]
    fn multi_variable_field_reports_each_variable() {
        let field = di_field("IFoo", &["a", "_ok", "b"]);
        let violations = evaluate(&DeclarationNode::Field(field));
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].identifier.text, "a");
        assert_eq!(violations[0].span(), Span::new(30, 1));
        assert_eq!(violations[1].identifier.text, "b");
        assert_eq!(violations[1].span(), Span::new(50, 1));
        assert!(violations
            .iter()
            .all(|v| v.rule == NamingRule::DependencyInjectionField));
    }

    #[test]
    fn evaluate_reports_message_and_span() {
        let violations = evaluate(&DeclarationNode::Class(id("foo", 6)));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message(), "Class should start with an uppercase letter.");
        assert_eq!(violations[0].span(), Span::new(6, 3));

        assert!(evaluate(&DeclarationNode::Method(id("Run", 6))).is_empty());
    }

    #[test]
    fn rules_map_to_kinds() {
        let kinds: Vec<DeclarationKind> = NamingRule::ALL.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, DeclarationKind::ALL.to_vec());
    }

    #[test]
    fn evaluator_is_safe_across_threads() {
        let nodes: Vec<DeclarationNode> = (0..16)
            .map(|i| DeclarationNode::Class(id(if i % 2 == 0 { "foo" } else { "Foo" }, i)))
            .collect();
        let counts: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = nodes
                .iter()
                .map(|node| s.spawn(move || evaluate(node).len()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(counts.iter().sum::<usize>(), 8);
    }
}
