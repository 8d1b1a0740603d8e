//! Evaluator and planner agree over a spread of identifiers.

#![allow(clippy::unwrap_used)]

use hospogate_core::fix::{corrected_identifier, plan_fix};
use hospogate_core::naming::{check_field_variable, check_identifier, evaluate};
use hospogate_core::{
    DeclarationKind, DeclarationNode, FieldDeclaration, Identifier, Modifier, Span, SyntaxNode,
    SyntaxTree, Verdict,
};

const SAMPLES: &[&str] = &[
    "foo", "Foo", "f", "F", "_foo", "1st", "ümlaut", "Ümlaut", "ifoo", "Ifoo", "IFoo", "I",
    "i", "item", "myApp.core", "MyApp.core", "x_y", "ΩMega",
];

/// Samples whose first character has an uppercase form.
fn fixable() -> impl Iterator<Item = &'static str> {
    SAMPLES
        .iter()
        .copied()
        .filter(|text| text.chars().next().is_some_and(|c| c.is_uppercase() || c.is_lowercase()))
}

fn node(kind: DeclarationKind, text: &str) -> DeclarationNode {
    let id = Identifier::new(text, Span::new(4, text.len()));
    match kind {
        DeclarationKind::Namespace => DeclarationNode::Namespace(id),
        DeclarationKind::Class => DeclarationNode::Class(id),
        DeclarationKind::Interface => DeclarationNode::Interface(id),
        DeclarationKind::Method => DeclarationNode::Method(id),
        DeclarationKind::Property => DeclarationNode::Property(id),
        DeclarationKind::Field => DeclarationNode::Field(FieldDeclaration::new(
            [Modifier::Private, Modifier::ReadOnly],
            Some("IService".into()),
            vec![id],
        )),
    }
}

fn tree_of(declaration: DeclarationNode) -> SyntaxTree {
    SyntaxTree::new(
        SyntaxNode::new(Span::new(0, 64))
            .with_child(SyntaxNode::with_declaration(Span::new(0, 60), declaration)),
    )
}

#[test]
fn uppercase_rules_flag_iff_first_char_not_uppercase() {
    assert_eq!(fixable().count(), SAMPLES.len() - 2);
    for kind in [
        DeclarationKind::Namespace,
        DeclarationKind::Class,
        DeclarationKind::Method,
        DeclarationKind::Property,
    ] {
        for text in SAMPLES {
            let expected = !text.chars().next().unwrap().is_uppercase();
            assert_eq!(
                check_identifier(kind, text).is_violation(),
                expected,
                "{kind} {text}"
            );
        }
    }
}

#[test]
fn interface_rule_needs_i_then_uppercase() {
    for text in SAMPLES {
        let mut chars = text.chars();
        let ok = chars.next() == Some('I') && chars.next().is_some_and(char::is_uppercase);
        assert_eq!(
            check_identifier(DeclarationKind::Interface, text).is_violation(),
            !ok,
            "{text}"
        );
    }
}

#[test]
fn corrections_never_reflag() {
    for kind in DeclarationKind::ALL {
        for text in fixable() {
            let declaration = node(kind, text);
            if evaluate(&declaration).is_empty() {
                continue;
            }
            let corrected = corrected_identifier(kind, text);
            let clean = match kind {
                DeclarationKind::Field => {
                    let DeclarationNode::Field(field) = &declaration else {
                        unreachable!()
                    };
                    check_field_variable(field, &corrected) == Verdict::Ok
                }
                _ => check_identifier(kind, &corrected) == Verdict::Ok,
            };
            assert!(clean, "{kind} {text} -> {corrected}");
        }
    }
}

#[test]
fn planned_fix_produces_clean_tree() {
    for kind in DeclarationKind::ALL {
        for text in fixable() {
            let tree = tree_of(node(kind, text));
            let before: Vec<_> = tree.declarations().flat_map(|(_, d)| evaluate(d)).collect();
            for violation in &before {
                let fixed = plan_fix(&tree, violation.span()).unwrap().apply(&tree).unwrap();
                let after: Vec<_> = fixed.declarations().flat_map(|(_, d)| evaluate(d)).collect();
                assert!(after.is_empty(), "{kind} {text}: {after:?}");
            }
        }
    }
}

#[test]
fn only_dependency_injection_fields_are_checked() {
    let cases = [
        (vec![Modifier::Private, Modifier::ReadOnly], Some("IWidget"), true),
        (vec![Modifier::Private, Modifier::ReadOnly], Some("Widget"), false),
        (vec![Modifier::Private, Modifier::ReadOnly], None, false),
        (vec![Modifier::Private], Some("IWidget"), false),
        (vec![Modifier::ReadOnly], Some("IWidget"), false),
        (vec![Modifier::Public, Modifier::ReadOnly], Some("IWidget"), false),
        (vec![Modifier::Private, Modifier::ReadOnly, Modifier::Static], Some("IWidget"), true),
    ];
    for (modifiers, ty, flagged) in cases {
        let field = FieldDeclaration::new(
            modifiers.clone(),
            ty.map(String::from),
            vec![Identifier::new("service", Span::new(0, 7))],
        );
        assert_eq!(
            !evaluate(&DeclarationNode::Field(field)).is_empty(),
            flagged,
            "{modifiers:?} {ty:?}"
        );
    }
}
