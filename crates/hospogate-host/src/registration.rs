//! Analyzer registration: one node action per declaration kind.
//!
//! [`NamingAnalyzer::initialize`] registers its six actions on any
//! [`AnalysisContext`]. [`NodeActionTable`] is the in-process context used by
//! the driver: it records the registrations and dispatches every declaration
//! of a tree to the actions registered for its kind.

use std::collections::BTreeMap;

use hospogate_core::{naming, DeclarationKind, DeclarationNode, SyntaxTree};

use crate::diagnostic::{Diagnostic, DiagnosticDescriptor, NAMING_DESCRIPTOR};
use crate::host::DiagnosticSink;

/// Callback invoked for every declaration of the kind it was registered for.
pub type NodeAction = fn(&DeclarationNode, &mut dyn DiagnosticSink);

/// Registration surface offered by a host to analyzers.
pub trait AnalysisContext {
    /// Sets whether generated code is analyzed.
    fn configure_generated_code_analysis(&mut self, analyze: bool);

    /// Registers `action` for declarations of `kind`.
    fn register_node_action(&mut self, kind: DeclarationKind, action: NodeAction);
}

/// The naming-convention analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingAnalyzer {
    analyze_generated_code: bool,
}

impl NamingAnalyzer {
    /// Creates an analyzer that skips generated code.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether generated code is analyzed.
    #[must_use]
    pub fn configure_generated_code(mut self, analyze: bool) -> Self {
        self.analyze_generated_code = analyze;
        self
    }

    /// Diagnostics this analyzer can report.
    #[must_use]
    pub fn supported_diagnostics(&self) -> &'static [DiagnosticDescriptor] {
        std::slice::from_ref(&NAMING_DESCRIPTOR)
    }

    /// Registers the analyzer's actions on `ctx`.
    pub fn initialize(&self, ctx: &mut impl AnalysisContext) {
        ctx.configure_generated_code_analysis(self.analyze_generated_code);

        ctx.register_node_action(DeclarationKind::Namespace, analyze_namespace);
        ctx.register_node_action(DeclarationKind::Class, analyze_class);
        ctx.register_node_action(DeclarationKind::Interface, analyze_interface);
        ctx.register_node_action(DeclarationKind::Method, analyze_method);
        ctx.register_node_action(DeclarationKind::Property, analyze_property);
        ctx.register_node_action(DeclarationKind::Field, analyze_field);
    }
}

fn report_violations(node: &DeclarationNode, sink: &mut dyn DiagnosticSink) {
    for violation in naming::evaluate(node) {
        sink.report(Diagnostic::from(&violation));
    }
}

/// Checks a namespace declaration.
pub fn analyze_namespace(node: &DeclarationNode, sink: &mut dyn DiagnosticSink) {
    if let DeclarationNode::Namespace(_) = node {
        report_violations(node, sink);
    }
}

/// Checks a class declaration.
pub fn analyze_class(node: &DeclarationNode, sink: &mut dyn DiagnosticSink) {
    if let DeclarationNode::Class(_) = node {
        report_violations(node, sink);
    }
}

/// Checks an interface declaration.
pub fn analyze_interface(node: &DeclarationNode, sink: &mut dyn DiagnosticSink) {
    if let DeclarationNode::Interface(_) = node {
        report_violations(node, sink);
    }
}

/// Checks a method declaration.
pub fn analyze_method(node: &DeclarationNode, sink: &mut dyn DiagnosticSink) {
    if let DeclarationNode::Method(_) = node {
        report_violations(node, sink);
    }
}

/// Checks a property declaration.
pub fn analyze_property(node: &DeclarationNode, sink: &mut dyn DiagnosticSink) {
    if let DeclarationNode::Property(_) = node {
        report_violations(node, sink);
    }
}

/// Checks every variable of a field declaration.
pub fn analyze_field(node: &DeclarationNode, sink: &mut dyn DiagnosticSink) {
    if let DeclarationNode::Field(_) = node {
        report_violations(node, sink);
    }
}

/// In-process [`AnalysisContext`] that runs registered actions over a tree.
#[derive(Debug, Default)]
pub struct NodeActionTable {
    actions: BTreeMap<DeclarationKind, Vec<NodeAction>>,
    analyze_generated_code: bool,
}

impl NodeActionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with `analyzer` already initialized on it.
    #[must_use]
    pub fn for_analyzer(analyzer: &NamingAnalyzer) -> Self {
        let mut table = Self::new();
        analyzer.initialize(&mut table);
        table
    }

    /// Kinds with at least one registered action.
    pub fn registered_kinds(&self) -> impl Iterator<Item = DeclarationKind> + '_ {
        self.actions.keys().copied()
    }

    /// Total number of registered actions.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions.values().map(Vec::len).sum()
    }

    /// Whether generated code is analyzed.
    #[must_use]
    pub fn analyzes_generated_code(&self) -> bool {
        self.analyze_generated_code
    }

    /// Runs every registered action over the declarations of `tree`.
    ///
    /// Does nothing for generated code unless it was enabled.
    pub fn run(&self, tree: &SyntaxTree, is_generated: bool, sink: &mut dyn DiagnosticSink) {
        if is_generated && !self.analyze_generated_code {
            return;
        }

        for (_, declaration) in tree.declarations() {
            if let Some(actions) = self.actions.get(&declaration.kind()) {
                for action in actions {
                    action(declaration, sink);
                }
            }
        }
    }
}

impl AnalysisContext for NodeActionTable {
    fn configure_generated_code_analysis(&mut self, analyze: bool) {
        self.analyze_generated_code = analyze;
    }

    fn register_node_action(&mut self, kind: DeclarationKind, action: NodeAction) {
        self.actions.entry(kind).or_default().push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospogate_core::{FieldDeclaration, Identifier, Modifier, Span, SyntaxNode};

    fn id(text: &str, start: usize) -> Identifier {
        Identifier::new(text, Span::new(start, text.len()))
    }

    fn tree() -> SyntaxTree {
        let field = SyntaxNode::with_declaration(
            Span::new(40, 30),
            DeclarationNode::Field(FieldDeclaration::new(
                [Modifier::Private, Modifier::ReadOnly],
                Some("IFoo".into()),
                vec![id("a", 62), id("b", 65)],
            )),
        );
        let class = SyntaxNode::with_declaration(
            Span::new(20, 60),
            DeclarationNode::Class(id("service", 26)),
        )
        .with_child(field);
        let namespace = SyntaxNode::with_declaration(
            Span::new(0, 90),
            DeclarationNode::Namespace(id("myApp", 10)),
        )
        .with_child(class);
        SyntaxTree::new(SyntaxNode::new(Span::new(0, 90)).with_child(namespace))
    }

    #[test]
    fn initialize_registers_six_actions() {
        let table = NodeActionTable::for_analyzer(&NamingAnalyzer::new());
        assert_eq!(table.action_count(), 6);
        assert_eq!(
            table.registered_kinds().collect::<Vec<_>>(),
            DeclarationKind::ALL.to_vec()
        );
        assert!(!table.analyzes_generated_code());
    }

    #[test]
    fn supports_single_descriptor() {
        let analyzer = NamingAnalyzer::new();
        let ids: Vec<&str> = analyzer.supported_diagnostics().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["HospogateAnalyzer"]);
    }

    #[test]
    fn run_reports_each_violation() {
        let table = NodeActionTable::for_analyzer(&NamingAnalyzer::new());
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        table.run(&tree(), false, &mut diagnostics);

        let spans: Vec<Span> = diagnostics.iter().map(|d| d.span).collect();
        assert_eq!(
            spans,
            vec![Span::new(10, 5), Span::new(26, 7), Span::new(62, 1), Span::new(65, 1)]
        );
        assert_eq!(
            diagnostics[0].message,
            "Namespace should start with an uppercase letter."
        );
        assert_eq!(
            diagnostics[3].message,
            "Dependency injection field should start with '_' followed by a lowercase letter."
        );
    }

    #[test]
    fn generated_code_is_skipped_by_default() {
        let table = NodeActionTable::for_analyzer(&NamingAnalyzer::new());
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        table.run(&tree(), true, &mut diagnostics);
        assert!(diagnostics.is_empty());

        let table =
            NodeActionTable::for_analyzer(&NamingAnalyzer::new().configure_generated_code(true));
        table.run(&tree(), true, &mut diagnostics);
        assert_eq!(diagnostics.len(), 4);
    }

    #[test]
    fn actions_ignore_other_kinds() {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        analyze_method(&DeclarationNode::Class(id("foo", 0)), &mut diagnostics);
        analyze_field(&DeclarationNode::Class(id("foo", 0)), &mut diagnostics);
        assert!(diagnostics.is_empty());

        analyze_class(&DeclarationNode::Class(id("foo", 0)), &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn partial_registration_only_runs_registered_kinds() {
        let mut table = NodeActionTable::new();
        table.register_node_action(DeclarationKind::Class, analyze_class);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        table.run(&tree(), false, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span, Span::new(26, 7));
    }
}
