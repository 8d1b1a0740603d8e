//! # hospogate-core
//!
//! Naming-convention evaluation and single-node fix planning over an
//! immutable declaration tree.
//!
//! This crate is pure: it performs no I/O and keeps no state between calls.
//! It provides:
//!
//! - [`SyntaxTree`] / [`SyntaxNode`] / [`DeclarationNode`] for the tree model
//! - [`naming`] for the rule evaluator
//! - [`fix`] for the fix planner
//! - [`Violation`] / [`LintResult`] for reporting
//!
//! Parsing source text into a [`SyntaxTree`] and registering with an analysis
//! host live in other crates.
//!
//! ## Example
//!
//! ```ignore
//! use hospogate_core::{fix, naming, SyntaxTree};
//!
//! for (_, declaration) in tree.declarations() {
//!     for violation in naming::evaluate(declaration) {
//!         if let Some(code_fix) = fix::plan_fix(&tree, violation.span()) {
//!             let fixed = code_fix.apply(&tree)?;
//!         }
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod edit;
pub mod fix;
pub mod naming;
mod syntax;
mod types;

pub use edit::{apply_text_edits, TextEdit};
pub use fix::{CodeFix, FixEdit, FixError};
pub use naming::{NamingRule, NamingViolation, Verdict, CATEGORY, DIAGNOSTIC_ID};
pub use syntax::{
    DeclarationKind, DeclarationNode, Descendants, FieldDeclaration, Identifier, Modifier, Span,
    SyntaxNode, SyntaxTree,
};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
