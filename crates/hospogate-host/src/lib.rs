//! # hospogate-host
//!
//! Connects the naming evaluator and fix planner to an analysis host.
//!
//! - [`NamingAnalyzer`] registers one node action per declaration kind on an
//!   [`AnalysisContext`]
//! - [`NamingCodeFixProvider`] offers a rename for each naming diagnostic
//! - [`Analyzer`] walks a directory, parses files with a [`Frontend`] and runs
//!   [`Rule`]s such as [`NamingConventions`]
//! - [`Config`] reads `hospogate.toml`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod code_fix;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod frontend;
pub mod host;
pub mod naming_conventions;
pub mod registration;
pub mod rule;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, FileFix};
pub use code_fix::NamingCodeFixProvider;
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use diagnostic::{Diagnostic, DiagnosticDescriptor, NAMING_DESCRIPTOR};
pub use frontend::{Frontend, FrontendBox, FrontendError};
pub use host::{
    ApplyFix, CancellationToken, DiagnosticSink, Document, FixRegistry, HostError, RegisteredFix,
    RegisteredFixes,
};
pub use naming_conventions::NamingConventions;
pub use registration::{AnalysisContext, NamingAnalyzer, NodeAction, NodeActionTable};
pub use rule::{Rule, RuleBox};
