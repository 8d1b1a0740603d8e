//! Subcommand implementations.

pub mod check;
pub mod fix;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use hospogate_cs::CSharpFrontend;
use hospogate_host::{Analyzer, Config, NamingAnalyzer, NamingConventions};
use std::path::Path;

/// Builds the C# analyzer with the naming rule for `path`.
pub fn build_analyzer(path: &Path, config: Config, exclude: Vec<String>) -> Result<Analyzer> {
    let naming = NamingAnalyzer::new()
        .configure_generated_code(config.analyzer.analyze_generated_code);

    Analyzer::builder()
        .root(path)
        .frontend(CSharpFrontend::new())
        .rule(NamingConventions::with_analyzer(naming))
        .excludes(exclude)
        .config(config)
        .build()
        .context("Failed to build analyzer")
}
