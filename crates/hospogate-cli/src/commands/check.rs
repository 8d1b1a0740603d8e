//! Check command implementation.

use anyhow::{Context, Result};
use hospogate_core::Severity;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when a violation reached the failure threshold.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    deny_warnings: bool,
    source: &ConfigSource,
) -> Result<bool> {
    let config = source.load()?;
    let threshold = if deny_warnings {
        Severity::Warning
    } else {
        config.fail_threshold()
    };

    let analyzer = super::build_analyzer(path, config, exclude)?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    Ok(result.has_violations_at(threshold))
}
