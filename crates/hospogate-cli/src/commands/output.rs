//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use hospogate_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::{GraphicalReportHandler, NamedSource, Report};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// Violation paths are relative to `root`.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => return print_pretty(result, root),
    }
    Ok(())
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",
        Severity::Warning => "\x1b[33m",
        Severity::Info => "\x1b[34m",
    }
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let color = severity_color(violation.severity);
        let mut lines = violation.format();
        let severity = violation.severity.to_string();
        lines = lines.replacen(
            &format!("  {severity}:"),
            &format!("  {color}{severity}\x1b[0m:"),
            1,
        );
        println!("{lines}");
    }

    println!("{}", summary(result));
}

/// One-line summary, colored by the most severe violation.
fn summary(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        severity_color(Severity::Error)
    } else if warnings > 0 {
        severity_color(Severity::Warning)
    } else {
        "\x1b[32m"
    };

    let fixable = result.fixable_count();
    let hint = if fixable > 0 {
        format!(" ({fixable} fixable with `hospogate fix`)")
    } else {
        String::new()
    };

    format!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s){hint}\x1b[0m",
        result.files_checked
    )
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, root: &Path) -> Result<()> {
    let handler = GraphicalReportHandler::new();
    for violation in &result.violations {
        let path = root.join(&violation.location.file);
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        println!("{}", render(&handler, violation, source)?);
    }
    println!("{}", summary(result));
    Ok(())
}

/// Renders one violation against the file it was found in.
fn render(handler: &GraphicalReportHandler, violation: &Violation, source: String) -> Result<String> {
    let name = violation.location.file.display().to_string();
    let report =
        Report::new(ViolationDiagnostic::from(violation)).with_source_code(NamedSource::new(name, source));
    let mut out = String::new();
    handler
        .render_report(&mut out, &*report)
        .context("Failed to render diagnostic")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospogate_core::{Location, Replacement, Suggestion, Violation};
    use std::path::PathBuf;

    fn violation(severity: Severity) -> Violation {
        let location = Location::new(PathBuf::from("src/A.cs"), 1, 7);
        Violation::new(
            "HospogateAnalyzer",
            "naming-conventions",
            severity,
            location.clone(),
            "Class should start with an uppercase letter.",
        )
        .with_suggestion(Suggestion::with_fix(
            "Fix class naming",
            Replacement::new(location, "Foo"),
        ))
    }

    #[test]
    fn summary_counts_and_fixable_hint() {
        let mut result = LintResult::new();
        result.files_checked = 3;
        result.violations.push(violation(Severity::Warning));
        assert_eq!(
            summary(&result),
            "\x1b[33mFound 0 error(s), 1 warning(s), 0 info(s) in 3 file(s) (1 fixable with `hospogate fix`)\x1b[0m"
        );
    }

    #[test]
    fn clean_summary_is_green() {
        let result = LintResult::new();
        assert!(summary(&result).starts_with("\x1b[32mFound 0 error(s)"));
    }

    #[test]
    fn pretty_output_underlines_the_identifier() {
        let mut v = violation(Severity::Warning);
        v.location = v.location.clone().with_span(hospogate_core::Span::new(6, 3));
        let handler = GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
        let out = render(&handler, &v, "class foo {}\n".to_string()).unwrap();
        assert!(out.contains("[HospogateAnalyzer] Class should start with an uppercase letter."));
        assert!(out.contains("src/A.cs"));
        assert!(out.contains("class foo {}"));
        assert!(out.contains("naming-conventions"));
        assert!(out.contains("Fix class naming"));
    }

    #[test]
    fn json_output_serializes_violations() {
        let mut result = LintResult::new();
        result.violations.push(violation(Severity::Error));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["violations"][0]["severity"], "error");
        assert_eq!(json["violations"][0]["code"], "HospogateAnalyzer");
        assert_eq!(
            json["violations"][0]["suggestion"]["replacement"]["new_text"],
            "Foo"
        );
    }
}
