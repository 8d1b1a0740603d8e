//! Fix command implementation.

use anyhow::{Context, Result};
use hospogate_host::{Analyzer, AnalyzerError};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;

/// Renames applied to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFile {
    /// Path relative to the analyzed root.
    pub path: PathBuf,
    /// Number of renames.
    pub applied: usize,
}

/// Runs the fix command.
pub fn run(path: &Path, dry_run: bool, exclude: Vec<String>, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let analyzer = super::build_analyzer(path, config, exclude)?;

    let fixed = fix_files(&analyzer, dry_run)?;
    let total: usize = fixed.iter().map(|f| f.applied).sum();
    let verb = if dry_run { "Would fix" } else { "Fixed" };

    for file in &fixed {
        println!("{verb} {} identifier(s) in {}", file.applied, file.path.display());
    }
    println!("{verb} {total} identifier(s) in {} file(s)", fixed.len());

    Ok(())
}

/// Fixes every discovered file, writing results unless `dry_run` is set.
///
/// Files that fail to parse are skipped with a warning.
pub fn fix_files(analyzer: &Analyzer, dry_run: bool) -> Result<Vec<FixedFile>> {
    let mut fixed = Vec::new();

    for file_path in analyzer.discover_files()? {
        let content = std::fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        let fix = match analyzer.fix_source(&file_path, &content) {
            Ok(fix) => fix,
            Err(AnalyzerError::Parse { path, message }) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), message);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if fix.applied == 0 {
            continue;
        }

        if !dry_run {
            std::fs::write(&file_path, &fix.content)
                .with_context(|| format!("Failed to write {}", file_path.display()))?;
        }

        let relative = file_path
            .strip_prefix(analyzer.root())
            .map_or_else(|_| file_path.clone(), Path::to_path_buf);
        fixed.push(FixedFile {
            path: relative,
            applied: fix.applied,
        });
    }

    Ok(fixed)
}
