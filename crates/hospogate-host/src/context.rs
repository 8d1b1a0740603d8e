//! Per-file context handed to rules.

use std::path::{Path, PathBuf};

use hospogate_core::{Location, Span};

/// File name suffixes used by code generators.
const GENERATED_SUFFIXES: &[&str] = &[".g.cs", ".g.i.cs", ".designer.cs", ".generated.cs"];

/// Number of leading lines searched for an `<auto-generated` marker.
const GENERATED_HEADER_LINES: usize = 10;

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Whether this file was produced by a code generator.
    pub is_generated: bool,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let is_generated = Self::detect_generated_file(path, content);
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            is_generated,
            relative_path,
        }
    }

    /// Detects generated code by file name or header comment.
    fn detect_generated_file(path: &Path, content: &str) -> bool {
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            let file_name = file_name.to_ascii_lowercase();
            if GENERATED_SUFFIXES
                .iter()
                .any(|suffix| file_name.ends_with(suffix))
            {
                return true;
            }
        }

        content
            .lines()
            .take(GENERATED_HEADER_LINES)
            .any(|line| line.contains("<auto-generated"))
    }

    /// Converts a byte offset into a 1-indexed line and character column.
    ///
    /// Offsets past the end clamp to the end of the file. Offsets inside a
    /// multi-byte character resolve to that character.
    #[must_use]
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let mut offset = offset.min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }

        let before = &self.content[..offset];
        let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Location of `span` in this file, reported against the relative path.
    #[must_use]
    pub fn location_for(&self, span: Span) -> Location {
        let (line, column) = self.line_column(span.start);
        Location::new(self.relative_path.clone(), line, column).with_span(span)
    }
}
