use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

use crate::builders::index::IncludeIndex;
use crate::builders::transforms::{Issue, LineTransform};
use crate::core::source_file::SourceFile;

/// Single-line `#include "x"` / `#include <x>` directives, nothing else.
/// Multi-line and macro-built includes are deliberately not recognized.
const INCLUDE_PATTERN: &str = r#"^\s*#include\s+["<]([^">]+)[">]\s*$"#;

/// Rewrites `#include` directives to their canonical spelling.
///
/// The target's base name is resolved through the shared [`IncludeIndex`].
/// Exactly one candidate under the header root is required; a missing or
/// ambiguous base name is recorded as an issue and the line stays unchanged.
/// The resolved candidate is spelled relative to the header root in angle
/// brackets, except that a header including a file from its own directory
/// subtree keeps the short quoted form.
pub struct IncludeTransform<'a> {
    src: &'a SourceFile,
    index: &'a IncludeIndex,
    directive: Regex,
    issues: Vec<Issue>,
}

impl<'a> IncludeTransform<'a> {
    pub fn new(src: &'a SourceFile, index: &'a IncludeIndex) -> Result<Self> {
        let directive = Regex::new(INCLUDE_PATTERN).context("invalid include pattern")?;
        Ok(Self {
            src,
            index,
            directive,
            issues: Vec::new(),
        })
    }

    fn record(&mut self, line: usize, message: String) {
        self.issues.push(Issue::new(line, message));
    }
}

impl LineTransform for IncludeTransform<'_> {
    fn convert_line(&mut self, line: &str, index: usize) -> Option<String> {
        let captures = self.directive.captures(line.trim())?;
        let target = captures.get(1)?.as_str();
        let base = Path::new(target)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| target.to_string());

        let candidate = match self.index.lookup(&base) {
            Some([single]) => single,
            Some([]) | None => {
                self.record(index, format!("file {base} not found in include tree"));
                return None;
            }
            Some(_) => {
                self.record(index, format!("file {base} has multiple candidate resolutions"));
                return None;
            }
        };

        // Headers keep a short quoted include when the sole candidate lives in
        // their own directory subtree; everything else is rooted at the header
        // root and spelled with angle brackets.
        let replacement = if self.src.is_header()
            && let Ok(rel) = candidate.strip_prefix(self.src.relative_dir())
        {
            format!("#include \"{}\"", include_path(rel))
        } else {
            format!("#include <{}>", include_path(candidate))
        };

        if replacement == line {
            None
        } else {
            Some(replacement)
        }
    }

    fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }
}

/// Include directives always use forward slashes, whatever the platform.
fn include_path(path: &Path) -> String {
    path.iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
