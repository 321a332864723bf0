use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::ResolvedConfig;

/// Which configured root a file lives under.
///
/// Every managed file belongs to exactly one of the two roots; anything else
/// is outside the tree this tool is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Header,
    Implementation,
}

/// One loaded source file, split into a preamble and a content region.
///
/// The preamble is the leading license/comment block and is never rewritten.
/// Content lines are addressed by a 0-based index that the transformers key
/// their state machines on. Trailing blank lines are trimmed off the end of
/// the file at load time, so the last content line is the last substantive
/// line the file will keep.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    relative: PathBuf,
    root_kind: RootKind,
    namespace: Vec<String>,
    lines: Vec<String>,
    preamble_len: usize,
    content_len: usize,
}

impl SourceFile {
    /// Loads `path` and classifies it under one of the configured roots.
    ///
    /// Fails when the file cannot be read or sits outside both roots; the
    /// latter is fatal for the file because no canonical form can be derived
    /// for it.
    pub fn load(path: &Path, config: &ResolvedConfig) -> Result<Self> {
        let path = fs::canonicalize(path)
            .with_context(|| format!("failed to resolve {}", path.display()))?;

        let (root_kind, relative) = if let Ok(rel) = path.strip_prefix(config.header_root()) {
            (RootKind::Header, rel.to_path_buf())
        } else if let Ok(rel) = path.strip_prefix(config.source_root()) {
            (RootKind::Implementation, rel.to_path_buf())
        } else {
            bail!(
                "file {} is outside the header root {} and the source root {}",
                path.display(),
                config.header_root().display(),
                config.source_root().display()
            );
        };

        let namespace = relative
            .parent()
            .map(|dir| {
                dir.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();

        let preamble_len = scan_preamble(&lines);
        // Trim trailing blank lines, but never into the preamble.
        while lines.len() > preamble_len && lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let content_len = lines.len() - preamble_len;

        Ok(Self {
            path,
            relative,
            root_kind,
            namespace,
            lines,
            preamble_len,
            content_len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the root that claimed the file.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Directory part of the relative path; empty for files sitting in the root.
    pub fn relative_dir(&self) -> &Path {
        self.relative.parent().unwrap_or(Path::new(""))
    }

    pub fn root_kind(&self) -> RootKind {
        self.root_kind
    }

    pub fn is_header(&self) -> bool {
        self.root_kind == RootKind::Header
    }

    /// Directory segments between the root and the file, used for guard names.
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    pub fn file_name(&self) -> String {
        self.relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn preamble(&self) -> &[String] {
        &self.lines[..self.preamble_len]
    }

    pub fn preamble_len(&self) -> usize {
        self.preamble_len
    }

    pub fn content_len(&self) -> usize {
        self.content_len
    }

    /// A blank file has nothing after its preamble and gets no transformer output.
    pub fn is_blank(&self) -> bool {
        self.content_len == 0
    }

    /// The content line at the given 0-based content index.
    pub fn content_line(&self, index: usize) -> &str {
        &self.lines[self.preamble_len + index]
    }
}

/// Returns the number of leading lines that form the license/comment preamble.
///
/// The scan walks from the top: blank lines and `//` lines are preamble, a
/// line starting `/*` opens a block comment (the opening line is not itself
/// scanned for the close token), and lines inside a block comment are consumed
/// until one contains `*/`. The first substantive line ends the scan. A file
/// that never reaches a substantive line is entirely preamble.
fn scan_preamble(lines: &[String]) -> usize {
    let mut in_block = false;
    for (index, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if in_block {
            if line.contains("*/") {
                in_block = false;
            }
        } else if line.starts_with("/*") {
            in_block = true;
        } else if line.starts_with("//") || line.is_empty() {
            // comment or blank, keep scanning
        } else {
            return index;
        }
    }
    lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn preamble_ends_at_first_substantive_line() {
        let data = lines(&["/*", " * license", " */", "", "// note", "#ifndef X", "code"]);
        assert_eq!(scan_preamble(&data), 5);
    }

    #[test]
    fn file_without_preamble_starts_at_zero() {
        let data = lines(&["#ifndef X", "#define X", "#endif"]);
        assert_eq!(scan_preamble(&data), 0);
    }

    #[test]
    fn all_comment_file_is_entirely_preamble() {
        let data = lines(&["// a", "", "// b"]);
        assert_eq!(scan_preamble(&data), data.len());
    }

    #[test]
    fn block_comment_open_line_is_not_scanned_for_close() {
        // A one-line `/* ... */` still opens the block, so everything after it
        // is consumed until a later line carries the close token.
        let data = lines(&["/* short */", "int x;", "*/ tail", "int y;"]);
        assert_eq!(scan_preamble(&data), 3);
    }

    #[test]
    fn close_token_line_stays_in_preamble() {
        let data = lines(&["/*", "body */", "real();"]);
        assert_eq!(scan_preamble(&data), 2);
    }

    #[test]
    fn empty_input_is_empty_preamble() {
        assert_eq!(scan_preamble(&[]), 0);
    }
}
