use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Base-name lookup over every header under the header root.
///
/// Built once per run and read-only afterwards, so the same snapshot serves
/// every file in the batch. Keys are file base names (`util.h`), values the
/// sorted root-relative paths bearing that name; more than one path means the
/// name is ambiguous and the include transformer will refuse to resolve it.
#[derive(Debug)]
pub struct IncludeIndex {
    by_name: HashMap<String, Vec<PathBuf>>,
}

impl IncludeIndex {
    /// Walks `header_root` and indexes every dotted file name.
    ///
    /// Names without a `.` are skipped, which keeps extensionless system-style
    /// names (`algorithm`, `vector`) out of the index: an include of one of
    /// those reports "not found" and passes through unchanged.
    pub fn scan(header_root: &Path) -> Result<Self> {
        let mut by_name: HashMap<String, Vec<PathBuf>> = HashMap::new();

        for entry in WalkDir::new(header_root) {
            let entry =
                entry.with_context(|| format!("failed to scan {}", header_root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            // A name that is not UTF-8 can never appear in an include line.
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !name.contains('.') {
                continue;
            }
            let relative = entry.path().strip_prefix(header_root)?.to_path_buf();
            by_name.entry(name.to_string()).or_default().push(relative);
        }

        for candidates in by_name.values_mut() {
            candidates.sort();
        }

        Ok(Self { by_name })
    }

    /// The candidate paths recorded for a base name, if any.
    pub fn lookup(&self, base: &str) -> Option<&[PathBuf]> {
        self.by_name.get(base).map(Vec::as_slice)
    }

    /// Number of distinct base names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All entries sorted by base name, for listing and inspection.
    pub fn entries(&self) -> Vec<(&str, &[PathBuf])> {
        let mut entries: Vec<_> = self
            .by_name
            .iter()
            .map(|(name, candidates)| (name.as_str(), candidates.as_slice()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
