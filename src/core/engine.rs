use crate::builders::guard::GuardTransform;
use crate::builders::include::IncludeTransform;
use crate::builders::index::IncludeIndex;
use crate::builders::reporter::FileReport;
use crate::builders::transforms::{LineTransform, Replacement};
use crate::core::config::ResolvedConfig;
use crate::core::source_file::SourceFile;
use anyhow::{Context, Result};
use once_cell::unsync::OnceCell;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Drives a single-file rewrite. Loads the source model, then streams the
/// content lines through the transformer chain into a fresh write of the same
/// path, with the original bytes copied aside first.
pub struct NormalizeEngine {
    config: ResolvedConfig,
    index: OnceCell<IncludeIndex>,
}

impl NormalizeEngine {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            index: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// The include index is built on first use and shared across every file in
    /// the run.
    pub fn include_index(&self) -> Result<&IncludeIndex> {
        self.index
            .get_or_try_init(|| IncludeIndex::scan(self.config.header_root()))
    }

    /// Rewrites one file in place.
    ///
    /// The preamble passes through verbatim. For each content line the first
    /// transformer to produce a replacement wins; untouched lines are written
    /// back unchanged. Output is always LF-terminated. The original bytes are
    /// copied to `<name>.backup` beside the file before it is reopened for
    /// writing.
    pub fn normalize_file(&self, path: &Path) -> Result<FileReport> {
        let src = SourceFile::load(path, &self.config)?;
        let index = self.include_index()?;

        let mut transforms: Vec<Box<dyn LineTransform + '_>> = vec![
            Box::new(GuardTransform::new(&src, self.config.guard_prefix())),
            Box::new(IncludeTransform::new(&src, index)?),
        ];

        create_backup(&src)?;

        let file = fs::File::create(src.path())
            .with_context(|| format!("failed to open {} for writing", src.path().display()))?;
        let mut writer = BufWriter::new(file);

        for line in src.preamble() {
            writeln!(writer, "{line}")
                .with_context(|| format!("failed to write {}", src.path().display()))?;
        }

        let mut report = FileReport::new(src.path(), src.is_blank());
        for no in 0..src.content_len() {
            let line = src.content_line(no);
            let mut replaced = None;
            for transform in &mut transforms {
                if let Some(new) = transform.convert_line(line, no) {
                    replaced = Some(new);
                    break;
                }
            }
            let emitted = match replaced {
                Some(new) => {
                    report.replacements.push(Replacement {
                        line: no,
                        old: line.to_string(),
                        new: new.clone(),
                    });
                    new
                }
                None => line.to_string(),
            };
            writeln!(writer, "{emitted}")
                .with_context(|| format!("failed to write {}", src.path().display()))?;
        }

        writer
            .flush()
            .with_context(|| format!("failed to write {}", src.path().display()))?;

        for transform in &mut transforms {
            report.issues.extend(transform.take_issues());
        }
        report.issues.sort_by_key(|issue| issue.line);

        Ok(report)
    }
}

fn create_backup(src: &SourceFile) -> Result<()> {
    let mut backup = src.path().as_os_str().to_os_string();
    backup.push(".backup");
    fs::copy(src.path(), &backup)
        .with_context(|| format!("failed to back up {}", src.path().display()))?;
    Ok(())
}
