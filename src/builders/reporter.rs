use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::builders::transforms::{Issue, Replacement};

/// Everything the engine observed while rewriting a single file.
///
/// This provides a clean way to pass per-file results from the
/// `NormalizeEngine` to the `RunReporter` and into the structured report.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Canonicalized path of the processed file, matching the path fatal
    /// errors are reported under.
    pub path: PathBuf,
    /// True when the file had no content lines after preamble trimming.
    pub blank: bool,
    /// Recoverable findings, ordered by content-line index.
    pub issues: Vec<Issue>,
    /// Lines that were actually rewritten.
    pub replacements: Vec<Replacement>,
}

impl FileReport {
    pub fn new(path: &Path, blank: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            blank,
            issues: Vec::new(),
            replacements: Vec::new(),
        }
    }

    /// True when the file was already in canonical form.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.replacements.is_empty()
    }
}

/// A file the engine could not process at all, with its rendered error chain.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregated outcome of one `run` invocation.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub failures: Vec<FailedFile>,
}

impl RunReport {
    pub fn total_replacements(&self) -> usize {
        self.files.iter().map(|file| file.replacements.len()).sum()
    }

    pub fn total_issues(&self) -> usize {
        self.files.iter().map(|file| file.issues.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Serializes the report for `--report`.
    ///
    /// # Arguments
    /// * `format`: The output format requested on the command line.
    ///
    /// # Returns
    /// The rendered document as a `String`.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to render JSON report")
            }
            ReportFormat::Yaml => {
                serde_yaml::to_string(self).context("failed to render YAML report")
            }
        }
    }
}

/// Output formats accepted by `run --report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Yaml,
}

/// Progress sink for a batch run.
///
/// The engine itself stays silent; the command layer forwards each per-file
/// result here. Tests swap in a quiet implementation to keep output clean.
pub trait RunReporter {
    fn file_started(&mut self, path: &Path);
    fn file_finished(&mut self, report: &FileReport);
    fn file_failed(&mut self, path: &Path, error: &anyhow::Error);
    fn finish(&mut self, report: &RunReport);
}

/// A concrete implementation of `RunReporter` that prints to stderr.
///
/// stdout carries only the optional structured report; every diagnostic line
/// goes to stderr.
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Constructs a new `ConsoleReporter` instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReporter for ConsoleReporter {
    fn file_started(&mut self, path: &Path) {
        eprintln!("file \"{}\"", path.display());
    }

    fn file_finished(&mut self, report: &FileReport) {
        for issue in &report.issues {
            eprintln!("line {}: {}", issue.line, issue.message);
        }
        for replacement in &report.replacements {
            eprintln!("conv: {:?} => {:?}", replacement.old, replacement.new);
        }
    }

    fn file_failed(&mut self, _path: &Path, error: &anyhow::Error) {
        eprintln!("error: {error:#}");
    }

    fn finish(&mut self, report: &RunReport) {
        eprintln!(
            "✓ Processed {} file(s): {} replacement(s), {} issue(s)",
            report.files.len(),
            report.total_replacements(),
            report.total_issues()
        );
        if report.has_failures() {
            eprintln!("⚠️  Failed to process {} file(s)", report.failures.len());
        }
    }
}
