use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{CONFIG_VERSION, NormalizerConfig};

/// The `ConfigValidator` trait defines the public interface for validating a
/// normalizer configuration against the tree it will run over.
///
/// Validation never mutates anything; it only reports findings, so a stricter
/// or more permissive strategy can be swapped in behind the same interface.
pub trait ConfigValidator {
    /// Performs a full validation of the configuration.
    ///
    /// # Arguments
    /// * `tree_root`: The directory the relative roots are resolved against.
    /// * `config`: The configuration to be validated.
    ///
    /// # Returns
    /// A `Result<Vec<String>>` where each string describes one finding.
    fn validate_config(&self, tree_root: &Path, config: &NormalizerConfig) -> Result<Vec<String>>;
}

/// The `StandardValidator` is a concrete implementation of `ConfigValidator`.
///
/// It checks that the configured roots exist and do not overlap, and that the
/// guard prefix can legally appear in a preprocessor macro name.
pub struct StandardValidator;

impl StandardValidator {
    /// Creates a new instance of `StandardValidator`.
    pub fn new() -> Self {
        Self
    }

    /// Resolves one configured root, recording findings for a missing or
    /// non-directory path.
    fn check_root(&self, label: &str, path: &Path, issues: &mut Vec<String>) -> Option<PathBuf> {
        if !path.exists() {
            issues.push(format!("{label} not found: {}", path.display()));
            return None;
        }
        if !path.is_dir() {
            issues.push(format!("{label} is not a directory: {}", path.display()));
            return None;
        }
        fs::canonicalize(path).ok()
    }

    /// Checks that the guard prefix stays inside the identifier alphabet a
    /// macro name allows. An empty prefix is valid and means "no prefix".
    fn check_guard_prefix(&self, prefix: &str, issues: &mut Vec<String>) {
        if prefix.is_empty() {
            return;
        }
        if prefix.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            issues.push(format!("Guard prefix cannot start with a digit: {prefix}"));
        }
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            issues.push(format!(
                "Guard prefix contains characters not allowed in a macro name: {prefix}"
            ));
        }
    }
}

impl ConfigValidator for StandardValidator {
    /// The main public method for validating the entire configuration.
    ///
    /// It orchestrates multiple checks, including:
    /// - Version compatibility.
    /// - Existence of both configured roots.
    /// - Overlap between the two roots, which would make file classification
    ///   ambiguous.
    /// - Macro-safety of the guard prefix.
    fn validate_config(&self, tree_root: &Path, config: &NormalizerConfig) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != CONFIG_VERSION {
            issues.push(format!("Unsupported config version: {}", config.version));
        }

        let header = self.check_root(
            "Header root",
            &tree_root.join(&config.header_root),
            &mut issues,
        );
        let source = self.check_root(
            "Source root",
            &tree_root.join(&config.source_root),
            &mut issues,
        );

        if let Some(header) = header
            && let Some(source) = source
        {
            if header == source {
                issues.push("Header root and source root are the same directory".to_string());
            } else if header.starts_with(&source) || source.starts_with(&header) {
                issues
                    .push("Header root and source root are nested inside each other".to_string());
            }
        }

        self.check_guard_prefix(&config.guard_prefix, &mut issues);

        Ok(issues)
    }
}
