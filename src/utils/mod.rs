use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::builders::index::IncludeIndex;
use crate::builders::reporter::{ConsoleReporter, FailedFile, ReportFormat, RunReport, RunReporter};
use crate::builders::validator::{ConfigValidator, StandardValidator};
use crate::core::config::{ConfigManager, ConfigProvider};
use crate::core::engine::NormalizeEngine;

pub fn cmd_init() -> Result<()> {
    let manager = ConfigManager::new()?;
    manager.initialize()?;
    println!(
        "✓ Initialized source normalizer at {}",
        manager.tree_root().display()
    );
    println!("Edit src-normalize.toml to set the header and source roots");
    Ok(())
}

pub fn cmd_validate() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_config()?;
    let validator = StandardValidator::new();
    let issues = validator.validate_config(manager.tree_root(), &config)?;

    if issues.is_empty() {
        println!("✓ Configuration is valid");
        return Ok(());
    }

    println!("⚠️  Found issues in configuration:");
    for issue in &issues {
        println!("  - {issue}");
    }
    bail!("configuration validation failed");
}

pub fn cmd_run(files: &[PathBuf], report_format: Option<ReportFormat>) -> Result<()> {
    if files.is_empty() {
        bail!("no input files given");
    }

    let manager = ConfigManager::new()?;
    let engine = NormalizeEngine::new(manager.resolve()?);
    let mut reporter = ConsoleReporter::new();
    let report = run_batch(&engine, files, &mut reporter);

    if let Some(format) = report_format {
        println!("{}", report.render(format)?.trim_end());
    }

    if report.has_failures() {
        bail!(
            "failed to process {} of {} file(s)",
            report.failures.len(),
            files.len()
        );
    }
    Ok(())
}

/// Processes each path independently; one file's fatal error never stops the
/// rest of the batch.
pub fn run_batch(
    engine: &NormalizeEngine,
    files: &[PathBuf],
    reporter: &mut dyn RunReporter,
) -> RunReport {
    let mut report = RunReport::default();
    for path in files {
        reporter.file_started(path);
        match engine.normalize_file(path) {
            Ok(file_report) => {
                reporter.file_finished(&file_report);
                report.files.push(file_report);
            }
            Err(error) => {
                reporter.file_failed(path, &error);
                report.failures.push(FailedFile {
                    path: path.clone(),
                    error: format!("{error:#}"),
                });
            }
        }
    }
    reporter.finish(&report);
    report
}

pub fn cmd_index() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.resolve()?;
    let index = IncludeIndex::scan(config.header_root())?;

    if index.is_empty() {
        println!(
            "No header files found under {}",
            config.header_root().display()
        );
        return Ok(());
    }

    println!(
        "📁 {} header name(s) under {}",
        index.len(),
        config.header_root().display()
    );
    for (name, candidates) in index.entries() {
        if let [only] = candidates {
            println!("  {name} -> {}", only.display());
        } else {
            println!("⚠️  {name} has {} candidates:", candidates.len());
            for candidate in candidates {
                println!("    {}", candidate.display());
            }
        }
    }
    Ok(())
}
