//! Library surface behind the `src-normalize` binary.
//!
//! The binary is a thin clap dispatcher; everything it does is reachable
//! through these modules, which is also how the integration tests drive the
//! engine without spawning a process.

pub mod builders;
pub mod core;
pub mod utils;

pub use crate::builders::index::IncludeIndex;
pub use crate::builders::reporter::{
    ConsoleReporter, FailedFile, FileReport, ReportFormat, RunReport, RunReporter,
};
pub use crate::builders::transforms::{Issue, LineTransform, Replacement};
pub use crate::builders::validator::{ConfigValidator, StandardValidator};
pub use crate::core::config::{ConfigManager, ConfigProvider, NormalizerConfig, ResolvedConfig};
pub use crate::core::engine::NormalizeEngine;
pub use crate::core::source_file::{RootKind, SourceFile};
