//! The idea: every header in a C/C++ tree should carry the same guard shape,
//! and every #include should spell its target the same way no matter which
//! file it sits in. Doing that by hand across a few hundred files never
//! sticks. This tool rewrites guard lines and include directives in place,
//! resolving each include against the layout of the header tree itself, and
//! leaves a .backup beside anything it touches.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use src_normalize::{ReportFormat, utils};

#[derive(Parser)]
#[command(name = "src-normalize")]
#[command(about = "Rewrite C/C++ include guards and #include paths to one convention")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default src-normalize.toml at the tree root
    Init,
    /// Check the configuration against the tree
    Validate,
    /// Normalize the given files in place
    Run {
        /// Files to rewrite, each under the configured header or source root
        files: Vec<PathBuf>,
        /// Emit a machine-readable run report on stdout
        #[arg(long, value_enum)]
        report: Option<ReportFormat>,
    },
    /// Print the include index built from the header root
    Index,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => utils::cmd_init(),
        Commands::Validate => utils::cmd_validate(),
        Commands::Run { files, report } => utils::cmd_run(&files, report),
        Commands::Index => utils::cmd_index(),
    }
}
