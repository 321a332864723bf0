// This file is the module declaration file for the `core` module. It declares
// the pieces that decide what a run means, as opposed to the line-level
// builders that carry the rewrite out.

// `config` module:
// This module is responsible for managing the tool's configuration. It defines
// the on-disk `NormalizerConfig` schema and its TOML (de)serialization,
// provides a `ConfigProvider` trait for abstracting configuration access, a
// `ConfigManager` that discovers the tree root and handles file I/O, and the
// `ResolvedConfig` of canonicalized roots that the engine consumes.
pub mod config;

// `engine` module:
// The rewrite driver. `NormalizeEngine` owns the resolved configuration and
// the lazily-built include index, and processes one file at a time: load the
// source model, run the transformer chain over the content lines, copy the
// original aside, write the result back in place.
pub mod engine;

// `source_file` module:
// The per-file text model. It classifies a path against the configured roots,
// derives the namespace from the relative directory, splits the leading
// comment preamble from the content lines, and trims trailing blank lines.
pub mod source_file;
