// This file is the module declaration file for the `builders` module.
// It declares and makes public the line-level transformers and the services
// they are built from.

// The `pub mod guard;` declaration exposes the `guard` module.
//
// `guard` module:
// This module implements the include-guard transformer. It derives the
// canonical guard name from the configured prefix, the file's namespace, and
// its file name, then rewrites the `#ifndef`/`#define`/`#endif` lines at the
// fixed guard positions, recording an issue whenever the expected line is
// missing.
pub mod guard;

// The `pub mod include;` declaration exposes the `include` module.
//
// `include` module:
// This module implements the include-directive transformer. It recognizes
// single-line `#include` directives, resolves the target's base name through
// the include index, and rewrites the directive to the canonical spelling:
// quoted and relative within a header's own subtree, angle-bracketed from the
// header root everywhere else.
pub mod include;

// The `pub mod index;` declaration exposes the `index` module.
//
// `index` module:
// This module builds the include index: a map from header base name to every
// relative path under the header root carrying that name. The index is the
// service the include transformer resolves targets against, and the `index`
// subcommand prints it.
pub mod index;

// The `pub mod reporter;` declaration exposes the `reporter` module.
//
// `reporter` module:
// This module is responsible for reporting results. It defines the structured
// `FileReport` and `RunReport` types, the `RunReporter` trait with its
// `ConsoleReporter` implementation, and the JSON/YAML export used by
// `run --report`.
pub mod reporter;

// The `pub mod transforms;` declaration exposes the `transforms` module.
//
// `transforms` module:
// This is a fundamental module that defines the `LineTransform` trait every
// transformer implements, along with the `Issue` and `Replacement` record
// types the reports are built from.
pub mod transforms;

// The `pub mod validator;` declaration exposes the `validator` module.
//
// `validator` module:
// This module is dedicated to ensuring the integrity of the configuration.
// It defines the `ConfigValidator` trait and a `StandardValidator`
// implementation that checks the configured roots and the guard prefix before
// a run ever rewrites a file.
pub mod validator;
