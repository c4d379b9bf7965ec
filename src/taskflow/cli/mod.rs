//! # CLI Layer
//!
//! One possible UI client for taskflow, not the application itself. This is the
//! only place that knows about terminal I/O, prompts and exit codes.
//!
//! Running `taskflow` with no arguments lists tasks.
//!
//! Tasks and categories are addressed by display index (see `taskflow::index`);
//! categories can also be addressed by name. Destructive commands ask for
//! confirmation unless `--yes` is given.
//!
//! The data directory is `$TASKFLOW_HOME` when set, otherwise the platform data
//! directory.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `render`: output formatting (rows, colors, messages)
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles and category colors

mod commands;
mod render;
mod setup;
mod styles;

pub use commands::run;
