//! # Taskflow Architecture
//!
//! Taskflow is a personal task tracker built as a **UI-agnostic library** with a
//! terminal client on top. The library owns tasks, categories, the derived views
//! over them and the reminder logic; the `taskflow` binary is one way to drive it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (indexes, category names, the clock)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns `CmdResult`                      │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                              │
//!                  ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Engines (pure functions)     │ │  Storage (store/)         │
//! │  filter, stats, export,       │ │  StorageBackend trait     │
//! │  reminder                     │ │  FsBackend, MemBackend    │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns plain Rust
//! types and never writes to stdout or exits the process. Logging goes through
//! `tracing`; installing a subscriber is the binary's job (see [`logging`]).
//!
//! Every list or stats request recomputes from the current store state. The only
//! background activity is the reminder timer in [`scheduler`].
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Key-value persistence and the task/category store
//! - [`model`]: `Task`, `Category`, drafts, priorities and statuses
//! - [`index`]: Display indexes (see that module for the id/index split)
//! - [`filter`], [`stats`], [`export`], [`reminder`]: the derivation engines
//! - [`notify`]: Notification sinks and permissions
//! - [`scheduler`]: Cancellable periodic timer
//! - [`config`]: `config.json` settings
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod index;
pub mod logging;
pub mod model;
pub mod notify;
pub mod reminder;
pub mod scheduler;
pub mod stats;
pub mod store;
