//! todo - local to-do list library
//!
//! This library provides the core functionality for the `todo` CLI: a
//! JSON-file task database and the task operations built on top of it.
//!
//! # Core Concepts
//!
//! - **Database**: a single JSON array file, read and replaced whole
//! - **Tasks**: title, description, priority and completion, keyed by a ULID
//! - **Id prefixes**: any prefix of at least six characters selects a task
//! - **Outcomes**: every core operation reports a machine-checkable code
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration file recording the database location
//! - `error`: Outcome codes, error types and result aliases
//! - `output`: Human and JSON output for CLI commands
//! - `storage`: JSON database file access
//! - `task`: Task model and task operations

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod task;

pub use error::{Error, Outcome, Response, Result};
pub use storage::Database;
pub use task::{Priority, Task, TaskService};
