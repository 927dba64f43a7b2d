//! Command-line interface for todo
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::task::Priority;

mod init;
mod prompt;
mod task;

/// todo - manage your to-do list
///
/// Tasks live in a local JSON database whose location is recorded by
/// `todo init`.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "TODO_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the configuration and the to-do database
    Init {
        /// Path to the to-do database
        #[arg(long)]
        db_path: Option<PathBuf>,
    },

    /// Add a to-do item to the database
    Add {
        /// Title of the to-do item
        #[arg(required = true)]
        title: Vec<String>,

        /// Description of the to-do item (quote it when it has spaces)
        #[arg(short, long)]
        description: Option<String>,

        /// Priority: 0 (low), 1 (medium) or 2 (high)
        #[arg(short, long, default_value_t = Priority::Low)]
        priority: Priority,
    },

    /// List to-do items
    List {
        /// Only completed to-do items
        #[arg(short, long, conflicts_with = "not_completed")]
        completed: bool,

        /// Only to-do items that are not completed
        #[arg(short, long)]
        not_completed: bool,

        /// Only to-do items with this priority
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Mark a to-do item as completed
    Complete {
        /// ID (or a prefix of at least 6 characters) of the to-do item
        id: String,
    },

    /// Remove to-do items from the database
    Remove {
        /// ID (or a prefix of at least 6 characters) of the to-do item
        #[arg(long, conflicts_with_all = ["completed", "all"], required_unless_present_any = ["completed", "all"])]
        id: Option<String>,

        /// Remove all completed to-do items
        #[arg(short, long, conflicts_with = "all")]
        completed: bool,

        /// Remove all to-do items
        #[arg(short, long)]
        all: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init { db_path } => init::run(init::InitOptions {
                db_path,
                config_dir: self.config_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Add {
                title,
                description,
                priority,
            } => task::run_add(task::AddOptions {
                title,
                description,
                priority,
                config_dir: self.config_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List {
                completed,
                not_completed,
                priority,
            } => {
                let completed = if completed {
                    Some(true)
                } else if not_completed {
                    Some(false)
                } else {
                    None
                };
                task::run_list(task::ListOptions {
                    completed,
                    priority,
                    config_dir: self.config_dir,
                    json: self.json,
                    quiet: self.quiet,
                })
            }
            Commands::Complete { id } => task::run_complete(task::CompleteOptions {
                id,
                config_dir: self.config_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Remove {
                id,
                completed,
                all,
                force,
            } => {
                let target = match (id, completed, all) {
                    (_, _, true) => task::RemoveTarget::All,
                    (_, true, false) => task::RemoveTarget::Completed,
                    (Some(id), false, false) => task::RemoveTarget::Id(id),
                    (None, false, false) => {
                        return Err(crate::error::Error::InvalidArgument(
                            "provide --id, --completed or --all".to_string(),
                        ))
                    }
                };
                task::run_remove(task::RemoveOptions {
                    target,
                    force,
                    config_dir: self.config_dir,
                    json: self.json,
                    quiet: self.quiet,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    fn parse_add(args: &[&str]) -> (Vec<String>, Option<String>, Priority) {
        let cli = Cli::try_parse_from(args.iter().copied()).expect("parse");
        match cli.command {
            Commands::Add {
                title,
                description,
                priority,
            } => (title, description, priority),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_collects_title_tokens_and_one_description() {
        let (title, description, priority) = parse_add(&[
            "todo", "add", "Clean", "the", "house.", "-d", "very dirty", "-p", "2",
        ]);
        assert_eq!(title, vec!["Clean", "the", "house."]);
        assert_eq!(description.as_deref(), Some("very dirty"));
        assert_eq!(priority, Priority::High);
    }

    #[test]
    fn add_description_may_precede_title() {
        let (title, description, priority) =
            parse_add(&["todo", "add", "-d", "1L", "Get", "milk"]);
        assert_eq!(title, vec!["Get", "milk"]);
        assert_eq!(description.as_deref(), Some("1L"));
        assert_eq!(priority, Priority::Low);
    }

    #[test]
    fn add_rejects_out_of_range_priority() {
        let result = Cli::try_parse_from(["todo", "add", "x", "--priority", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_rejects_both_completion_filters() {
        let result = Cli::try_parse_from(["todo", "list", "--completed", "--not-completed"]);
        assert!(result.is_err());
    }

    #[test]
    fn remove_requires_a_target() {
        assert!(Cli::try_parse_from(["todo", "remove"]).is_err());
        assert!(Cli::try_parse_from(["todo", "remove", "--id", "abcdef", "--completed"]).is_err());
        assert!(Cli::try_parse_from(["todo", "remove", "--all", "--force"]).is_ok());
    }
}
