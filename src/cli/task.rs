//! todo task command implementations.

use std::io::IsTerminal;
use std::path::PathBuf;

use crossterm::style::Stylize;
use serde::Serialize;

use crate::cli::prompt;
use crate::config::{self, Config};
use crate::error::{Error, Outcome, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions, Tone};
use crate::task::{Priority, Task, TaskService};

/// Longest description shown in the list table
const DESCRIPTION_WIDTH: usize = 40;

pub struct AddOptions {
    pub title: Vec<String>,
    pub description: Option<String>,
    pub priority: Priority,
    pub config_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub config_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct CompleteOptions {
    pub id: String,
    pub config_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    Id(String),
    Completed,
    All,
}

pub struct RemoveOptions {
    pub target: RemoveTarget,
    pub force: bool,
    pub config_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum RemoveScope {
    Id,
    Completed,
    All,
}

#[derive(Serialize)]
struct RemoveOutput {
    scope: RemoveScope,
    cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<Task>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    if options.title.iter().all(|token| token.trim().is_empty()) {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }

    let service = load_service(options.config_dir)?;
    let description: Vec<String> = options.description.into_iter().collect();
    let task = service
        .add(&options.title, &description, options.priority)?
        .into_result()?;

    let mut human = HumanOutput::new(format!(
        "to-do \"{}\" was added with {} priority.",
        task.title,
        task.priority.name().to_lowercase()
    ));
    human.push_summary("ID", task.id.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &task,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let service = load_service(options.config_dir)?;
    let response = service.list_filtered(options.completed, options.priority);
    let tasks = response.payload;

    let mut human = if tasks.is_empty() {
        HumanOutput::new("There are no tasks in the to-do list yet").with_tone(Tone::Danger)
    } else {
        let mut human = HumanOutput::new("to-do list:").with_tone(Tone::Info);
        human.push_detail(table_header());
        for task in &tasks {
            human.push_detail(format_task_row(task));
        }
        human
    };

    // The list degrades to empty; surface why
    let outcome = response.outcome;
    if !outcome.is_success() {
        tracing::warn!(outcome = ?outcome, "listing tasks from an unavailable database");
        human.push_warning(format!(
            "could not read {}: {outcome}",
            service.database().path().display()
        ));
    }

    let output = TaskListOutput {
        total: tasks.len(),
        tasks,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

pub fn run_complete(options: CompleteOptions) -> Result<()> {
    let service = load_service(options.config_dir)?;
    let task = service
        .complete(&options.id)
        .into_result()?
        .ok_or(Error::Operation(Outcome::IdNotFound))?;

    let mut human = HumanOutput::new(format!(
        "to-do \"{}\" was marked as completed",
        task.title
    ));
    human.push_summary("ID", task.id.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "complete",
        &task,
        Some(&human),
    )
}

pub fn run_remove(options: RemoveOptions) -> Result<()> {
    let service = load_service(options.config_dir)?;
    let output_options = OutputOptions {
        json: options.json,
        quiet: options.quiet,
    };

    match options.target {
        RemoveTarget::Id(id) => {
            if !options.force {
                // A failed lookup falls through so `remove` reports the real outcome
                if let Some(task) = service.find_by_id_prefix(&id) {
                    let question = format!("Delete to-do # {}: {}?", task.id, task.title);
                    if !prompt::confirm(&question)? {
                        return emit_cancelled(output_options, RemoveScope::Id);
                    }
                }
            }

            let task = service
                .remove(&id)
                .into_result()?
                .ok_or(Error::Operation(Outcome::IdNotFound))?;

            let mut human = HumanOutput::new(format!("to-do \"{}\" was removed", task.title));
            human.push_summary("ID", task.id.clone());

            let output = RemoveOutput {
                scope: RemoveScope::Id,
                cancelled: false,
                task: Some(task),
            };
            emit_success(output_options, "remove", &output, Some(&human))
        }
        RemoveTarget::Completed => {
            if !options.force && !prompt::confirm("Delete all completed to-do items?")? {
                return emit_cancelled(output_options, RemoveScope::Completed);
            }

            service.remove_completed().into_result()?;

            let human = HumanOutput::new("All completed to-do items were removed");
            let output = RemoveOutput {
                scope: RemoveScope::Completed,
                cancelled: false,
                task: None,
            };
            emit_success(output_options, "remove", &output, Some(&human))
        }
        RemoveTarget::All => {
            if !options.force {
                let warning = "DANGER! All to-do will be removed";
                if std::io::stderr().is_terminal() {
                    eprintln!("{}", warning.red());
                } else {
                    eprintln!("{warning}");
                }
                if !prompt::confirm("Do you still want to proceed?")? {
                    return emit_cancelled(output_options, RemoveScope::All);
                }
            }

            service.remove_all().into_result()?;

            let human = HumanOutput::new("All to-do items were removed");
            let output = RemoveOutput {
                scope: RemoveScope::All,
                cancelled: false,
                task: None,
            };
            emit_success(output_options, "remove", &output, Some(&human))
        }
    }
}

fn emit_cancelled(options: OutputOptions, scope: RemoveScope) -> Result<()> {
    let human = HumanOutput::new("Operation cancelled").with_tone(Tone::Info);
    let output = RemoveOutput {
        scope,
        cancelled: true,
        task: None,
    };
    emit_success(options, "remove", &output, Some(&human))
}

/// Resolve the config and open the database it names.
///
/// Both must already exist; `todo init` creates them.
fn load_service(config_dir: Option<PathBuf>) -> Result<TaskService> {
    let config_dir = config_dir.unwrap_or_else(config::default_config_dir);
    let config_path = config::config_file(&config_dir);
    if !config_path.is_file() {
        return Err(Error::ConfigNotFound(config_path));
    }

    let config = Config::load(&config_path)?;
    let service = TaskService::open(config.database_path());
    if !service.database().exists() {
        return Err(Error::DatabaseNotFound(
            service.database().path().to_path_buf(),
        ));
    }
    tracing::debug!(database = %service.database().path().display(), "using database");
    Ok(service)
}

fn table_header() -> String {
    format!(
        "{:<26}  {:<8}  {:<9}  {}",
        "ID", "Priority", "Completed", "Title"
    )
}

fn format_task_row(task: &Task) -> String {
    let mut line = format!(
        "{:<26}  {:<8}  {:<9}  {}",
        task.id,
        task.priority.name(),
        if task.completed { "yes" } else { "no" },
        task.title
    );
    if !task.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&truncate(&task.description, DESCRIPTION_WIDTH));
    }
    line
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
