//! Task management for todo.
//!
//! Every operation is a full read-modify-write cycle against the
//! [`Database`]: nothing is cached between calls.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{self, Error, Outcome, Response};
use crate::storage::Database;

/// Id prefixes must be longer than this to match anything
const MIN_ID_PREFIX_LEN: usize = 6;

/// Task priority, persisted as its integer rank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = Error;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.rank() == rank)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid priority {rank}: must be 0 (low), 1 (medium) or 2 (high)"
                ))
            })
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.rank()
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rank) = trimmed.parse::<u8>() {
            return Priority::try_from(rank);
        }
        Priority::ALL
            .into_iter()
            .find(|priority| priority.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid priority '{trimmed}': must be 0 (low), 1 (medium) or 2 (high)"
                ))
            })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One to-do entry. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
}

/// Task operations on top of a [`Database`]
#[derive(Debug, Clone)]
pub struct TaskService {
    database: Database,
}

impl TaskService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn open(db_path: impl Into<PathBuf>) -> Self {
        Self::new(Database::new(db_path))
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Create a task and append it to the database.
    ///
    /// Title and description tokens are joined with single spaces. A blank
    /// title is rejected before the database is touched. When the database
    /// cannot be read or decoded nothing is written and the returned task is
    /// not persisted.
    pub fn add<S: AsRef<str>>(
        &self,
        title: &[S],
        description: &[S],
        priority: Priority,
    ) -> error::Result<Response<Task>> {
        let title = join_tokens(title);
        if title.trim().is_empty() {
            return Err(Error::InvalidArgument("title cannot be empty".to_string()));
        }

        let read = self.database.read_all();
        let existing: HashSet<&str> = read.payload.iter().map(|task| task.id.as_str()).collect();
        let task = Task {
            id: generate_task_id(&existing),
            title,
            description: join_tokens(description),
            priority,
            completed: false,
        };

        if !read.is_success() {
            tracing::warn!(outcome = ?read.outcome, "not adding task: database unavailable");
            return Ok(Response::new(task, read.outcome));
        }

        let mut todo_list = read.payload;
        todo_list.push(task.clone());
        let written = self.database.write_all(todo_list);
        tracing::debug!(id = %task.id, outcome = ?written.outcome, "task added");
        Ok(Response::new(task, written.outcome))
    }

    /// Tasks matching every given filter, in file order.
    ///
    /// An unreadable database lists as empty.
    pub fn list(&self, completed: Option<bool>, priority: Option<Priority>) -> Vec<Task> {
        let response = self.list_filtered(completed, priority);
        if !response.is_success() {
            tracing::warn!(outcome = ?response.outcome, "listing tasks from an unavailable database");
        }
        response.payload
    }

    /// Like [`TaskService::list`], keeping the read outcome.
    pub fn list_filtered(
        &self,
        completed: Option<bool>,
        priority: Option<Priority>,
    ) -> Response<Vec<Task>> {
        let read = self.database.read_all();
        if !read.is_success() {
            return Response::new(Vec::new(), read.outcome);
        }
        Response::success(filter_tasks(read.payload, completed, priority))
    }

    /// First task whose id starts with `prefix`.
    pub fn find_by_id_prefix(&self, prefix: &str) -> Option<Task> {
        let read = self.database.read_all();
        if !read.is_success() {
            tracing::warn!(outcome = ?read.outcome, "looking up a task in an unavailable database");
            return None;
        }
        position_by_id_prefix(&read.payload, prefix).map(|idx| read.payload[idx].clone())
    }

    /// Mark the task matching `prefix` as completed.
    pub fn complete(&self, prefix: &str) -> Response<Option<Task>> {
        self.update_by_id_prefix(prefix, |todo_list, idx| {
            let task = &mut todo_list[idx];
            task.completed = true;
            task.clone()
        })
    }

    /// Remove the task matching `prefix`.
    pub fn remove(&self, prefix: &str) -> Response<Option<Task>> {
        self.update_by_id_prefix(prefix, |todo_list, idx| todo_list.remove(idx))
    }

    /// Drop every completed task, keeping the rest in order.
    pub fn remove_completed(&self) -> Outcome {
        let read = self.database.read_all();
        if !read.is_success() {
            return read.outcome;
        }
        let mut todo_list = read.payload;
        let before = todo_list.len();
        todo_list.retain(|task| !task.completed);
        tracing::debug!(removed = before - todo_list.len(), "removing completed tasks");
        self.database.write_all(todo_list).outcome
    }

    /// Empty the database.
    pub fn remove_all(&self) -> Outcome {
        tracing::debug!("removing all tasks");
        self.database.write_all(Vec::new()).outcome
    }

    fn update_by_id_prefix<F>(&self, prefix: &str, mutate: F) -> Response<Option<Task>>
    where
        F: FnOnce(&mut Vec<Task>, usize) -> Task,
    {
        let read = self.database.read_all();
        if !read.is_success() {
            return Response::new(None, read.outcome);
        }

        let mut todo_list = read.payload;
        let Some(idx) = position_by_id_prefix(&todo_list, prefix) else {
            tracing::debug!(prefix, "no task matches id prefix");
            return Response::new(None, Outcome::IdNotFound);
        };

        let task = mutate(&mut todo_list, idx);
        let written = self.database.write_all(todo_list);
        tracing::debug!(id = %task.id, outcome = ?written.outcome, "task updated");
        Response::new(Some(task), written.outcome)
    }
}

/// Apply the completion and priority filters conjunctively.
pub fn filter_tasks(
    mut tasks: Vec<Task>,
    completed: Option<bool>,
    priority: Option<Priority>,
) -> Vec<Task> {
    tasks.retain(|task| {
        completed.map_or(true, |completed| task.completed == completed)
            && priority.map_or(true, |priority| task.priority == priority)
    });
    tasks
}

/// Index of the first task whose id starts with `prefix`.
///
/// Prefixes of fewer than six characters never match.
pub fn position_by_id_prefix(tasks: &[Task], prefix: &str) -> Option<usize> {
    let prefix_norm = normalize_id(prefix);
    if prefix_norm.chars().count() < MIN_ID_PREFIX_LEN {
        return None;
    }
    tasks
        .iter()
        .position(|task| normalize_id(&task.id).starts_with(&prefix_norm))
}

fn generate_task_id(existing: &HashSet<&str>) -> String {
    loop {
        let candidate = normalize_id(&Ulid::new().to_string());
        if !existing.contains(candidate.as_str()) {
            return candidate;
        }
    }
}

fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|token| token.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_id(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}
