//! Storage layer for todo
//!
//! The whole task list lives in a single JSON array file. Every read loads
//! the full collection and every write replaces it.
//!
//! ```text
//! [
//!     {
//!         "id": "01j9v4ne1ajx7kfw4w4qd8cq3m",
//!         "title": "Get milk",
//!         "description": "1L",
//!         "priority": 0,
//!         "completed": false
//!     }
//! ]
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Outcome, Response};
use crate::task::Task;

/// Indentation used for the database file
const JSON_INDENT: &[u8] = b"    ";

/// Handle to the on-disk task database
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create (or reset) the database with an empty task list
    pub fn initialize(&self) -> Outcome {
        self.write_all(Vec::new()).outcome
    }

    /// Load the full task list.
    ///
    /// The payload is empty whenever the outcome is not `Success`.
    pub fn read_all(&self) -> Response<Vec<Task>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "database read failed");
                return Response::new(Vec::new(), Outcome::ReadError);
            }
        };

        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(todo_list) => {
                tracing::debug!(path = %self.path.display(), tasks = todo_list.len(), "database read");
                Response::success(todo_list)
            }
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "database decode failed");
                Response::new(Vec::new(), Outcome::DecodeError)
            }
        }
    }

    /// Replace the database contents with `todo_list`.
    ///
    /// The collection is handed back unchanged regardless of the outcome.
    pub fn write_all(&self, todo_list: Vec<Task>) -> Response<Vec<Task>> {
        let outcome = match encode_pretty(&todo_list) {
            Ok(buffer) => match write_atomic(&self.path, &buffer) {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), tasks = todo_list.len(), "database written");
                    Outcome::Success
                }
                Err(err) => {
                    tracing::debug!(path = %self.path.display(), error = %err, "database write failed");
                    Outcome::WriteError
                }
            },
            Err(err) => {
                tracing::debug!(error = %err, "database encode failed");
                Outcome::WriteError
            }
        };
        Response::new(todo_list, outcome)
    }
}

fn encode_pretty<T: Serialize>(data: &T) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Write data using temp file + rename
///
/// The target is either fully replaced or left untouched.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp = temp_path(path);

    let result = (|| {
        let mut file = File::create(&temp)?;
        file.write_all(data)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

/// Scratch file `write_atomic` writes before renaming onto `path`.
///
/// Same directory, so the rename cannot cross filesystems.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(format!(
        "{}.tmp.{}",
        path.extension().and_then(|e| e.to_str()).unwrap_or(""),
        std::process::id()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use tempfile::TempDir;

    fn task(id: &str, title: &str, priority: Priority, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            priority,
            completed,
        }
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path().join("missing.json"));

        let response = db.read_all();
        assert_eq!(response.outcome, Outcome::ReadError);
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_read_malformed_file_is_decode_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todo.json");
        fs::write(&path, "[{\"id\": ").unwrap();

        let response = Database::new(&path).read_all();
        assert_eq!(response.outcome, Outcome::DecodeError);
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_record_missing_field_is_decode_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todo.json");
        fs::write(
            &path,
            r#"[{"title": "Get some milk", "description": "1L of 2% milk.", "priority": 2, "completed": false}]"#,
        )
        .unwrap();

        let response = Database::new(&path).read_all();
        assert_eq!(response.outcome, Outcome::DecodeError);
    }

    #[test]
    fn test_out_of_range_priority_is_decode_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("todo.json");
        fs::write(
            &path,
            r#"[{"id": "abcdefgh", "title": "x", "description": "", "priority": 3, "completed": false}]"#,
        )
        .unwrap();

        let response = Database::new(&path).read_all();
        assert_eq!(response.outcome, Outcome::DecodeError);
    }

    #[test]
    fn test_initialize_writes_empty_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("todo.json");
        let db = Database::new(&path);

        assert_eq!(db.initialize(), Outcome::Success);
        assert!(db.exists());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");

        let response = db.read_all();
        assert_eq!(response.outcome, Outcome::Success);
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_initialize_resets_existing_database() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path().join("todo.json"));
        db.write_all(vec![task("01aaaaaaaa", "Old", Priority::Low, false)]);

        assert_eq!(db.initialize(), Outcome::Success);
        assert!(db.read_all().payload.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path().join("todo.json"));
        let tasks = vec![
            task("01bbbbbbbb", "Second id, first in file", Priority::High, true),
            task("01aaaaaaaa", "First id, second in file", Priority::Low, false),
            Task {
                description: "with a description".to_string(),
                ..task("01cccccccc", "Third", Priority::Medium, false)
            },
        ];

        let written = db.write_all(tasks.clone());
        assert_eq!(written.outcome, Outcome::Success);
        assert_eq!(written.payload, tasks);

        let read = db.read_all();
        assert_eq!(read.outcome, Outcome::Success);
        assert_eq!(read.payload, tasks);

        let rewritten = fs::read_to_string(db.path()).unwrap();
        db.write_all(read.payload);
        assert_eq!(fs::read_to_string(db.path()).unwrap(), rewritten);
    }

    #[test]
    fn test_written_json_is_indented_with_stable_keys() {
        let temp = TempDir::new().unwrap();
        let db = Database::new(temp.path().join("todo.json"));
        db.write_all(vec![task("01aaaaaaaa", "Get milk", Priority::Medium, false)]);

        let content = fs::read_to_string(db.path()).unwrap();
        let expected = r#"[
    {
        "id": "01aaaaaaaa",
        "title": "Get milk",
        "description": "",
        "priority": 1,
        "completed": false
    }
]
"#;
        assert_eq!(content, expected);
    }

    #[test]
    fn test_write_failure_is_write_error_and_keeps_payload() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp.path().join("todo.json");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let db = Database::new(&path);
        let tasks = vec![task("01aaaaaaaa", "Keep me", Priority::Low, false)];

        let response = db.write_all(tasks.clone());
        assert_eq!(response.outcome, Outcome::WriteError);
        assert_eq!(response.payload, tasks);
        assert!(path.join("occupied").is_dir());
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");

        write_atomic(&path, b"[]").unwrap();
        write_atomic(&path, b"[1]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[1]");
        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
