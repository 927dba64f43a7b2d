#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Scratch home with its own config dir and database path.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    /// Fresh environment with `todo init` already run.
    pub fn initialized() -> Self {
        let env = Self::new();
        env.todo_cmd()
            .arg("init")
            .arg("--db-path")
            .arg(env.db_path())
            .assert()
            .success();
        env
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("data").join("todo.json")
    }

    pub fn todo_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("todo").expect("binary");
        cmd.env("TODO_CONFIG_DIR", self.config_dir())
            .env("HOME", self.dir.path())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Add a task and return its id.
    pub fn add(&self, args: &[&str]) -> String {
        let output = self
            .todo_cmd()
            .arg("--json")
            .arg("add")
            .args(args)
            .output()
            .expect("run todo add");
        assert!(output.status.success(), "todo add failed: {output:?}");
        let payload: Value = serde_json::from_slice(&output.stdout).expect("json output");
        payload["data"]["id"]
            .as_str()
            .expect("task id")
            .to_string()
    }

    /// Run `todo --json list` with extra args and return the tasks array.
    pub fn list(&self, args: &[&str]) -> Vec<Value> {
        let output = self
            .todo_cmd()
            .arg("--json")
            .arg("list")
            .args(args)
            .output()
            .expect("run todo list");
        assert!(output.status.success(), "todo list failed: {output:?}");
        let payload: Value = serde_json::from_slice(&output.stdout).expect("json output");
        payload["data"]["tasks"]
            .as_array()
            .cloned()
            .expect("tasks array")
    }

    pub fn read_db(&self) -> String {
        fs::read_to_string(self.db_path()).expect("read database")
    }

    pub fn write_db(&self, contents: &str) {
        fs::write(self.db_path(), contents).expect("write database");
    }
}
