//! Shared output formatting for todo CLI commands.

use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};
use serde::Serialize;

use crate::error::{Error, JsonError, Outcome, Result};

pub const SCHEMA_VERSION: &str = "todo.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Color of the header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Danger,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Info => Color::Blue,
            Tone::Danger => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    tone: Tone,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            tone: Tone::Success,
            summary: Vec::new(),
            details: Vec::new(),
            warnings: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let warnings = human.map(|h| h.warnings.clone()).unwrap_or_default();
        let next_steps = human.map(|h| h.next_steps.clone()).unwrap_or_default();

        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            warnings: Vec<String>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            warnings,
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    if let Some(human) = human {
        let color = std::io::stdout().is_terminal();
        println!("{}", render_human(human, color));
    }

    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    let hint = next_steps.first().map(|step| step.as_str());
    if json {
        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: JsonError,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: JsonError::from(err),
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let message = format!("error: {}", error_message(command, err));
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message.with(Tone::Danger.color()));
    } else {
        eprintln!("{message}");
    }
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// Plain-text rendering of a [`HumanOutput`]
pub fn format_human(output: &HumanOutput) -> String {
    render_human(output, false)
}

fn render_human(output: &HumanOutput, color: bool) -> String {
    let mut lines = Vec::new();
    if color {
        lines.push(output.header.clone().with(output.tone.color()).to_string());
    } else {
        lines.push(output.header.clone());
    }

    push_summary(&mut lines, &output.summary);
    push_details(&mut lines, &output.details);
    push_section(&mut lines, "Warnings", &output.warnings);
    push_section(&mut lines, "Next steps", &output.next_steps);

    lines.join("\n")
}

pub fn infer_command_name_from_args() -> String {
    std::env::args()
        .skip(1)
        .find(|arg| matches!(arg.as_str(), "init" | "add" | "list" | "complete" | "remove"))
        .unwrap_or_else(|| "todo".to_string())
}

/// Operation failures read like `Adding to-do item failed with "..."`.
fn error_message(command: &str, err: &Error) -> String {
    let Error::Operation(outcome) = err else {
        return err.to_string();
    };
    let action = match command {
        "init" => "Creating the to-do database",
        "add" => "Adding to-do item",
        "complete" => "Completing to-do item",
        "remove" => "Removing to-do item",
        "list" => "Listing to-do items",
        _ => return err.to_string(),
    };
    format!("{action} failed with \"{outcome}\"")
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::ConfigNotFound(_) | Error::DatabaseNotFound(_) => vec!["todo init".to_string()],
        Error::InvalidConfig(_) | Error::TomlParse(_) => {
            vec!["todo init --db-path <path>".to_string()]
        }
        Error::Operation(Outcome::IdNotFound) => vec!["todo list".to_string()],
        Error::Operation(Outcome::DecodeError) => {
            vec!["fix or re-initialize the database file".to_string()]
        }
        _ => Vec::new(),
    }
}

fn push_summary(lines: &mut Vec<String>, summary: &[(String, String)]) {
    if summary.is_empty() {
        return;
    }

    lines.push(String::new());
    for (key, value) in summary {
        if value.is_empty() {
            lines.push(format!("- {key}"));
        } else {
            lines.push(format!("- {key}: {value}"));
        }
    }
}

fn push_details(lines: &mut Vec<String>, details: &[String]) {
    if details.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.extend(details.iter().cloned());
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push(format!("{title}:"));
    for item in items {
        lines.push(format!("- {item}"));
    }
}
