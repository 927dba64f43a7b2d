//! todo init command implementation
//!
//! Records the database location in the config file and creates (or resets)
//! the database itself. Without `--db-path` the location is asked for, with
//! the default offered.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::prompt;
use crate::config::{self, Config};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Database;

pub struct InitOptions {
    pub db_path: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct InitReport {
    config: PathBuf,
    database: PathBuf,
}

pub fn run(options: InitOptions) -> Result<()> {
    let config_dir = options
        .config_dir
        .unwrap_or_else(config::default_config_dir);
    let db_path = match options.db_path {
        Some(path) => path,
        None => {
            let default = config::default_database_path();
            let default = default.display().to_string();
            PathBuf::from(prompt::ask("to-do database location?", &default)?)
        }
    };

    config::init_app(&config_dir, &db_path).into_result()?;

    // Re-read so the report shows exactly what later commands will use
    let config_path = config::config_file(&config_dir);
    let config = Config::load(&config_path)?;
    let database = Database::new(config.database_path());
    database.initialize().into_result()?;
    tracing::info!(database = %database.path().display(), "database initialized");

    let report = InitReport {
        config: config_path.clone(),
        database: database.path().to_path_buf(),
    };

    let mut human = HumanOutput::new(format!(
        "The to-do database is {}",
        database.path().display()
    ));
    human.push_summary("Config", config_path.display().to_string());
    human.push_next_step("todo add <title>");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "init",
        &report,
        Some(&human),
    )
}
