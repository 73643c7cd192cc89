//! Shared test utilities for execute and integration tests.
//!
//! Execute tests run commands against a throwaway project directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::commands::Execute;
use crate::config::{CONFIG_FILE_NAME, Project};

/// Create an empty project in a fresh temporary directory.
pub fn temp_project() -> (TempDir, Project) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let project = Project::open(dir.path()).expect("Empty project should open");
    (dir, project)
}

/// Create a project whose `.autocrud.json` holds `config`.
pub fn temp_project_with_config(config: &str) -> (TempDir, Project) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join(CONFIG_FILE_NAME), config).expect("Failed to write config");
    let project = Project::open(dir.path()).expect("Config should load");
    (dir, project)
}

/// Write `content` to `relative` under `root`, creating parent directories.
pub fn seed_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(path, content).expect("Failed to seed file");
}

/// Read a file under `root`, `None` if it does not exist.
pub fn read_file(root: &Path, relative: &str) -> Option<String> {
    fs::read_to_string(root.join(relative)).ok()
}

/// Execute a command against a project and return the result.
pub fn execute_cmd<C: Execute>(
    cmd: C,
    project: &Project,
) -> Result<C::Output, Box<dyn std::error::Error>> {
    cmd.execute(project)
}
