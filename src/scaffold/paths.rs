//! Target paths of generated artifacts, relative to the project root.

use std::path::{Path, PathBuf};

use super::ModuleSpec;
use crate::config::PathsConfig;
use crate::generators::{RouteFile, ViewKind};

/// `chrono` format of the migration file name prefix.
pub const MIGRATION_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

pub fn model_path(paths: &PathsConfig, module: &ModuleSpec) -> PathBuf {
    paths.models.join(format!("{}.php", module.model))
}

pub fn controller_path(paths: &PathsConfig, module: &ModuleSpec) -> PathBuf {
    let dir = if module.is_dashboard {
        paths.controllers.join("Dashboard")
    } else {
        paths.controllers.clone()
    };
    dir.join(format!("{}.php", module.controller_class()))
}

/// `_create_products_table.php`, shared by every migration for the table.
pub fn migration_suffix(table_name: &str) -> String {
    format!("_create_{}_table.php", table_name)
}

pub fn migration_path(paths: &PathsConfig, timestamp: &str, table_name: &str) -> PathBuf {
    paths
        .migrations
        .join(format!("{}{}", timestamp, migration_suffix(table_name)))
}

/// Whether `path` is a create-table migration for `table_name`.
pub fn is_migration_for(path: &Path, table_name: &str) -> bool {
    let suffix = migration_suffix(table_name);
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(&suffix) && n.len() > suffix.len())
}

pub fn view_path(paths: &PathsConfig, module: &ModuleSpec, kind: ViewKind) -> PathBuf {
    paths.views.join(module.view_dir()).join(kind.file_name())
}

pub fn routes_path(paths: &PathsConfig, file: RouteFile) -> PathBuf {
    paths.routes.join(file.file_name())
}
