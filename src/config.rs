//! Project configuration handling.
//!
//! Loads the optional `.autocrud.json` file from the project root. Every key is
//! defaulted, so a missing file or a partial file is fine; a file that exists
//! but cannot be read or parsed is an error.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".autocrud.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Where generated artifacts are written, relative to the project root
    pub paths: PathsConfig,
    /// Blade components referenced by generated views
    pub views: ViewsConfig,
    /// Flash message literals used by web controllers
    pub messages: FlashMessages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub models: PathBuf,
    pub controllers: PathBuf,
    pub migrations: PathBuf,
    pub views: PathBuf,
    pub routes: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            models: PathBuf::from("app/Models"),
            controllers: PathBuf::from("app/Http/Controllers"),
            migrations: PathBuf::from("database/migrations"),
            views: PathBuf::from("resources/views"),
            routes: PathBuf::from("routes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Layout component wrapping every view (`<x-app-layout>`)
    pub layout: String,
    /// Data table component used by index views
    pub table_component: String,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            layout: "app-layout".to_string(),
            table_component: "autocrud::table".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashMessages {
    pub created: String,
    pub updated: String,
    pub deleted: String,
}

impl Default for FlashMessages {
    fn default() -> Self {
        Self {
            created: "Created successfully".to_string(),
            updated: "Updated successfully".to_string(),
            deleted: "Deleted successfully".to_string(),
        }
    }
}

impl ConfigFile {
    /// Load `.autocrud.json` from `root`, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The JSON is invalid or a key has the wrong type
    /// - The top level or a `paths`/`views`/`messages` section is not an object
    pub fn load(root: &Path) -> Result<Self, Box<dyn Error>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            Box::new(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", config_path.display(), e),
            )) as Box<dyn Error>
        })?;

        let value: serde_json::Value = serde_json::from_str(&content).map_err(invalid_config)?;
        check_sections(&value).map_err(invalid_config)?;
        let config: ConfigFile = serde_json::from_value(value).map_err(invalid_config)?;

        Ok(config)
    }
}

/// Sections of the config file; each one must be a JSON object when present.
const SECTIONS: [&str; 3] = ["paths", "views", "messages"];

/// serde accepts a JSON array for a struct, so `"messages": []` would
/// otherwise load as defaults. Reject any non-object shape up front.
fn check_sections(value: &serde_json::Value) -> Result<(), String> {
    let Some(root) = value.as_object() else {
        return Err("the top level must be an object".to_string());
    };
    for section in SECTIONS {
        if let Some(entry) = root.get(section) {
            if !entry.is_object() {
                return Err(format!("`{}` must be an object", section));
            }
        }
    }
    Ok(())
}

fn invalid_config(detail: impl std::fmt::Display) -> Box<dyn Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!(
            "Invalid JSON in {}: {}\n\n\
             Example:\n\
             {{\n  \
               \"paths\": {{ \"models\": \"app/Models\" }},\n  \
               \"views\": {{ \"layout\": \"app-layout\" }},\n  \
               \"messages\": {{ \"created\": \"Created successfully\" }}\n\
             }}\n",
            CONFIG_FILE_NAME, detail
        ),
    ))
}

/// A project root together with its loaded configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ConfigFile,
}

impl Project {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, Box<dyn Error>> {
        let root = root.into();
        let config = ConfigFile::load(&root)?;
        Ok(Self { root, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        fs::write(dir.path().join(CONFIG_FILE_NAME), content).unwrap();
    }

    #[rstest]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load(dir.path()).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.paths.models, PathBuf::from("app/Models"));
        assert_eq!(config.views.table_component, "autocrud::table");
        assert_eq!(config.messages.deleted, "Deleted successfully");
    }

    #[rstest]
    fn test_empty_object_yields_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "{}");
        assert_eq!(ConfigFile::load(dir.path()).unwrap(), ConfigFile::default());
    }

    #[rstest]
    fn test_partial_override_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            {
                "paths": { "views": "resources/templates" },
                "messages": { "created": "Saved" }
            }
            "#,
        );
        let config = ConfigFile::load(dir.path()).unwrap();
        assert_eq!(config.paths.views, PathBuf::from("resources/templates"));
        assert_eq!(config.paths.models, PathBuf::from("app/Models"));
        assert_eq!(config.messages.created, "Saved");
        assert_eq!(config.messages.updated, "Updated successfully");
        assert_eq!(config.views, ViewsConfig::default());
    }

    #[rstest]
    #[case("{ not json")]
    #[case(r#"{ "paths": { "models": 42 } }"#)]
    #[case(r#"{ "messages": [] }"#)]
    #[case(r#"{ "paths": ["app/Models"] }"#)]
    #[case(r#"{ "views": "app-layout" }"#)]
    #[case("[]")]
    fn test_invalid_json_is_error(#[case] content: &str) {
        let dir = TempDir::new().unwrap();
        write_config(&dir, content);
        let err = ConfigFile::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[rstest]
    #[case(r#"{ "messages": [] }"#, "`messages` must be an object")]
    #[case(r#"{ "views": null }"#, "`views` must be an object")]
    #[case("42", "the top level must be an object")]
    fn test_non_object_section_names_the_key(#[case] content: &str, #[case] detail: &str) {
        let dir = TempDir::new().unwrap();
        write_config(&dir, content);
        let err = ConfigFile::load(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with(&format!("Invalid JSON in {}: {}", CONFIG_FILE_NAME, detail)));
    }

    #[rstest]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, r#"{ "extra": [1, 2] }"#);
        assert_eq!(ConfigFile::load(dir.path()).unwrap(), ConfigFile::default());
    }

    #[rstest]
    fn test_project_open() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, r#"{ "views": { "layout": "admin-layout" } }"#);
        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.root, dir.path());
        assert_eq!(project.config.views.layout, "admin-layout");
    }
}
