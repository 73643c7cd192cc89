//! Outcome of a scaffold run.

use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use super::ScaffoldError;
use crate::generators::{ColumnSpec, RuleExpression};
use crate::render::ArtifactKind;

/// Orchestrator stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validate,
    ParseFields,
    GenerateModel,
    GenerateSchema,
    GenerateValidationRules,
    GenerateController,
    GenerateViews,
    GenerateRoutes,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::ParseFields => "parse fields",
            Stage::GenerateModel => "generate model",
            Stage::GenerateSchema => "generate schema",
            Stage::GenerateValidationRules => "generate validation rules",
            Stage::GenerateController => "generate controller",
            Stage::GenerateViews => "generate views",
            Stage::GenerateRoutes => "generate routes",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// What happened to a target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteState {
    Created,
    Overwritten,
    Appended,
    /// Routes file already held the registration
    Unchanged,
}

impl fmt::Display for WriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteState::Created => "created",
            WriteState::Overwritten => "overwritten",
            WriteState::Appended => "appended",
            WriteState::Unchanged => "unchanged",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifact {
    pub kind: ArtifactKind,
    /// Relative to the project root
    pub path: PathBuf,
    pub state: WriteState,
}

/// Non-fatal finding collected during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    UnknownFieldType { field: String, type_name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownFieldType { field, type_name } => write!(
                f,
                "field '{}' has unknown type '{}', generated as a plain string",
                field, type_name
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub model: String,
    pub table_name: String,
    pub completed_stages: Vec<Stage>,
    pub written: Vec<WrittenArtifact>,
    pub columns: Vec<ColumnSpec>,
    pub rules: Vec<RuleExpression>,
    /// Tables referenced by `exists` rules, in field order
    pub relations: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl ScaffoldReport {
    pub fn written_of(&self, kind: ArtifactKind) -> impl Iterator<Item = &WrittenArtifact> {
        self.written.iter().filter(move |w| w.kind == kind)
    }
}

/// A run that stopped early. Files already written stay on disk.
#[derive(Debug)]
pub struct ScaffoldFailure {
    pub stage: Stage,
    pub error: ScaffoldError,
    pub completed_stages: Vec<Stage>,
    pub written: Vec<WrittenArtifact>,
}

impl fmt::Display for ScaffoldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.error)?;
        if !self.written.is_empty() {
            write!(f, "\nAlready written:")?;
            for artifact in &self.written {
                write!(f, "\n  {}", artifact.path.display())?;
            }
        }
        Ok(())
    }
}

impl Error for ScaffoldFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
