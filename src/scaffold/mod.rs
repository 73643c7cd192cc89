//! The scaffold orchestrator.
//!
//! Drives one generation run through a fixed sequence of stages:
//!
//! ```text
//! Validate → ParseFields → GenerateModel → GenerateSchema → GenerateValidationRules
//!          → GenerateController → GenerateViews (web only) → GenerateRoutes → Done
//! ```
//!
//! The first failing stage stops the run. Nothing is rolled back: the
//! returned [`ScaffoldFailure`] lists every artifact already written.
//!
//! The model embeds its validation rules, so `GenerateModel` asks the rule
//! generator for them and `GenerateValidationRules` records that same rule set
//! in the report.

mod error;
pub mod module_spec;
pub mod paths;
mod report;
mod sink;

pub use error::ScaffoldError;
pub use module_spec::{ModuleSpec, parse_middleware};
pub use report::{ScaffoldFailure, ScaffoldReport, Stage, Warning, WriteState, WrittenArtifact};
pub use sink::{ArtifactSink, FsSink, MemorySink};

use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, warn};

use crate::config::ConfigFile;
use crate::fields::{FieldError, SOFT_DELETE_COLUMN, TypeMappingTable, parse_fields};
use crate::generators::{
    ColumnSpec, ControllerGenerator, ModelGenerator, RouteGenerator, RuleExpression,
    SchemaGenerator, ValidationRuleGenerator, ViewGenerator,
};
use crate::naming::to_type_name;
use crate::render::{Artifact, ArtifactKind, ROUTES_FILE_HEADER, Render, route_registration};

/// Raw user input for one run, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub model: String,
    pub fields: Vec<String>,
    pub api: bool,
    pub dashboard: bool,
    pub soft_deletes: bool,
    pub force: bool,
    pub middleware: Vec<String>,
}

impl ScaffoldRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.fields = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }
}

/// Mutable progress of a single run.
#[derive(Debug)]
struct RunState {
    current: Stage,
    completed: Vec<Stage>,
    written: Vec<WrittenArtifact>,
    warnings: Vec<Warning>,
    columns: Vec<ColumnSpec>,
    rules: Vec<RuleExpression>,
}

impl RunState {
    fn new() -> Self {
        Self {
            current: Stage::Validate,
            completed: Vec::new(),
            written: Vec::new(),
            warnings: Vec::new(),
            columns: Vec::new(),
            rules: Vec::new(),
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug!(%stage, "entering stage");
        self.current = stage;
    }

    fn complete(&mut self) {
        self.completed.push(self.current);
    }

    fn record(&mut self, kind: ArtifactKind, path: PathBuf, state: WriteState) {
        debug!(%kind, path = %path.display(), %state, "artifact written");
        self.written.push(WrittenArtifact { kind, path, state });
    }
}

pub struct ScaffoldOrchestrator<'a> {
    table: &'a TypeMappingTable,
    config: &'a ConfigFile,
    timestamp: String,
}

impl<'a> ScaffoldOrchestrator<'a> {
    pub fn new(table: &'a TypeMappingTable, config: &'a ConfigFile) -> Self {
        Self {
            table,
            config,
            timestamp: Local::now().format(paths::MIGRATION_TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Fix the migration file name prefix instead of using the current time.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn run(
        &self,
        request: &ScaffoldRequest,
        sink: &mut dyn ArtifactSink,
    ) -> Result<ScaffoldReport, ScaffoldFailure> {
        let mut state = RunState::new();

        match self.execute(request, sink, &mut state) {
            Ok(module) => Ok(ScaffoldReport {
                model: module.model.to_string(),
                table_name: module.table_name(),
                completed_stages: state.completed,
                written: state.written,
                columns: state.columns,
                relations: state
                    .rules
                    .iter()
                    .filter_map(|r| r.exists_table().map(str::to_string))
                    .collect(),
                rules: state.rules,
                warnings: state.warnings,
            }),
            Err(error) => Err(ScaffoldFailure {
                stage: state.current,
                error,
                completed_stages: state.completed,
                written: state.written,
            }),
        }
    }

    fn execute(
        &self,
        request: &ScaffoldRequest,
        sink: &mut dyn ArtifactSink,
        state: &mut RunState,
    ) -> Result<ModuleSpec, ScaffoldError> {
        let dirs = &self.config.paths;

        state.enter(Stage::Validate);
        let model = to_type_name(&request.model)?;
        state.complete();

        state.enter(Stage::ParseFields);
        let fields = parse_fields(request.fields.as_slice())?;
        if request.soft_deletes {
            if let Some(field) = fields.iter().find(|f| f.name == SOFT_DELETE_COLUMN) {
                return Err(FieldError::MalformedFieldToken {
                    token: field.to_string(),
                    reason: "field name is reserved for the soft delete column",
                }
                .into());
            }
        }
        for field in fields.iter().filter(|f| !f.logical_type.is_known()) {
            state.warnings.push(Warning::UnknownFieldType {
                field: field.name.clone(),
                type_name: field.logical_type.to_string(),
            });
        }
        let module = ModuleSpec::new(model, fields)
            .api(request.api)
            .dashboard(request.dashboard)
            .soft_deletes(request.soft_deletes)
            .force_overwrite(request.force)
            .middleware(request.middleware.clone());
        let table_name = module.table_name();
        state.complete();

        state.enter(Stage::GenerateModel);
        let rules = ValidationRuleGenerator::new(self.table).generate(&table_name, &module.fields);
        let model_spec = ModelGenerator::new(self.table).generate(&module, rules.clone());
        self.write(sink, state, &module, paths::model_path(dirs, &module), model_spec.into())?;
        state.complete();

        state.enter(Stage::GenerateSchema);
        let migration =
            SchemaGenerator::new(self.table).generate(&table_name, &module.fields, module.soft_deletes);
        state.columns = migration.columns.clone();
        let target = self.migration_target(sink, &table_name)?;
        self.write(sink, state, &module, target, migration.into())?;
        state.complete();

        state.enter(Stage::GenerateValidationRules);
        state.rules = rules;
        state.complete();

        state.enter(Stage::GenerateController);
        let controller =
            ControllerGenerator::new(self.table, &self.config.messages).generate(&module);
        self.write(sink, state, &module, paths::controller_path(dirs, &module), controller.into())?;
        state.complete();

        if !module.is_api {
            state.enter(Stage::GenerateViews);
            for view in ViewGenerator::new(self.table, &self.config.views).generate(&module) {
                let path = paths::view_path(dirs, &module, view.kind);
                self.write(sink, state, &module, path, view.into())?;
            }
            state.complete();
        }

        state.enter(Stage::GenerateRoutes);
        self.append_routes(sink, state, &module)?;
        state.complete();

        state.enter(Stage::Done);
        state.complete();

        Ok(module)
    }

    /// Write a whole-file artifact, honoring the overwrite policy.
    fn write(
        &self,
        sink: &mut dyn ArtifactSink,
        state: &mut RunState,
        module: &ModuleSpec,
        path: PathBuf,
        artifact: Artifact,
    ) -> Result<(), ScaffoldError> {
        let existed = sink.exists(&path);
        if existed && !module.force_overwrite {
            return Err(ScaffoldError::FileWriteConflict { path });
        }

        if let Err(source) = sink.write(&path, &artifact.render()) {
            return Err(ScaffoldError::Io { path, source });
        }

        let written = if existed {
            WriteState::Overwritten
        } else {
            WriteState::Created
        };
        state.record(artifact.kind(), path, written);
        Ok(())
    }

    /// An existing create-table migration for the table is reused (and so
    /// conflicts); otherwise a new timestamped name is chosen.
    fn migration_target(
        &self,
        sink: &dyn ArtifactSink,
        table_name: &str,
    ) -> Result<PathBuf, ScaffoldError> {
        let dir = &self.config.paths.migrations;
        let existing = sink.list(dir).map_err(|source| ScaffoldError::Io {
            path: dir.clone(),
            source,
        })?;

        Ok(existing
            .into_iter()
            .find(|p| paths::is_migration_for(p, table_name))
            .unwrap_or_else(|| paths::migration_path(&self.config.paths, &self.timestamp, table_name)))
    }

    /// Append the route block unless the file already registers the resource.
    ///
    /// Only the registration line is matched, so a rerun with a different
    /// prefix group or middleware still counts as already registered.
    fn append_routes(
        &self,
        sink: &mut dyn ArtifactSink,
        state: &mut RunState,
        module: &ModuleSpec,
    ) -> Result<(), ScaffoldError> {
        let spec = RouteGenerator::generate(module);
        let path = paths::routes_path(&self.config.paths, spec.file);
        let block = spec.render();
        let registration = route_registration(&spec);

        let current = sink.read(&path).map_err(|source| ScaffoldError::Io {
            path: path.clone(),
            source,
        })?;

        let (contents, written) = match current {
            None => (format!("{}\n{}\n", ROUTES_FILE_HEADER, block), WriteState::Created),
            Some(existing) if existing.contains(&registration) => {
                warn!(path = %path.display(), "route registration already present, skipping");
                state.record(ArtifactKind::Routes, path, WriteState::Unchanged);
                return Ok(());
            }
            Some(mut existing) => {
                if !existing.ends_with('\n') {
                    existing.push('\n');
                }
                existing.push('\n');
                existing.push_str(&block);
                existing.push('\n');
                (existing, WriteState::Appended)
            }
        };

        if let Err(source) = sink.write(&path, &contents) {
            return Err(ScaffoldError::Io { path, source });
        }
        state.record(ArtifactKind::Routes, path, written);
        Ok(())
    }
}
