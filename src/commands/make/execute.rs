use std::error::Error;

use serde::Serialize;

use super::MakeCmd;
use crate::commands::Execute;
use crate::config::Project;
use crate::fields::TypeMappingTable;
use crate::scaffold::{
    FsSink, MemorySink, ScaffoldOrchestrator, ScaffoldReport, ScaffoldRequest, parse_middleware,
};

/// Result of the make command execution
#[derive(Debug, Serialize)]
pub struct MakeResult {
    /// Nothing was written; `written` lists what would have been
    pub dry_run: bool,
    #[serde(flatten)]
    pub report: ScaffoldReport,
}

impl MakeCmd {
    fn request(&self) -> ScaffoldRequest {
        ScaffoldRequest {
            model: self.model.clone(),
            fields: self.fields.clone(),
            api: self.api,
            dashboard: self.dashboard,
            soft_deletes: self.soft_deletes,
            force: self.force,
            middleware: parse_middleware(&self.middleware),
        }
    }
}

impl Execute for MakeCmd {
    type Output = MakeResult;

    fn execute(self, project: &Project) -> Result<Self::Output, Box<dyn Error>> {
        let table = TypeMappingTable::standard();
        let orchestrator = ScaffoldOrchestrator::new(&table, &project.config);
        let request = self.request();
        let fs = FsSink::new(&project.root);

        let report = if self.dry_run {
            let mut sink = MemorySink::over(fs);
            orchestrator.run(&request, &mut sink)?
        } else {
            let mut sink = fs;
            orchestrator.run(&request, &mut sink)?
        };

        Ok(MakeResult {
            dry_run: self.dry_run,
            report,
        })
    }
}
