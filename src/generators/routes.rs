//! Route registration generation.

use serde::Serialize;

use crate::scaffold::ModuleSpec;
use crate::scaffold::module_spec::DASHBOARD_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteFile {
    Web,
    Api,
}

impl RouteFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            RouteFile::Web => "web.php",
            RouteFile::Api => "api.php",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    pub file: RouteFile,
    /// Resource URI segment, the table name
    pub resource: String,
    pub controller_fqcn: String,
    pub middleware: Vec<String>,
    /// URI prefix and name prefix (`dashboard` / `dashboard.`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<&'static str>,
}

impl RouteSpec {
    pub fn is_api(&self) -> bool {
        self.file == RouteFile::Api
    }

    /// Whether the resource registration must be wrapped in a route group.
    pub fn is_grouped(&self) -> bool {
        self.prefix.is_some() || !self.middleware.is_empty()
    }
}

pub struct RouteGenerator;

impl RouteGenerator {
    pub fn generate(module: &ModuleSpec) -> RouteSpec {
        RouteSpec {
            file: if module.is_api {
                RouteFile::Api
            } else {
                RouteFile::Web
            },
            resource: module.table_name(),
            controller_fqcn: module.controller_fqcn(),
            middleware: module.middleware.clone(),
            prefix: module.is_dashboard.then_some(DASHBOARD_PREFIX),
        }
    }
}
