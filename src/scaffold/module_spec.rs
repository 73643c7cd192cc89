//! The validated generation request for one model.

use serde::Serialize;

use crate::fields::{FieldSpec, LogicalType};
use crate::naming::TypeName;

/// Route/view/controller prefix used in dashboard mode.
pub const DASHBOARD_PREFIX: &str = "dashboard";

/// Base namespace of generated controllers.
pub const CONTROLLER_NAMESPACE: &str = r"App\Http\Controllers";

/// Namespace of generated models.
pub const MODEL_NAMESPACE: &str = r"App\Models";

/// Everything the generators need for one run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSpec {
    pub model: TypeName,
    #[serde(skip)]
    pub fields: Vec<FieldSpec>,
    pub is_api: bool,
    pub is_dashboard: bool,
    pub soft_deletes: bool,
    pub force_overwrite: bool,
    pub middleware: Vec<String>,
}

impl ModuleSpec {
    pub fn new(model: TypeName, fields: Vec<FieldSpec>) -> Self {
        Self {
            model,
            fields,
            is_api: false,
            is_dashboard: false,
            soft_deletes: false,
            force_overwrite: false,
            middleware: Vec::new(),
        }
    }

    pub fn api(mut self, is_api: bool) -> Self {
        self.is_api = is_api;
        self
    }

    pub fn dashboard(mut self, is_dashboard: bool) -> Self {
        self.is_dashboard = is_dashboard;
        self
    }

    pub fn soft_deletes(mut self, soft_deletes: bool) -> Self {
        self.soft_deletes = soft_deletes;
        self
    }

    pub fn force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn middleware(mut self, middleware: Vec<String>) -> Self {
        self.middleware = middleware;
        self
    }

    /// `Product` → `products`
    pub fn table_name(&self) -> String {
        self.model.plural_snake()
    }

    /// Named-route prefix: `products` or `dashboard.products`.
    pub fn route_name(&self) -> String {
        if self.is_dashboard {
            format!("{}.{}", DASHBOARD_PREFIX, self.table_name())
        } else {
            self.table_name()
        }
    }

    /// View directory below the views root: `products` or `dashboard/products`.
    pub fn view_dir(&self) -> String {
        if self.is_dashboard {
            format!("{}/{}", DASHBOARD_PREFIX, self.table_name())
        } else {
            self.table_name()
        }
    }

    /// Dotted view name prefix: `products` or `dashboard.products`.
    pub fn view_prefix(&self) -> String {
        self.view_dir().replace('/', ".")
    }

    pub fn controller_class(&self) -> String {
        format!("{}Controller", self.model)
    }

    pub fn controller_namespace(&self) -> String {
        if self.is_dashboard {
            format!(r"{}\Dashboard", CONTROLLER_NAMESPACE)
        } else {
            CONTROLLER_NAMESPACE.to_string()
        }
    }

    /// Fully qualified controller class name.
    pub fn controller_fqcn(&self) -> String {
        format!(r"{}\{}", self.controller_namespace(), self.controller_class())
    }

    /// Fields rendered as dropdowns, whose options the controller must supply.
    pub fn select_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields
            .iter()
            .filter(|f| f.logical_type == LogicalType::Select)
    }
}

/// Split a comma-separated middleware list, dropping blanks and duplicates.
pub fn parse_middleware(raw: &str) -> Vec<String> {
    let mut middleware: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !middleware.iter().any(|m| m == name) {
            middleware.push(name.to_string());
        }
    }
    middleware
}
