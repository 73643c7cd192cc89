//! Template view generation (web mode only).

use serde::Serialize;

use super::form::{FormFieldMarkup, FormMode, TemplateFormGenerator};
use crate::config::ViewsConfig;
use crate::fields::TypeMappingTable;
use crate::scaffold::ModuleSpec;

/// View variable holding the record being edited.
pub const RECORD_VARIABLE: &str = "record";

/// View variable holding the index listing.
pub const RECORDS_VARIABLE: &str = "records";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Index,
    Create,
    Edit,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Index, ViewKind::Create, ViewKind::Edit];

    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Index => "index",
            ViewKind::Create => "create",
            ViewKind::Edit => "edit",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.blade.php", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSpec {
    pub kind: ViewKind,
    /// Directory below the views root (`products`, `dashboard/products`)
    pub view_dir: String,
    pub title: String,
    pub layout: String,
    pub route_name: String,
    pub table_component: String,
    /// Index columns: `id` followed by every declared field
    pub columns: Vec<String>,
    /// Form controls, empty for the index view
    pub form: Vec<FormFieldMarkup>,
    pub multipart: bool,
}

pub struct ViewGenerator<'a> {
    table: &'a TypeMappingTable,
    views: &'a ViewsConfig,
}

impl<'a> ViewGenerator<'a> {
    pub fn new(table: &'a TypeMappingTable, views: &'a ViewsConfig) -> Self {
        Self { table, views }
    }

    /// Index, create and edit views; none in API mode.
    pub fn generate(&self, module: &ModuleSpec) -> Vec<ViewSpec> {
        if module.is_api {
            return Vec::new();
        }
        ViewKind::ALL
            .iter()
            .map(|kind| self.generate_view(module, *kind))
            .collect()
    }

    fn generate_view(&self, module: &ModuleSpec, kind: ViewKind) -> ViewSpec {
        let forms = TemplateFormGenerator::new(self.table);

        let (columns, form, multipart) = match kind {
            ViewKind::Index => {
                let columns = std::iter::once("id".to_string())
                    .chain(module.fields.iter().map(|f| f.name.clone()))
                    .collect();
                (columns, Vec::new(), false)
            }
            ViewKind::Create => (
                Vec::new(),
                forms.generate(&module.fields, FormMode::Create),
                forms.requires_multipart(&module.fields),
            ),
            ViewKind::Edit => (
                Vec::new(),
                forms.generate(&module.fields, FormMode::Edit),
                forms.requires_multipart(&module.fields),
            ),
        };

        ViewSpec {
            kind,
            view_dir: module.view_dir(),
            title: module.model.to_string(),
            layout: self.views.layout.clone(),
            route_name: module.route_name(),
            table_component: self.views.table_component.clone(),
            columns,
            form,
            multipart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::parse_fields;
    use crate::naming::to_type_name;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> TypeMappingTable {
        TypeMappingTable::standard()
    }

    fn module(tokens: &[&str]) -> ModuleSpec {
        ModuleSpec::new(to_type_name("Product").unwrap(), parse_fields(tokens).unwrap())
    }

    #[rstest]
    fn test_api_mode_has_no_views(table: TypeMappingTable) {
        let views = ViewsConfig::default();
        let specs = ViewGenerator::new(&table, &views).generate(&module(&["title"]).api(true));
        assert!(specs.is_empty());
    }

    #[rstest]
    fn test_web_mode_generates_three_views(table: TypeMappingTable) {
        let views = ViewsConfig::default();
        let specs = ViewGenerator::new(&table, &views).generate(&module(&["title", "price:decimal"]));
        let kinds: Vec<_> = specs.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, ViewKind::ALL.to_vec());

        let index = &specs[0];
        assert_eq!(index.columns, vec!["id", "title", "price"]);
        assert!(index.form.is_empty());
        assert_eq!(index.layout, "app-layout");
        assert_eq!(index.table_component, "autocrud::table");

        assert_eq!(specs[1].form.len(), 2);
        assert!(specs[1].form.iter().all(|f| f.mode == FormMode::Create));
        assert!(specs[2].form.iter().all(|f| f.mode == FormMode::Edit));
    }

    #[rstest]
    fn test_multipart_only_on_forms(table: TypeMappingTable) {
        let views = ViewsConfig::default();
        let specs = ViewGenerator::new(&table, &views).generate(&module(&["cover:image"]));
        let multipart: Vec<_> = specs.iter().map(|v| v.multipart).collect();
        assert_eq!(multipart, vec![false, true, true]);
    }

    #[rstest]
    fn test_dashboard_view_dir(table: TypeMappingTable) {
        let views = ViewsConfig::default();
        let specs = ViewGenerator::new(&table, &views).generate(&module(&[]).dashboard(true));
        assert!(specs.iter().all(|v| v.view_dir == "dashboard/products"));
        assert!(specs.iter().all(|v| v.route_name == "dashboard.products"));
    }

    #[rstest]
    fn test_file_names() {
        let names: Vec<_> = ViewKind::ALL.iter().map(ViewKind::file_name).collect();
        assert_eq!(names, vec!["index.blade.php", "create.blade.php", "edit.blade.php"]);
    }
}
