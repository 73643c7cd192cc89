//! Controller generation.
//!
//! API controllers answer with JSON; web controllers render the generated views
//! and redirect back to the index with a flash message.

use serde::Serialize;

use crate::config::FlashMessages;
use crate::fields::{FormControl, TypeMappingTable};
use crate::scaffold::ModuleSpec;

/// Disk that uploaded files are stored on.
pub const UPLOAD_DISK: &str = "public";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    Api,
    Web,
}

impl ControllerKind {
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            ControllerKind::Api => &["index", "store", "show", "update", "destroy"],
            ControllerKind::Web => &[
                "index", "create", "store", "show", "edit", "update", "destroy",
            ],
        }
    }
}

/// Options collection passed to the create/edit views for one select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsCollection {
    /// View variable, also the related table (`categories`)
    pub variable: String,
    pub related_model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadField {
    pub field: String,
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerSpec {
    pub kind: ControllerKind,
    pub namespace: String,
    pub class_name: String,
    pub model_class: String,
    /// Route parameter bound to the model (`$product`)
    pub model_variable: String,
    pub route_name: String,
    pub view_prefix: String,
    pub options: Vec<OptionsCollection>,
    pub uploads: Vec<UploadField>,
    pub upload_disk: &'static str,
    /// Directory on the upload disk, the table name
    pub upload_dir: String,
    pub messages: FlashMessages,
    /// `update` passes the bound record's key to `rules()` so unique checks skip it
    pub scopes_unique_rules: bool,
}

impl ControllerSpec {
    pub fn actions(&self) -> &'static [&'static str] {
        self.kind.actions()
    }

    pub fn handles_uploads(&self) -> bool {
        !self.uploads.is_empty()
    }
}

pub struct ControllerGenerator<'a> {
    table: &'a TypeMappingTable,
    messages: &'a FlashMessages,
}

impl<'a> ControllerGenerator<'a> {
    pub fn new(table: &'a TypeMappingTable, messages: &'a FlashMessages) -> Self {
        Self { table, messages }
    }

    pub fn generate(&self, module: &ModuleSpec) -> ControllerSpec {
        let kind = if module.is_api {
            ControllerKind::Api
        } else {
            ControllerKind::Web
        };

        let mut options: Vec<OptionsCollection> = Vec::new();
        for field in module.select_fields() {
            let variable = field.related_table();
            if options.iter().all(|o| o.variable != variable) {
                options.push(OptionsCollection {
                    variable,
                    related_model: field.related_model(),
                });
            }
        }

        let uploads = module
            .fields
            .iter()
            .filter_map(|f| match self.table.lookup(&f.logical_type).control {
                Some(FormControl::FileInput { multiple, .. }) => Some(UploadField {
                    field: f.name.clone(),
                    multiple,
                }),
                _ => None,
            })
            .collect();

        ControllerSpec {
            kind,
            namespace: module.controller_namespace(),
            class_name: module.controller_class(),
            model_class: module.model.to_string(),
            model_variable: module.model.variable(),
            route_name: module.route_name(),
            view_prefix: module.view_prefix(),
            options,
            uploads,
            upload_disk: UPLOAD_DISK,
            upload_dir: module.table_name(),
            messages: self.messages.clone(),
            scopes_unique_rules: module.fields.iter().any(|f| f.is_unique()),
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
    fn test_web_controller(table: TypeMappingTable) {
        let messages = FlashMessages::default();
        let spec = ControllerGenerator::new(&table, &messages)
            .generate(&module(&["title", "category_id:select"]));

        assert_eq!(spec.kind, ControllerKind::Web);
        assert_eq!(spec.namespace, r"App\Http\Controllers");
        assert_eq!(spec.class_name, "ProductController");
        assert_eq!(spec.model_variable, "product");
        assert_eq!(spec.route_name, "products");
        assert_eq!(spec.view_prefix, "products");
        assert_eq!(spec.actions().len(), 7);
        assert_eq!(
            spec.options,
            vec![OptionsCollection {
                variable: "categories".to_string(),
                related_model: "Category".to_string(),
            }]
        );
        assert!(!spec.handles_uploads());
    }

    #[rstest]
    fn test_unique_field_scopes_update_rules(table: TypeMappingTable) {
        let messages = FlashMessages::default();
        let generator = ControllerGenerator::new(&table, &messages);
        assert!(generator.generate(&module(&["sku:string:unique"])).scopes_unique_rules);
        assert!(!generator.generate(&module(&["title"])).scopes_unique_rules);
    }

    #[rstest]
    fn test_api_controller(table: TypeMappingTable) {
        let messages = FlashMessages::default();
        let spec = ControllerGenerator::new(&table, &messages).generate(&module(&["title"]).api(true));
        assert_eq!(spec.kind, ControllerKind::Api);
        assert_eq!(
            spec.actions(),
            &["index", "store", "show", "update", "destroy"]
        );
    }

    #[rstest]
    fn test_dashboard_controller(table: TypeMappingTable) {
        let messages = FlashMessages::default();
        let spec = ControllerGenerator::new(&table, &messages)
            .generate(&module(&["title"]).dashboard(true));
        assert_eq!(spec.namespace, r"App\Http\Controllers\Dashboard");
        assert_eq!(spec.route_name, "dashboard.products");
        assert_eq!(spec.view_prefix, "dashboard.products");
    }

    #[rstest]
    fn test_uploads(table: TypeMappingTable) {
        let messages = FlashMessages::default();
        let spec = ControllerGenerator::new(&table, &messages)
            .generate(&module(&["title", "manual:file", "photos:images"]));
        assert_eq!(
            spec.uploads,
            vec![
                UploadField {
                    field: "manual".to_string(),
                    multiple: false,
                },
                UploadField {
                    field: "photos".to_string(),
                    multiple: true,
                },
            ]
        );
        assert_eq!(spec.upload_disk, "public");
        assert_eq!(spec.upload_dir, "products");
    }

    #[rstest]
    fn test_options_deduplicated_per_table(table: TypeMappingTable) {
        let messages = FlashMessages::default();
        let spec = ControllerGenerator::new(&table, &messages)
            .generate(&module(&["category_id:select", "category:select"]));
        assert_eq!(spec.options.len(), 1);
    }

    #[rstest]
    fn test_messages_come_from_config(table: TypeMappingTable) {
        let messages = FlashMessages {
            created: "Saved".to_string(),
            ..FlashMessages::default()
        };
        let spec = ControllerGenerator::new(&table, &messages).generate(&module(&[]));
        assert_eq!(spec.messages.created, "Saved");
        assert_eq!(spec.messages.deleted, "Deleted successfully");
    }
}
