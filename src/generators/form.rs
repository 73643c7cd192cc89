//! Form control generation for create/edit views.
//!
//! Fields whose type has no form control in the mapping table (unrecognized
//! types) are left out of the form.

use serde::Serialize;

use crate::fields::{FieldSpec, FormControl, TypeMappingTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// Values come from previously submitted input only
    Create,
    /// Values come from previous input, falling back to the record attribute
    Edit,
}

/// Collection a select control iterates over.
///
/// Supplied by the controller; the form only emits the iteration markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsSource {
    pub collection: String,
    pub value_attribute: &'static str,
    pub label_attribute: &'static str,
}

/// One form control, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormFieldMarkup {
    pub field: String,
    pub control: FormControl,
    pub mode: FormMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsSource>,
}

impl FormFieldMarkup {
    pub fn prefills_from_record(&self) -> bool {
        self.mode == FormMode::Edit
    }
}

pub struct TemplateFormGenerator<'a> {
    table: &'a TypeMappingTable,
}

impl<'a> TemplateFormGenerator<'a> {
    pub fn new(table: &'a TypeMappingTable) -> Self {
        Self { table }
    }

    pub fn generate(&self, fields: &[FieldSpec], mode: FormMode) -> Vec<FormFieldMarkup> {
        fields
            .iter()
            .filter_map(|field| {
                let control = self.table.lookup(&field.logical_type).control?;
                let options = matches!(control, FormControl::Select).then(|| OptionsSource {
                    collection: field.related_table(),
                    value_attribute: "id",
                    label_attribute: "name",
                });
                Some(FormFieldMarkup {
                    field: field.name.clone(),
                    control,
                    mode,
                    options,
                })
            })
            .collect()
    }

    /// Whether a form over `fields` must be submitted as multipart.
    pub fn requires_multipart(&self, fields: &[FieldSpec]) -> bool {
        fields.iter().any(|field| {
            self.table
                .lookup(&field.logical_type)
                .control
                .is_some_and(|c| c.is_upload())
        })
    }
}
