use std::error::Error;
use std::slice;

use serde::Serialize;

use super::InspectCmd;
use crate::commands::Execute;
use crate::config::Project;
use crate::fields::{ColumnType, FieldSpec, FormControl, TypeMappingTable, parse_fields};
use crate::generators::{RuleExpression, ValidationRuleGenerator};
use crate::naming::to_type_name;
use crate::scaffold::Warning;

/// Table name used in `unique` rules when no model is given.
pub const TABLE_PLACEHOLDER: &str = "{table}";

/// A parsed field with everything the mapping table resolves for it
#[derive(Debug, Clone, Serialize)]
pub struct InspectedField {
    pub name: String,
    pub logical_type: String,
    pub modifiers: Vec<String>,
    pub column: ColumnType,
    pub rules: Vec<RuleExpression>,
    pub control: Option<FormControl>,
    /// Table the field points at, for relation fields
    pub relation: Option<String>,
}

/// Result of the inspect command execution
#[derive(Debug, Serialize)]
pub struct InspectResult {
    pub table_name: String,
    pub fields: Vec<InspectedField>,
    pub warnings: Vec<Warning>,
}

fn inspect_field(
    table: &TypeMappingTable,
    generator: &ValidationRuleGenerator<'_>,
    table_name: &str,
    field: &FieldSpec,
) -> InspectedField {
    let mapping = table.lookup(&field.logical_type);
    let rules = generator.generate(table_name, slice::from_ref(field));
    let relation = rules
        .iter()
        .find_map(|r| r.exists_table())
        .map(str::to_string);

    InspectedField {
        name: field.name.clone(),
        logical_type: field.logical_type.to_string(),
        modifiers: field.modifiers.iter().map(|m| m.to_string()).collect(),
        column: mapping.column,
        rules,
        control: mapping.control,
        relation,
    }
}

impl Execute for InspectCmd {
    type Output = InspectResult;

    fn execute(self, _project: &Project) -> Result<Self::Output, Box<dyn Error>> {
        let table_name = match &self.model {
            Some(model) => to_type_name(model)?.plural_snake(),
            None => TABLE_PLACEHOLDER.to_string(),
        };

        let fields = parse_fields(self.fields.as_slice())?;
        let table = TypeMappingTable::standard();
        let generator = ValidationRuleGenerator::new(&table);

        let warnings = fields
            .iter()
            .filter(|f| !f.logical_type.is_known())
            .map(|f| Warning::UnknownFieldType {
                field: f.name.clone(),
                type_name: f.logical_type.to_string(),
            })
            .collect();

        Ok(InspectResult {
            fields: fields
                .iter()
                .map(|f| inspect_field(&table, &generator, &table_name, f))
                .collect(),
            table_name,
            warnings,
        })
    }
}
