//! Output formatting for inspect command results.

use super::execute::{InspectResult, InspectedField};
use crate::output::{Outputable, align_columns};

fn declared_type(field: &InspectedField) -> String {
    if field.modifiers.is_empty() {
        field.logical_type.clone()
    } else {
        format!("{}:{}", field.logical_type, field.modifiers.join(","))
    }
}

fn field_rows(field: &InspectedField) -> Vec<Vec<String>> {
    let control = field.control.map_or("-", |c| c.label()).to_string();
    let mut rows = Vec::new();

    for (i, expression) in field.rules.iter().enumerate() {
        if i == 0 {
            rows.push(vec![
                field.name.clone(),
                declared_type(field),
                field.column.to_string(),
                control.clone(),
                expression.piped(),
            ]);
        } else {
            // element rules of array fields
            rows.push(vec![
                expression.field.clone(),
                String::new(),
                String::new(),
                String::new(),
                expression.piped(),
            ]);
        }
    }
    rows
}

impl Outputable for InspectResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        if self.fields.is_empty() {
            lines.push("No fields declared.".to_string());
        } else {
            lines.push(format!("Fields (table: {}):", self.table_name));
            let mut rows = vec![vec![
                "NAME".to_string(),
                "TYPE".to_string(),
                "COLUMN".to_string(),
                "CONTROL".to_string(),
                "RULES".to_string(),
            ]];
            rows.extend(self.fields.iter().flat_map(field_rows));
            for row in align_columns(&rows) {
                lines.push(format!("  {}", row));
            }

            let relations: Vec<String> = self
                .fields
                .iter()
                .filter_map(|f| f.relation.as_ref().map(|t| format!("{} -> {}", f.name, t)))
                .collect();
            if !relations.is_empty() {
                lines.push(String::new());
                lines.push("Relations:".to_string());
                for relation in relations {
                    lines.push(format!("  {}", relation));
                }
            }
        }

        if !self.warnings.is_empty() {
            lines.push(String::new());
            lines.push("Warnings:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  {}", warning));
            }
        }

        lines.join("\n")
    }
}
