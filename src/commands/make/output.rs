//! Output formatting for make command results.

use super::execute::MakeResult;
use crate::generators::ColumnSpec;
use crate::output::{Outputable, align_columns};

fn column_notes(column: &ColumnSpec) -> String {
    let mut notes = Vec::new();
    if column.nullable {
        notes.push("nullable".to_string());
    }
    if column.unique {
        notes.push("unique".to_string());
    }
    if let Some(fk) = &column.foreign_key {
        notes.push(format!("-> {}.{}", fk.target_table, fk.target_column));
    }
    notes.join(", ")
}

fn push_section(lines: &mut Vec<String>, title: &str, rows: Vec<Vec<String>>) {
    lines.push(String::new());
    lines.push(format!("{}:", title));
    for row in align_columns(&rows) {
        lines.push(format!("  {}", row.trim_end()));
    }
}

impl Outputable for MakeResult {
    fn to_table(&self) -> String {
        let report = &self.report;
        let mut lines = Vec::new();

        if self.dry_run {
            lines.push(format!(
                "Dry run: {} (table: {}), nothing written",
                report.model, report.table_name
            ));
        } else {
            lines.push(format!("Scaffolded {} (table: {})", report.model, report.table_name));
        }

        let artifacts = report
            .written
            .iter()
            .map(|w| {
                vec![
                    w.state.to_string(),
                    w.kind.to_string(),
                    w.path.display().to_string(),
                ]
            })
            .collect();
        push_section(&mut lines, "Artifacts", artifacts);

        let columns = report
            .columns
            .iter()
            .map(|c| vec![c.name.clone(), c.column_type.to_string(), column_notes(c)])
            .collect();
        push_section(&mut lines, "Columns", columns);

        if report.rules.is_empty() {
            lines.push(String::new());
            lines.push("No validation rules.".to_string());
        } else {
            let rules = report
                .rules
                .iter()
                .map(|r| vec![r.field.clone(), r.piped()])
                .collect();
            push_section(&mut lines, "Rules", rules);
        }

        if !report.warnings.is_empty() {
            lines.push(String::new());
            lines.push("Warnings:".to_string());
            for warning in &report.warnings {
                lines.push(format!("  {}", warning));
            }
        }

        lines.join("\n")
    }
}
