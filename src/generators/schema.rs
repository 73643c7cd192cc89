//! Schema (migration) generation.
//!
//! Turns the field list into a [`MigrationSpec`]: an ordered column list with
//! inferred foreign keys, plus the implicit identity, soft-delete and timestamp
//! columns. Whether the migration file may be written is decided by the
//! orchestrator, not here.

use serde::Serialize;

use crate::fields::{ColumnType, FieldSpec, TypeMappingTable};

/// Why a column exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Identity,
    Field,
    SoftDelete,
    Timestamp,
}

/// Foreign key constraint on a relation column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub target_table: String,
    pub target_column: &'static str,
    pub on_delete: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
    pub role: ColumnRole,
    pub nullable: bool,
    pub unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,
}

impl ColumnSpec {
    fn implicit(name: &str, column_type: ColumnType, role: ColumnRole, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            role,
            nullable,
            unique: false,
            foreign_key: None,
        }
    }
}

/// One step of a migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStep<'a> {
    CreateTable {
        table: &'a str,
        columns: &'a [ColumnSpec],
    },
    DropTableIfExists {
        table: &'a str,
    },
}

/// Description of a create-table migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSpec {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
    pub soft_deletes: bool,
}

impl MigrationSpec {
    /// Forward step: create the table with every column.
    pub fn up(&self) -> MigrationStep<'_> {
        MigrationStep::CreateTable {
            table: &self.table_name,
            columns: &self.columns,
        }
    }

    /// Reverse step: always an idempotent drop.
    pub fn down(&self) -> MigrationStep<'_> {
        MigrationStep::DropTableIfExists {
            table: &self.table_name,
        }
    }

    /// Columns backing declared fields, in declaration order.
    pub fn field_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.role == ColumnRole::Field)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&ColumnSpec, &ForeignKey)> {
        self.columns
            .iter()
            .filter_map(|c| c.foreign_key.as_ref().map(|fk| (c, fk)))
    }
}

pub struct SchemaGenerator<'a> {
    table: &'a TypeMappingTable,
}

impl<'a> SchemaGenerator<'a> {
    pub fn new(table: &'a TypeMappingTable) -> Self {
        Self { table }
    }

    /// Column order: `id`, declared fields, `deleted_at` (soft deletes only),
    /// `created_at`, `updated_at`.
    pub fn generate(&self, table_name: &str, fields: &[FieldSpec], soft_deletes: bool) -> MigrationSpec {
        let mut columns = Vec::with_capacity(fields.len() + 4);

        columns.push(ColumnSpec::implicit("id", ColumnType::Id, ColumnRole::Identity, false));

        for field in fields {
            let mapping = self.table.lookup(&field.logical_type);
            let foreign_key = field.is_relation().then(|| ForeignKey {
                target_table: field.related_table(),
                target_column: "id",
                on_delete: "cascade",
            });

            columns.push(ColumnSpec {
                name: field.name.clone(),
                column_type: mapping.column,
                role: ColumnRole::Field,
                nullable: field.is_nullable(),
                unique: field.is_unique(),
                foreign_key,
            });
        }

        if soft_deletes {
            columns.push(ColumnSpec::implicit(
                "deleted_at",
                ColumnType::Timestamp,
                ColumnRole::SoftDelete,
                true,
            ));
        }

        columns.push(ColumnSpec::implicit(
            "created_at",
            ColumnType::Timestamp,
            ColumnRole::Timestamp,
            true,
        ));
        columns.push(ColumnSpec::implicit(
            "updated_at",
            ColumnType::Timestamp,
            ColumnRole::Timestamp,
            true,
        ));

        MigrationSpec {
            table_name: table_name.to_string(),
            columns,
            soft_deletes,
        }
    }
}
