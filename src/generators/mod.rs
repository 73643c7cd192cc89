//! Artifact generators.
//!
//! Every generator takes the shared, immutable [`TypeMappingTable`] by
//! reference and walks the field list in declaration order. Generators return
//! structured descriptions; turning them into source text is the job of
//! [`crate::render`].
//!
//! [`TypeMappingTable`]: crate::fields::TypeMappingTable

pub mod controller;
pub mod form;
pub mod model;
pub mod routes;
pub mod rules;
pub mod schema;
pub mod views;

pub use controller::{ControllerGenerator, ControllerKind, ControllerSpec, OptionsCollection, UploadField};
pub use form::{FormFieldMarkup, FormMode, OptionsSource, TemplateFormGenerator};
pub use model::{AttributeCast, BelongsTo, ModelGenerator, ModelSpec};
pub use routes::{RouteFile, RouteGenerator, RouteSpec};
pub use rules::{RuleExpression, ValidationRuleGenerator};
pub use schema::{ColumnRole, ColumnSpec, ForeignKey, MigrationSpec, MigrationStep, SchemaGenerator};
pub use views::{ViewGenerator, ViewKind, ViewSpec};
