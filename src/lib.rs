//! autocrud library - CRUD scaffolding for Laravel projects
//!
//! Parses compact field declarations, resolves them through a type mapping
//! table and generates the model, migration, controller, views and routes of
//! a resource module.

pub mod cli;
pub mod commands;
pub mod config;
pub mod fields;
pub mod generators;
pub mod naming;
pub mod output;
pub mod render;
pub mod scaffold;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
