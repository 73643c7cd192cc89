//! Rendering of artifact descriptions into PHP and Blade source text.
//!
//! Generators never build strings; everything textual happens here, at the
//! boundary between the structured descriptions and the sink.

use enum_dispatch::enum_dispatch;
use serde::Serialize;
use std::fmt;

use crate::generators::{ControllerSpec, MigrationSpec, ModelSpec, RouteSpec, ViewSpec};

mod blade;
mod php;

pub use blade::label_for;
pub use php::{ROUTES_FILE_HEADER, php_string, route_registration};

/// The kind of file an artifact becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Model,
    Migration,
    Controller,
    View,
    Routes,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Migration => "migration",
            ArtifactKind::Controller => "controller",
            ArtifactKind::View => "view",
            ArtifactKind::Routes => "routes",
        };
        f.write_str(name)
    }
}

#[enum_dispatch]
pub trait Render {
    fn kind(&self) -> ArtifactKind;

    /// Final source text. For routes this is the block to append, not a whole file.
    fn render(&self) -> String;
}

#[enum_dispatch(Render)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    ModelSpec,
    MigrationSpec,
    ControllerSpec,
    ViewSpec,
    RouteSpec,
}

/// Indent every non-empty line of `text` by `width` spaces.
pub(crate) fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
