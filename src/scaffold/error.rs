use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fields::FieldError;
use crate::naming::NameError;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("{} already exists (use --force to overwrite)", .path.display())]
    FileWriteConflict { path: PathBuf },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
