use std::{ffi::OsString, io, path::PathBuf};

pub use anyhow::{Error, Result};

/// Which step of a contents update a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lessons root is missing, is not a directory, or could not be listed.
    InputPath,
    /// The document could not be read or has no section marker.
    Structure,
    /// The rewritten document could not be written back.
    Output,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentsError {
    #[error("lessons root {} does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("lessons root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("lesson folder name {0:?} is not valid UTF-8")]
    InvalidFolderName(OsString),

    #[error("failed to list {}", path.display())]
    List { path: PathBuf, source: io::Error },

    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("section marker `{marker}` was not found")]
    MarkerNotFound { marker: String },

    #[error("{} is read-only", .0.display())]
    ReadOnly(PathBuf),

    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl ContentsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentsError::RootNotFound(_)
            | ContentsError::NotADirectory(_)
            | ContentsError::InvalidFolderName(_)
            | ContentsError::List { .. } => ErrorKind::InputPath,
            ContentsError::Read { .. } | ContentsError::MarkerNotFound { .. } => {
                ErrorKind::Structure
            }
            ContentsError::ReadOnly(_) | ContentsError::Write { .. } => ErrorKind::Output,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn maps_variants_to_kinds() {
        let missing = ContentsError::RootNotFound(PathBuf::from("lessions"));
        let marker = ContentsError::MarkerNotFound {
            marker: String::from("## Contents"),
        };
        let read_only = ContentsError::ReadOnly(PathBuf::from("README.md"));

        assert_eq!(ErrorKind::InputPath, missing.kind());
        assert_eq!(ErrorKind::Structure, marker.kind());
        assert_eq!(ErrorKind::Output, read_only.kind());
    }

    #[test]
    fn kind_survives_anyhow_context() {
        use anyhow::Context;

        let result: Result<()> = Err(ContentsError::MarkerNotFound {
            marker: String::from("## Contents"),
        })
        .context("Failed to update README.md");

        let error = result.expect_err("should fail");
        let contents_error = error
            .downcast_ref::<ContentsError>()
            .expect("should carry a ContentsError");

        assert_eq!(ErrorKind::Structure, contents_error.kind());
    }
}
