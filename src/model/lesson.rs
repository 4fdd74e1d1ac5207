use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::error::ContentsError;

/// The lesson folders found directly below a lessons root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lessons {
    /// The directory that was listed.
    pub root: PathBuf,
    /// Names of the immediate child directories, in the order the file system returned them.
    pub folders: Vec<String>,
}

impl Lessons {
    /// List the immediate child directories of `root`. Files and other non-directory entries are
    /// skipped; nested folders are never visited.
    pub fn load(root: impl Into<PathBuf>) -> Result<Lessons, ContentsError> {
        let root = root.into();

        match fs::metadata(&root) {
            Ok(metadata) if metadata.is_dir() => (),
            Ok(_) => return Err(ContentsError::NotADirectory(root)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ContentsError::RootNotFound(root))
            }
            Err(source) => return Err(ContentsError::List { path: root, source }),
        }

        let entries = fs::read_dir(&root).map_err(|source| ContentsError::List {
            path: root.clone(),
            source,
        })?;

        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentsError::List {
                path: root.clone(),
                source,
            })?;
            let path = entry.path();

            if !is_directory(&path)? {
                trace!(path = %path.display(), "skipping non-directory entry");
                continue;
            }

            let name = entry
                .file_name()
                .into_string()
                .map_err(ContentsError::InvalidFolderName)?;
            folders.push(name);
        }

        debug!(root = %root.display(), count = folders.len(), "listed lesson folders");

        Ok(Lessons { root, folders })
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

// NOTE: Follows symlinks, so a link to a directory counts as a lesson folder.
fn is_directory(path: &Path) -> Result<bool, ContentsError> {
    fs::metadata(path)
        .map(|metadata| metadata.is_dir())
        .map_err(|source| ContentsError::List {
            path: path.to_path_buf(),
            source,
        })
}
