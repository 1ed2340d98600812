// Author: kelexine (https://github.com/kelexine)
// scanner.rs — Directory walk producing the code files to count

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::language;
use crate::matcher::{IgnoreMatcher, IgnoreMode};

/// The scan root could not be used.
#[derive(Debug, Error)]
pub enum RootError {
    #[error("Cannot resolve directory: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Canonical form of `path`, which must be an existing directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf, RootError> {
    let root = path.canonicalize().map_err(|source| RootError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if !root.is_dir() {
        return Err(RootError::NotADirectory(root));
    }
    Ok(root)
}

/// Finds code files under a root, honoring `.gitignore` rules.
pub struct Scanner {
    root: PathBuf,
    matcher: IgnoreMatcher,
}

impl Scanner {
    /// Resolve `root` and load its ignore rules.
    pub fn new(root: impl AsRef<Path>, mode: IgnoreMode) -> Result<Self, RootError> {
        let root = resolve_root(root.as_ref())?;
        let matcher = IgnoreMatcher::build(&root, mode);
        Ok(Self { root, matcher })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every code file under the root that no ignore rule excludes, sorted.
    ///
    /// Directory symlinks are not followed; symlinks to regular files are
    /// kept. Subtrees that cannot be listed are skipped.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| !e.file_type().is_dir() && e.path().is_file())
            .map(|e| e.into_path())
            .filter(|p| language::is_code_file(p) && !self.matcher.is_ignored(p))
            .collect();
        files.sort_unstable();
        files
    }

    /// `path` relative to the root with `/` separators, or the full path when
    /// it does not lie under the root.
    pub fn relative_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => path.to_string_lossy().into_owned(),
        }
    }
}
