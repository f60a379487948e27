//! Resolved preview target

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Absolute, symlink-resolved path of the file being previewed.
///
/// Resolved once at dispatch start; every later stage reuses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    path: PathBuf,
}

impl Target {
    /// Resolve `path` to an absolute canonical path.
    ///
    /// # Errors
    /// Returns an `io::Error` if the path does not exist or cannot be resolved.
    pub fn resolve(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = fs::canonicalize(path.as_ref()).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Cannot access '{}': {e}", path.as_ref().display()),
            )
        })?;
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Suffix of the file name from its last `.`, or an empty string.
    ///
    /// Dotfiles keep their whole name (`.bashrc`), unlike [`Path::extension`].
    #[must_use]
    pub fn extension(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.rfind('.').map(|dot| name[dot..].to_string()))
            .unwrap_or_default()
    }

    /// # Errors
    /// Returns an `io::Error` if the target cannot be stat'd.
    pub fn is_dir(&self) -> io::Result<bool> {
        fs::metadata(&self.path).map(|m| m.is_dir())
    }
}

impl AsRef<Path> for Target {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
