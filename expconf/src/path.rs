//! Path helpers for locating inherited configuration files.
//!
//! Inheritance entries are written relative to the file that declares them.
//! This module turns such entries into stable paths:
//! - Expanding tilde (~) to the home directory
//! - Joining relative entries onto the declaring file's directory
//! - Resolving `.` and `..` components lexically
//! - Canonicalizing existing files for cycle detection

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use expconf::path::expand_tilde;
/// use std::path::Path;
///
/// // Expands ~/path to home/path
/// let expanded = expand_tilde(Path::new("~/configs/base.yaml")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("configs/base.yaml"));
///
/// // Leaves other paths unchanged
/// let expanded = expand_tilde(Path::new("base.yaml")).unwrap();
/// assert_eq!(expanded, Path::new("base.yaml"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components lexically.
///
/// Symlinks are not followed. On relative paths, leading `..` components
/// that cannot be popped are kept.
///
/// # Errors
///
/// Returns an error if `..` would climb above the root of an absolute path.
///
/// # Examples
///
/// ```
/// use expconf::path::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c.yaml")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c.yaml"));
///
/// let resolved = resolve_components(Path::new("../shared/./base.yaml")).unwrap();
/// assert_eq!(resolved, PathBuf::from("../shared/base.yaml"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;
    // Number of leading `..` kept on a relative path.
    let mut kept_parents = 0usize;
    let mut normal_count = 0usize;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => {
                result.push(c);
                normal_count += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if normal_count > 0 {
                    result.pop();
                    normal_count -= 1;
                } else if has_root {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                } else {
                    result.push(Component::ParentDir);
                    kept_parents += 1;
                }
            }
        }
    }

    if result.as_os_str().is_empty() && kept_parents == 0 {
        result.push(if has_root {
            Component::RootDir.as_os_str()
        } else {
            Component::CurDir.as_os_str()
        });
    }

    Ok(result)
}

/// Resolve an inheritance entry declared inside `declaring_file`.
///
/// Absolute entries and `~` entries are used as-is (after expansion);
/// anything else is relative to the directory containing `declaring_file`.
/// The result is lexically normalized.
///
/// # Errors
///
/// Returns an error if tilde expansion or normalization fails.
///
/// # Examples
///
/// ```
/// use expconf::path::resolve_parent;
/// use std::path::{Path, PathBuf};
///
/// let parent = resolve_parent(Path::new("configs/exp/run.yaml"), "../base.yaml").unwrap();
/// assert_eq!(parent, PathBuf::from("configs/base.yaml"));
/// ```
pub fn resolve_parent(declaring_file: &Path, entry: &str) -> Result<PathBuf> {
    let entry = expand_tilde(Path::new(entry))?;
    let joined = if entry.is_absolute() {
        entry
    } else {
        declaring_file
            .parent()
            .map_or_else(|| entry.clone(), |dir| dir.join(&entry))
    };
    resolve_components(&joined)
}

/// Canonicalize an existing file by following symlinks.
///
/// # Errors
///
/// Returns `FileNotFound` if the path does not exist, or `Io` for any
/// other failure.
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })
}

/// Base name of a file without its directory or final extension.
///
/// # Examples
///
/// ```
/// use expconf::path::file_stem_name;
/// use std::path::Path;
///
/// assert_eq!(file_stem_name(Path::new("configs/resnet50.yaml")), "resnet50");
/// assert_eq!(file_stem_name(Path::new("run.v2.toml")), "run.v2");
/// ```
#[must_use]
pub fn file_stem_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
