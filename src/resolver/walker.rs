// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Directory walking and the file name index.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

/// How deep the resolver looks for target files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingMode {
    /// Walk the whole tree under the base directory.
    #[default]
    Recursive,
    /// Only look at `root/<file name>`.
    RootOnly,
}

/// Resolves rule file names to paths under one base directory.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    root: PathBuf,
    mode: ListingMode,
    index: HashMap<OsString, Vec<PathBuf>>,
}

impl TargetResolver {
    /// Create a resolver for `root`. In recursive mode this walks the tree once.
    pub fn new(root: &Path, mode: ListingMode, exclude: &[glob::Pattern]) -> Self {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

        let index = match mode {
            ListingMode::Recursive => build_index(&root, exclude),
            ListingMode::RootOnly => HashMap::new(),
        };

        Self { root, mode, index }
    }

    /// The base directory this resolver searches.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed files (always 0 in root-only mode).
    pub fn indexed_files(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    /// All paths whose name equals `file_name`, sorted. Empty when none exist.
    pub fn resolve(&self, file_name: &str) -> Vec<PathBuf> {
        let Some(wanted) = relative_name(file_name) else {
            debug!("Ignoring unsafe target name: {}", file_name);
            return Vec::new();
        };

        match self.mode {
            ListingMode::RootOnly => {
                let candidate = self.root.join(&wanted);
                if candidate.is_file() {
                    vec![candidate]
                } else {
                    Vec::new()
                }
            }
            ListingMode::Recursive => {
                let Some(base) = wanted.file_name() else {
                    return Vec::new();
                };
                self.index
                    .get(base)
                    .map(|paths| {
                        paths
                            .iter()
                            .filter(|p| {
                                p.strip_prefix(&self.root)
                                    .map(|rel| rel.ends_with(&wanted))
                                    .unwrap_or(false)
                            })
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default()
            }
        }
    }
}

/// Strip root and `.` components; refuse names that climb out of the root.
fn relative_name(file_name: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in Path::new(file_name.trim()).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => return None,
        }
    }
    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

fn build_index(root: &Path, exclude: &[glob::Pattern]) -> HashMap<OsString, Vec<PathBuf>> {
    let mut index: HashMap<OsString, Vec<PathBuf>> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(root, e.path(), exclude));

    // Links are not descended into, but a link to a regular file is indexed.
    for entry in walker {
        match entry {
            Ok(entry) if is_target_file(&entry) => {
                index
                    .entry(entry.file_name().to_os_string())
                    .or_default()
                    .push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => debug!("Skipping unreadable entry: {}", err),
        }
    }

    for paths in index.values_mut() {
        paths.sort();
    }

    index
}

fn is_target_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_excluded(root: &Path, path: &Path, exclude: &[glob::Pattern]) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    if rel.as_os_str().is_empty() {
        return false;
    }
    exclude.iter().any(|pattern| pattern.matches_path(rel))
}
