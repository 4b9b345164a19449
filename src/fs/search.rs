use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of directories and of files returned by one search.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// One search result, relative to the searched root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub relative_path: PathBuf,
    pub is_directory: bool,
}

impl SearchHit {
    /// Text shown in the result picker; directories are bracketed.
    pub fn label(&self) -> String {
        let path = self.relative_path.to_string_lossy();
        if self.is_directory {
            format!("[{}]", path)
        } else {
            path.to_string()
        }
    }

    /// Directory the panel should open for this hit, and the entry to highlight.
    pub fn target_in(&self, root: &Path) -> (PathBuf, Option<String>) {
        let full = root.join(&self.relative_path);
        if self.is_directory {
            return (full, None);
        }
        let name = full.file_name().map(|n| n.to_string_lossy().to_string());
        let dir = full
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        (dir, name)
    }
}

/// Find entries below `root` whose name contains `term` (case-insensitive).
///
/// Walks the whole subtree with an explicit stack, skipping directories that
/// cannot be read. At most `limit` directories and `limit` files are returned;
/// directories come first, each group sorted by path.
pub fn search(root: &Path, term: &str, limit: usize) -> Vec<SearchHit> {
    let needle = term.to_lowercase();
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    if needle.is_empty() {
        return dirs;
    }

    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        if dirs.len() >= limit && files.len() >= limit {
            break;
        }
        let entries = match fs::read_dir(&dir) {
            Ok(e) => e,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let matches = entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .contains(&needle);
            if is_dir {
                pending.push(path.clone());
            }
            if !matches {
                continue;
            }
            let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            let hit = SearchHit {
                relative_path,
                is_directory: is_dir,
            };
            if is_dir && dirs.len() < limit {
                dirs.push(hit);
            } else if !is_dir && files.len() < limit {
                files.push(hit);
            }
        }
    }

    dirs.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    dirs.extend(files);
    dirs
}
