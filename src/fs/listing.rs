use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::warn;

use crate::error::{ErrorKind, Result};

/// Display name of the synthetic parent-navigation row.
pub const PARENT_MARKER: &str = "..";

/// What a listing row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The synthetic `..` row.
    ParentMarker,
    Directory,
    File,
    /// Informational row shown when the directory could not be read.
    Placeholder,
}

/// One row of a panel listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    /// `None` for the parent marker and placeholder rows.
    pub absolute_path: Option<PathBuf>,
    pub kind: EntryKind,
    /// Byte length; always 0 for directories.
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl DirectoryEntry {
    fn parent_marker() -> Self {
        Self {
            name: PARENT_MARKER.to_string(),
            absolute_path: None,
            kind: EntryKind::ParentMarker,
            size: 0,
            modified: None,
        }
    }

    fn placeholder(message: &str) -> Self {
        Self {
            name: message.to_string(),
            absolute_path: None,
            kind: EntryKind::Placeholder,
            size: 0,
            modified: None,
        }
    }

    /// Build an entry from a filesystem path. Symlinks are followed so that
    /// links to directories list as directories; broken links list as files.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(_) => fs::symlink_metadata(path)?,
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let is_dir = metadata.is_dir();
        Ok(Self {
            name,
            absolute_path: Some(path.to_path_buf()),
            kind: if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            size: if is_dir { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
        })
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Whether file operations may act on this row.
    pub fn is_actionable(&self) -> bool {
        matches!(self.kind, EntryKind::Directory | EntryKind::File)
    }
}

/// List the immediate children of `path`.
///
/// Never fails: a directory that cannot be read lists as the parent marker
/// (when there is a parent) followed by a single placeholder row.
pub fn list(path: &Path) -> Vec<DirectoryEntry> {
    let mut entries = Vec::new();
    if path.parent().is_some() {
        entries.push(DirectoryEntry::parent_marker());
    }

    match read_children(path) {
        Ok(children) => entries.extend(children),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "directory listing failed");
            entries.push(DirectoryEntry::placeholder(placeholder_text(e.kind())));
        }
    }
    entries
}

fn placeholder_text(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::AccessDenied => "Access Denied",
        ErrorKind::NotFound => "Directory not found",
        _ => "Unable to read directory",
    }
}

/// Read and sort the children of a directory: directories first, then files,
/// each group ordered by name (byte-wise, case-sensitive).
fn read_children(path: &Path) -> Result<Vec<DirectoryEntry>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        // Entries that vanish between read_dir and stat are skipped
        match DirectoryEntry::from_path(&entry.path()) {
            Ok(child) => children.push(child),
            Err(_) => continue,
        }
    }
    sort_entries(&mut children);
    Ok(children)
}

fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| {
        b.is_directory()
            .cmp(&a.is_directory())
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn lists_dirs_before_files_with_parent_marker_first() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::write(tmp.path().join("file2.txt"), "2").unwrap();
        fs::write(tmp.path().join("file1.txt"), "1").unwrap();

        let entries = list(tmp.path());
        assert_eq!(
            names(&entries),
            vec!["..", "a", "b", "file1.txt", "file2.txt"]
        );
        assert_eq!(entries[0].kind, EntryKind::ParentMarker);
        assert!(entries[0].absolute_path.is_none());
        assert!(entries[1].is_directory());
        assert_eq!(entries[3].absolute_path, Some(tmp.path().join("file1.txt")));
    }

    #[test]
    fn ordering_is_case_sensitive() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("beta")).unwrap();
        File::create(tmp.path().join("Alpha")).unwrap();
        File::create(tmp.path().join("alpha")).unwrap();

        let entries = list(tmp.path());
        assert_eq!(names(&entries), vec!["..", "Alpha", "alpha", "beta"]);
    }

    #[test]
    fn empty_directory_lists_only_parent_marker() {
        let tmp = TempDir::new().unwrap();
        let entries = list(tmp.path());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::ParentMarker);
    }

    #[test]
    fn root_has_no_parent_marker() {
        let root = Path::new("/");
        if root.parent().is_none() {
            let entries = list(root);
            assert!(entries.iter().all(|e| e.kind != EntryKind::ParentMarker));
        }
    }

    #[test]
    fn file_sizes_recorded_and_directories_zero() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("dir")).unwrap();
        fs::write(tmp.path().join("note.txt"), "hello world!").unwrap();

        let entries = list(tmp.path());
        let dir = entries.iter().find(|e| e.name == "dir").unwrap();
        let file = entries.iter().find(|e| e.name == "note.txt").unwrap();
        assert_eq!(dir.size, 0);
        assert_eq!(file.size, 12);
        assert!(file.modified.is_some());
    }

    #[test]
    fn missing_directory_degrades_to_placeholder() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("gone");

        let entries = list(&gone);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::ParentMarker);
        assert_eq!(entries[1].kind, EntryKind::Placeholder);
        assert_eq!(entries[1].name, "Directory not found");
        assert!(!entries[1].is_actionable());
    }

    #[test]
    fn does_not_recurse_into_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("outer").join("inner")).unwrap();
        fs::write(tmp.path().join("outer").join("deep.txt"), "x").unwrap();

        let entries = list(tmp.path());
        assert_eq!(names(&entries), vec!["..", "outer"]);
    }
}
