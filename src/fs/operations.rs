use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::Result;

/// Fail with `NotFound` unless something exists at `path` (links are not followed).
fn ensure_exists(path: &Path) -> Result<fs::Metadata> {
    fs::symlink_metadata(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} no longer exists", path.display()),
            )
            .into()
        } else {
            e.into()
        }
    })
}

/// Where `src` lands inside `dest_dir`: same file name, no collision renaming.
pub fn destination_for(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no filename"))?;
    Ok(dest_dir.join(name))
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn reject_same_location(src: &Path, dest: &Path) -> Result<()> {
    if same_location(src, dest) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same",
        )
        .into());
    }
    Ok(())
}

/// Immediate children of `dir`, split into (files, directories), each sorted by name.
/// With `follow_links`, a symlink to a directory counts as a directory;
/// otherwise every symlink counts as a file.
fn split_children(dir: &Path, follow_links: bool) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_dir = if follow_links {
            entry.path().is_dir()
        } else {
            entry.file_type()?.is_dir()
        };
        if is_dir {
            dirs.push(entry.path());
        } else {
            files.push(entry.path());
        }
    }
    files.sort();
    dirs.sort();
    Ok((files, dirs))
}

/// Error returned when a progress callback stops a walk.
fn stopped_at(path: &Path) -> crate::error::AppError {
    io::Error::new(
        io::ErrorKind::Interrupted,
        format!("stopped at {}", path.display()),
    )
    .into()
}

/// Copy a file or directory into `dest_dir`, overwriting existing files of the
/// same name. Returns the path of the copy.
pub fn copy(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    copy_with_progress(src, dest_dir, |path| {
        trace!(path = %path.display(), "copying");
        true
    })
}

/// Copy with a callback invoked for every directory and file just before it
/// is copied. Returning `false` stops the copy with an `Interrupted` error.
///
/// Symlinks are followed, so a link to a directory is copied as a directory.
/// Directories are copied depth-first, files of a directory before its
/// subdirectories. Not transactional: on failure whatever was already copied
/// stays in place and only the first error is returned.
pub fn copy_with_progress(
    src: &Path,
    dest_dir: &Path,
    mut progress: impl FnMut(&Path) -> bool,
) -> Result<PathBuf> {
    ensure_exists(src)?;
    let dest = destination_for(src, dest_dir)?;
    reject_same_location(src, &dest)?;

    // A dangling link has no target metadata and is handed to fs::copy as is
    if src.is_dir() {
        if let (Ok(src_real), Ok(dest_real)) = (src.canonicalize(), dest_dir.canonicalize()) {
            if dest_real.starts_with(&src_real) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "cannot copy a folder into itself",
                )
                .into());
            }
        }
        copy_dir_tree(src, &dest, &mut progress)?;
    } else {
        if !progress(src) {
            return Err(stopped_at(src));
        }
        fs::copy(src, &dest)?;
    }
    debug!(src = %src.display(), dest = %dest.display(), "copied");
    Ok(dest)
}

/// Iterative directory copy driven by an explicit stack. Each stack entry
/// carries the resolved paths of its ancestors so a link back up the tree is
/// reported instead of copied forever.
fn copy_dir_tree(
    src: &Path,
    dest: &Path,
    progress: &mut impl FnMut(&Path) -> bool,
) -> Result<()> {
    let mut pending = vec![(src.to_path_buf(), dest.to_path_buf(), Vec::<PathBuf>::new())];
    while let Some((from, to, mut ancestors)) = pending.pop() {
        let real = from.canonicalize()?;
        if ancestors.contains(&real) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} links back to one of its parents", from.display()),
            )
            .into());
        }
        ancestors.push(real);

        if !progress(&from) {
            return Err(stopped_at(&from));
        }
        fs::create_dir_all(&to)?;
        let (files, dirs) = split_children(&from, true)?;
        for file in files {
            if !progress(&file) {
                return Err(stopped_at(&file));
            }
            let target = destination_for(&file, &to)?;
            fs::copy(&file, &target)?;
        }
        // Reverse so the alphabetically first subdirectory is visited next
        for dir in dirs.into_iter().rev() {
            let target = destination_for(&dir, &to)?;
            pending.push((dir, target, ancestors.clone()));
        }
    }
    Ok(())
}

/// Move a file or directory into `dest_dir`. Returns the final path.
///
/// Directories are renamed in place and never copied file by file. Files
/// replace an existing destination file of the same name and fall back to
/// copy + remove when a plain rename fails (cross-device).
pub fn move_item(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let metadata = ensure_exists(src)?;
    let dest = destination_for(src, dest_dir)?;
    reject_same_location(src, &dest)?;

    if metadata.is_dir() {
        fs::rename(src, &dest)?;
    } else if fs::rename(src, &dest).is_err() {
        fs::copy(src, &dest)?;
        fs::remove_file(src)?;
    }
    debug!(src = %src.display(), dest = %dest.display(), "moved");
    Ok(dest)
}

/// Delete a file, or a directory with everything below it.
pub fn delete(path: &Path) -> Result<()> {
    delete_with_progress(path, |path| {
        trace!(path = %path.display(), "removing");
        true
    })
}

/// Delete with a callback invoked for every file and directory just before it
/// is removed. Returning `false` stops the delete with an `Interrupted` error.
///
/// Symlinks are removed, never followed. Files are removed while walking the
/// tree depth-first; directories are removed afterwards, deepest first. Not
/// transactional: the first failure aborts the walk and leaves the remaining
/// entries on disk.
pub fn delete_with_progress(path: &Path, mut progress: impl FnMut(&Path) -> bool) -> Result<()> {
    let metadata = ensure_exists(path)?;
    if !metadata.is_dir() {
        if !progress(path) {
            return Err(stopped_at(path));
        }
        fs::remove_file(path)?;
        return Ok(());
    }

    let mut pending = vec![path.to_path_buf()];
    let mut visited = Vec::new();
    while let Some(dir) = pending.pop() {
        let (files, subdirs) = split_children(&dir, false)?;
        for file in &files {
            if !progress(file) {
                return Err(stopped_at(file));
            }
            fs::remove_file(file)?;
        }
        visited.push(dir);
        pending.extend(subdirs.into_iter().rev());
    }

    // Pre-order visit, so reversing puts every child before its parent
    for dir in visited.iter().rev() {
        if !progress(dir) {
            return Err(stopped_at(dir));
        }
        fs::remove_dir(dir)?;
    }
    debug!(path = %path.display(), "deleted");
    Ok(())
}
