//! Recursive copy of regular files and directories, preserving permission bits.
//!
//! Each file is written to a temporary sibling and persisted into place, so a
//! failed copy never leaves a partial file at the destination. A failure part
//! way through a directory leaves the entries copied so far.

use crate::error::ProvisionError;
use std::fs::{self, File, Permissions};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Counts from one [`copy_recursive`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub directories: usize,
    /// Symlinks and special files, which are not copied
    pub skipped: usize,
}

/// Copy `src` to `dst`. `dst` must not already exist as a directory.
pub fn copy_recursive(src: &Path, dst: &Path) -> Result<CopyStats, ProvisionError> {
    let metadata = fs::symlink_metadata(src).map_err(|e| ProvisionError::io("stat", src, e))?;
    let file_type = metadata.file_type();
    let mut stats = CopyStats::default();

    if file_type.is_file() {
        copy_file(src, dst)?;
        stats.files += 1;
    } else if file_type.is_dir() {
        copy_dir(src, dst, metadata.permissions(), &mut stats)?;
    } else {
        return Err(ProvisionError::io(
            "copy",
            src,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "only regular files and directories can be copied",
            ),
        ));
    }

    Ok(stats)
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), ProvisionError> {
    let parent = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut input = File::open(src).map_err(|e| ProvisionError::io("open", src, e))?;
    let permissions = input
        .metadata()
        .map_err(|e| ProvisionError::io("stat", src, e))?
        .permissions();

    let mut staged =
        NamedTempFile::new_in(parent).map_err(|e| ProvisionError::io("stage", parent, e))?;
    io::copy(&mut input, staged.as_file_mut()).map_err(|e| ProvisionError::io("copy", src, e))?;
    staged
        .as_file()
        .set_permissions(permissions)
        .map_err(|e| ProvisionError::io("set permissions on", staged.path(), e))?;
    staged
        .persist(dst)
        .map_err(|e| ProvisionError::io("write", dst, e.error))?;

    Ok(())
}

fn copy_dir(
    src: &Path,
    dst: &Path,
    permissions: Permissions,
    stats: &mut CopyStats,
) -> Result<(), ProvisionError> {
    fs::create_dir(dst).map_err(|e| ProvisionError::io("create", dst, e))?;
    stats.directories += 1;

    // Applied after the walk so read-only directories can still be filled.
    let mut dir_permissions: Vec<(PathBuf, Permissions)> = vec![(dst.to_path_buf(), permissions)];

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ProvisionError::io("read", path, io::Error::from(e))
        })?;

        let relative = entry.path().strip_prefix(src).map_err(|_| {
            ProvisionError::io(
                "copy",
                entry.path(),
                io::Error::new(io::ErrorKind::Other, "entry is outside the source tree"),
            )
        })?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            let permissions = entry
                .metadata()
                .map_err(|e| ProvisionError::io("stat", entry.path(), io::Error::from(e)))?
                .permissions();
            fs::create_dir(&target).map_err(|e| ProvisionError::io("create", &target, e))?;
            dir_permissions.push((target, permissions));
            stats.directories += 1;
        } else if file_type.is_file() {
            copy_file(entry.path(), &target)?;
            stats.files += 1;
        } else {
            tracing::warn!(path = %entry.path().display(), "Skipping symlink or special file");
            stats.skipped += 1;
        }
    }

    for (path, permissions) in dir_permissions.into_iter().rev() {
        fs::set_permissions(&path, permissions)
            .map_err(|e| ProvisionError::io("set permissions on", &path, e))?;
    }

    Ok(())
}
