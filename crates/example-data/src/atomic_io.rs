//! Atomic file write operations.
//!
//! This module provides helpers for writing files atomically using a
//! temporary file and rename strategy, ensuring partial writes do not
//! corrupt the target file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::error::RegistryError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes contents to a file atomically using a temp file and rename.
///
/// The function writes to a hidden temporary file in the same directory,
/// then renames it to the target path. This ensures the target file is
/// never partially written. `path` must be a bare file name; the caller
/// supplies the directory handle.
///
/// # Errors
///
/// Returns [`RegistryError::WriteError`] if the file cannot be written.
pub(crate) fn write_atomic(
    dir: &Dir,
    path: &Utf8Path,
    contents: &str,
) -> Result<(), RegistryError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(write_error(path, "registry path must be a file"));
    };

    let tmp_name = temp_name_for(file_name);
    write_temp_file(dir, &tmp_name, path, contents)?;

    if let Err(err) = replace_target(dir, &tmp_name, file_name) {
        remove_quietly(dir, &tmp_name);
        return Err(write_error(path, &err.to_string()));
    }

    // Best-effort directory sync so the rename survives a crash.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Ignore sync failures.
    }

    Ok(())
}

/// Builds a collision-resistant hidden temp file name next to the target.
fn temp_name_for(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{}.tmp.{}.{}.{}", file_name, std::process::id(), nanos, counter)
}

/// Writes and syncs the temp file, removing it on any failure.
fn write_temp_file(
    dir: &Dir,
    tmp_name: &str,
    target: &Utf8Path,
    contents: &str,
) -> Result<(), RegistryError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| write_error(target, &err.to_string()))?;

    let result = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());

    if let Err(err) = result {
        drop(file);
        remove_quietly(dir, tmp_name);
        return Err(write_error(target, &err.to_string()));
    }

    Ok(())
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn remove_quietly(dir: &Dir, name: &str) {
    if dir.remove_file(name).is_err() {
        // Ignore cleanup failures.
    }
}

fn write_error(path: &Utf8Path, message: &str) -> RegistryError {
    RegistryError::WriteError {
        path: path.as_std_path().to_path_buf(),
        message: message.to_owned(),
    }
}
