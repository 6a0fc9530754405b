//! Filesystem-backed casts. Each resolves `~` and returns a canonical absolute path.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::debug;

use super::CastError;
use crate::config::expand_path;

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// An existing directory whose entries can be listed.
pub fn check_dir(value: &str) -> Result<String, CastError> {
    let path = PathBuf::from(expand_path(value));

    if !path.is_dir() {
        return Err(CastError::NotADirectory);
    }

    if let Err(e) = fs::read_dir(&path) {
        debug!("Cannot list directory `{}`: {}", path.display(), e);
        return Err(CastError::DirectoryNotReadable);
    }

    let resolved = fs::canonicalize(&path).map_err(|_| CastError::DirectoryNotReadable)?;
    Ok(display(&resolved))
}

/// An existing regular file that can be opened for reading.
pub fn check_input_file(value: &str) -> Result<String, CastError> {
    let path = PathBuf::from(expand_path(value));

    if !path.is_file() {
        return Err(CastError::NotAFile);
    }

    if let Err(e) = File::open(&path) {
        debug!("Cannot open file `{}`: {}", path.display(), e);
        return Err(CastError::FileNotReadable);
    }

    let resolved = fs::canonicalize(&path).map_err(|_| CastError::FileNotReadable)?;
    Ok(display(&resolved))
}

/// A file name inside an existing directory that accepts new files.
///
/// The file itself need not exist. Writability is probed by creating an
/// anonymous temporary file in the directory.
pub fn check_output_file(value: &str) -> Result<String, CastError> {
    let path = PathBuf::from(expand_path(value));

    let file_name = path.file_name().ok_or(CastError::MissingFileName)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let directory = fs::canonicalize(&parent).map_err(|_| CastError::DirectoryNotWritable)?;

    if let Err(e) = tempfile::tempfile_in(&directory) {
        debug!("Cannot create files in `{}`: {}", directory.display(), e);
        return Err(CastError::DirectoryNotWritable);
    }

    Ok(display(&directory.join(file_name)))
}
