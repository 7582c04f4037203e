// ABOUTME: Filesystem helpers for the marp-slides application
// ABOUTME: Path validation, directory creation and markdown loading

use crate::errors::{MarpError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(MarpError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(MarpError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Create the directory if needed
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(MarpError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory_exists(parent),
        _ => Ok(()),
    }
}

pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| {
        MarpError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

/// Read a markdown source document
pub fn read_markdown_file(path: &Path) -> Result<String> {
    validate_file_exists(path)?;
    Ok(fs::read_to_string(path)?)
}
