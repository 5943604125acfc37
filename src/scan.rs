//! Input discovery
//!
//! Expands folders, single files and glob patterns into the list of JPEG
//! images to inspect. Folders are searched recursively.

use crate::error::{MissionError, Result};
use glob::glob;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Maximum recursion depth to prevent stack overflow
const MAX_RECURSION_DEPTH: usize = 100;

/// Check for a `.jpg`/`.jpeg` extension, case-insensitive
pub fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_ascii_lowercase();
            ext_lower == "jpg" || ext_lower == "jpeg"
        })
        .unwrap_or(false)
}

/// Whether an input is expanded as a glob pattern
pub fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?')
}

/// Inputs that are neither glob patterns nor existing paths
pub fn missing_inputs(inputs: &[String]) -> Vec<&str> {
    inputs
        .iter()
        .map(String::as_str)
        .filter(|input| !is_glob_pattern(input) && !Path::new(input).exists())
        .collect()
}

/// Expand input paths to a sorted list of JPEG files.
/// Directories are searched recursively, glob patterns are expanded first.
pub fn collect_images(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut visited = HashSet::new();
    let mut images = expand_input_paths_with_depth(inputs, &mut visited, 0)?;
    images.sort();
    images.dedup();
    Ok(images)
}

fn expand_input_paths_with_depth(
    inputs: &[String],
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(MissionError::InvalidFormat(format!(
            "Maximum recursion depth exceeded ({})",
            MAX_RECURSION_DEPTH
        )));
    }
    let mut images = Vec::new();

    for input in inputs {
        if is_glob_pattern(input) {
            let paths = glob(input)
                .map_err(|e| {
                    MissionError::InvalidFormat(format!("Invalid glob pattern '{}': {}", input, e))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| {
                    MissionError::InvalidFormat(format!(
                        "Error expanding glob pattern '{}': {}",
                        input, e
                    ))
                })?;

            for path in paths {
                if let Some(path_str) = path.to_str() {
                    let sub = expand_input_paths_with_depth(
                        &[path_str.to_string()],
                        visited,
                        depth + 1,
                    )?;
                    images.extend(sub);
                }
            }
            continue;
        }

        let canonical = match Path::new(input).canonicalize() {
            Ok(canonical) => canonical,
            Err(e) => {
                warn!("Path not found or not accessible '{}': {}", input, e);
                continue;
            }
        };

        if canonical.is_file() {
            if is_jpeg_path(&canonical) {
                images.push(canonical);
            } else {
                warn!("Skipping non-JPEG file: {}", canonical.display());
            }
        } else if canonical.is_dir() {
            images.extend(find_images_in_dir_with_depth(&canonical, visited, depth + 1)?);
        }
    }

    Ok(images)
}

/// Recursively find JPEG files in a directory, protecting against symlink cycles
fn find_images_in_dir_with_depth(
    dir_path: &Path,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(MissionError::InvalidFormat(format!(
            "Maximum recursion depth exceeded in directory traversal ({})",
            MAX_RECURSION_DEPTH
        )));
    }

    let mut images = Vec::new();

    let canonical_dir = match dir_path.canonicalize() {
        Ok(dir) => dir,
        Err(e) => {
            warn!(
                "Failed to canonicalize directory '{}': {}",
                dir_path.display(),
                e
            );
            return Ok(images);
        }
    };

    // Already visited, skip to avoid cycles
    if !visited.insert(canonical_dir.clone()) {
        return Ok(images);
    }

    let entries = match fs::read_dir(&canonical_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "Cannot read directory '{}': {}",
                canonical_dir.display(),
                e
            );
            return Ok(images);
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Cannot read entry in directory '{}': {}",
                    canonical_dir.display(),
                    e
                );
                continue;
            }
        };

        let canonical_path = match entry.path().canonicalize() {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "Failed to canonicalize path '{}': {}",
                    entry.path().display(),
                    e
                );
                continue;
            }
        };

        if canonical_path.is_dir() {
            images.extend(find_images_in_dir_with_depth(
                &canonical_path,
                visited,
                depth + 1,
            )?);
        } else if canonical_path.is_file()
            && is_jpeg_path(&canonical_path)
            && visited.insert(canonical_path.clone())
        {
            images.push(canonical_path);
        }
    }

    Ok(images)
}
