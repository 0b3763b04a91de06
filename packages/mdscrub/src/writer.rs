//! Output tree management for sanitized documents.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SanitizeError};

/// Remove and recreate the output root.
///
/// Every run writes into a fresh tree, so no document from a previous run
/// survives a rename or deletion in the input. An aborted run leaves only
/// the documents written before the failure, never a mix of old and new.
pub fn reset_output_root(root: &Path) -> Result<()> {
    if root.exists() {
        fs::remove_dir_all(root)?;
    }
    fs::create_dir_all(root)?;
    Ok(())
}

/// Write one sanitized document under the output root.
///
/// Creates intermediate directories as needed. Uses atomic write pattern:
/// writes to a temp file, syncs to disk, then renames, so a crash cannot
/// leave a torn file at the target path.
///
/// # Returns
/// Path to the written file
pub fn write_document(root: &Path, relative: &Path, content: &str) -> Result<PathBuf> {
    let target = root.join(relative);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| SanitizeError::WriteDocument {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_name = target.file_name().map_or_else(
        || ".document.tmp".to_string(),
        |name| format!(".{}.tmp", name.to_string_lossy()),
    );
    let temp_file = target.with_file_name(temp_name);

    {
        let mut file = File::create(&temp_file).map_err(|source| SanitizeError::WriteDocument {
            path: temp_file.clone(),
            source,
        })?;
        file.write_all(content.as_bytes())
            .map_err(|source| SanitizeError::WriteDocument {
                path: temp_file.clone(),
                source,
            })?;
        file.sync_all().map_err(|source| SanitizeError::WriteDocument {
            path: temp_file.clone(),
            source,
        })?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if target.exists() {
        fs::remove_file(&target)?;
    }

    fs::rename(&temp_file, &target).map_err(|source| SanitizeError::WriteDocument {
        path: target.clone(),
        source,
    })?;

    Ok(target)
}
