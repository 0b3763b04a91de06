//! Run orchestration: walk the input tree, sanitize, write the output tree.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::MARKDOWN_EXTENSION;
use crate::error::{Result, SanitizeError};
use crate::sanitize::Sanitizer;
use crate::types::Document;
use crate::writer;

/// Counts reported after a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents read, sanitized, and written.
    pub documents: usize,
    /// Documents that hit an override table entry.
    pub overridden: usize,
}

/// Sanitize every Markdown document under `input_root` into `output_root`.
///
/// The output root is removed and recreated first, then documents are
/// processed one at a time in sorted walk order. The first I/O failure
/// aborts the whole run.
pub fn run(input_root: &Path, output_root: &Path) -> Result<RunSummary> {
    run_with(input_root, output_root, &Sanitizer::new())
}

/// Like [`run`], with a caller-supplied sanitizer.
pub fn run_with(
    input_root: &Path,
    output_root: &Path,
    sanitizer: &Sanitizer,
) -> Result<RunSummary> {
    if !input_root.exists() {
        return Err(SanitizeError::InputRootNotFound(input_root.to_path_buf()));
    }
    if !input_root.is_dir() {
        return Err(SanitizeError::InputRootNotADirectory(
            input_root.to_path_buf(),
        ));
    }

    writer::reset_output_root(output_root)?;

    let mut summary = RunSummary {
        documents: 0,
        overridden: 0,
    };

    for entry in WalkDir::new(input_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(MARKDOWN_EXTENSION) {
            continue;
        }

        let raw = fs::read_to_string(path).map_err(|source| SanitizeError::ReadDocument {
            path: path.to_path_buf(),
            source,
        })?;
        let relative = path.strip_prefix(input_root).unwrap_or(path);
        let document = Document::new(relative_slash(relative), raw);

        let sanitized = sanitizer.sanitize(&document.relative_path, &document.raw_text);
        writer::write_document(output_root, relative, &sanitized)?;

        if sanitizer.overrides().entry_for(&document.relative_path).is_some() {
            summary.overridden += 1;
        }
        summary.documents += 1;
        debug!(document = %document.relative_path, "Sanitized");
    }

    info!(
        documents = summary.documents,
        overridden = summary.overridden,
        "Sanitization run complete"
    );
    Ok(summary)
}

/// `/`-separated form of a relative path, for override matching.
fn relative_slash(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
