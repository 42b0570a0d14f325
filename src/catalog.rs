//! Directory scanning for PDF and Markdown documents.

use crate::error::{Error, Result};
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of a discovered document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Markdown,
}

impl DocumentKind {
    fn from_extension(ext: &std::ffi::OsStr) -> Option<Self> {
        if ext.eq_ignore_ascii_case("pdf") {
            Some(DocumentKind::Pdf)
        } else if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") {
            Some(DocumentKind::Markdown)
        } else {
            None
        }
    }
}

/// Metadata for one discovered document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentInfo {
    /// Full path to the file
    pub path: String,
    /// Filename only
    pub name: String,
    /// Document kind (pdf or markdown)
    pub kind: DocumentKind,
    /// File size in bytes
    pub size: u64,
    /// Last modified time (ISO 8601 format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Scan a directory for PDF and Markdown files, sorted by path.
pub fn scan_directory(
    dir: &Path,
    recursive: bool,
    pattern: Option<&glob::Pattern>,
) -> Result<Vec<DocumentInfo>> {
    if !dir.exists() {
        return Err(Error::DocumentNotFound {
            path: dir.display().to_string(),
        });
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.display().to_string(),
        });
    }

    let mut files = Vec::new();
    collect_documents(dir, recursive, pattern, &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn collect_documents(
    dir: &Path,
    recursive: bool,
    pattern: Option<&glob::Pattern>,
    files: &mut Vec<DocumentInfo>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(Error::Io)?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue, // Skip entries we can't read
        };

        let path = entry.path();

        if path.is_dir() {
            if recursive {
                let _ = collect_documents(&path, recursive, pattern, files);
            }
            continue;
        }
        if !path.is_file() {
            continue;
        }

        let Some(kind) = path.extension().and_then(DocumentKind::from_extension) else {
            continue;
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Some(pat) = pattern {
            if !pat.matches(&name) {
                continue;
            }
        }

        let metadata = std::fs::metadata(&path).ok();
        let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| {
                chrono::DateTime::from_timestamp(d.as_secs() as i64, 0)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_default()
            });

        files.push(DocumentInfo {
            path: path.to_string_lossy().to_string(),
            name,
            kind,
            size,
            modified,
        });
    }

    Ok(())
}
