// ABOUTME: Directory listings for the content API
// ABOUTME: Ordering of entries and display names taken from markdown frontmatter

use folio_core::{split_document, MARKDOWN_KIND};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::warn;

use crate::error::ContentResult;

/// One row of a listing: a display name and the path segment to request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub path: String,
}

/// Filesystem facts needed to order and label an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub file_name: String,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
}

impl EntryInfo {
    pub fn from_path(path: &Path) -> ContentResult<Self> {
        let metadata = fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Directories first, then most recently modified, then by name.
pub fn entry_order(a: &EntryInfo, b: &EntryInfo) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| b.modified.cmp(&a.modified))
        .then_with(|| a.file_name.cmp(&b.file_name))
}

/// List the direct children of `dir`.
pub fn list_directory(dir: &Path) -> ContentResult<Vec<ListEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        entries.push(EntryInfo::from_path(&entry?.path())?);
    }

    Ok(label_entries(dir, entries))
}

/// Sort entries and turn them into listing rows.
///
/// Directory names get a trailing `/`. Markdown files are shown by their
/// frontmatter `title` when they have one.
pub fn label_entries(dir: &Path, mut entries: Vec<EntryInfo>) -> Vec<ListEntry> {
    entries.sort_by(entry_order);

    entries
        .into_iter()
        .map(|entry| {
            let name = if entry.is_dir {
                format!("{}/", entry.file_name)
            } else if has_markdown_extension(&entry.file_name) {
                markdown_title(&dir.join(&entry.file_name)).unwrap_or_else(|| entry.file_name.clone())
            } else {
                entry.file_name.clone()
            };

            ListEntry {
                name,
                path: entry.file_name,
            }
        })
        .collect()
}

/// Extension of `path` in the `.ext` form used as an entry kind.
pub fn kind_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

fn has_markdown_extension(file_name: &str) -> bool {
    kind_of(Path::new(file_name)).as_deref() == Some(MARKDOWN_KIND)
}

fn markdown_title(path: &Path) -> Option<String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read markdown file");
            return None;
        }
    };

    let document = match split_document(&text) {
        Ok(document) => document,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Markdown file has no usable frontmatter");
            return None;
        }
    };

    document
        .frontmatter
        .get("title")
        .and_then(|title| title.as_str())
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}
