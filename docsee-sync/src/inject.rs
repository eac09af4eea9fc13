//! Index block generation and upsert into the shared document.
//!
//! Each source owns exactly one block, delimited by markers derived from its
//! name. Blocks are located by literal substring search; everything outside
//! the replaced span is preserved byte for byte.

use std::ops::Range;
use std::path::Path;

use docsee_core::{Source, SourceName, MIRROR_DIR};

use crate::error::SyncError;
use crate::writer::{atomic_write, read_or_empty, write_if_changed, WriteResult};

const IGNORE_HEADER: &str = "# docsee - downloaded docs";

/// Start / end marker pair owned by one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn for_name(name: &SourceName) -> Self {
        let base = name.marker_base();
        Self {
            start: format!("<!-- {base}-Docs-START -->"),
            end: format!("<!-- {base}-Docs-END -->"),
        }
    }
}

/// Render the full block for `source`, markers included, without trailing newline.
pub fn build_block(source: &Source, index: &str) -> String {
    let markers = Markers::for_name(&source.name);
    let display = source.name.display_name();
    let mut lines = vec![
        markers.start,
        format!("[{display} Docs Index]|root: {}", source.local),
        format!(
            "|IMPORTANT: Prefer retrieval-led reasoning over pre-training-led reasoning for {display} tasks."
        ),
    ];
    if !index.trim().is_empty() {
        lines.push(index.to_string());
    }
    lines.push(markers.end);
    lines.join("\n")
}

enum Span {
    Found(Range<usize>),
    Absent,
    Unterminated,
}

fn find_block(document: &str, markers: &Markers) -> Span {
    let Some(start) = document.find(&markers.start) else {
        return Span::Absent;
    };
    let after_start = start + markers.start.len();
    match document[after_start..].find(&markers.end) {
        Some(offset) => Span::Found(start..after_start + offset + markers.end.len()),
        None => Span::Unterminated,
    }
}

/// Replace the source's block in `document`, or append it.
///
/// Returns `None` when the start marker exists without an end marker after it.
pub(crate) fn upsert_block(document: &str, source: &Source, index: &str) -> Option<String> {
    let markers = Markers::for_name(&source.name);
    let block = build_block(source, index);
    match find_block(document, &markers) {
        Span::Found(range) => {
            let mut next = String::with_capacity(document.len() + block.len());
            next.push_str(&document[..range.start]);
            next.push_str(&block);
            next.push_str(&document[range.end..]);
            Some(next)
        }
        Span::Absent if document.trim().is_empty() => Some(format!("{block}\n")),
        Span::Absent => Some(format!("{}\n\n{block}\n", document.trim_end())),
        Span::Unterminated => None,
    }
}

/// Upsert the index block for `source` into `document`, then make sure the
/// mirror directory is git-ignored under `root`.
///
/// The document is only rewritten when its content changes.
pub fn inject_block(
    root: &Path,
    document: &Path,
    source: &Source,
    index: &str,
) -> Result<WriteResult, SyncError> {
    let current = read_or_empty(document)?;
    let next = upsert_block(&current, source, index).ok_or_else(|| SyncError::UnterminatedBlock {
        path: document.to_path_buf(),
        marker: Markers::for_name(&source.name).start,
    })?;
    let result = write_if_changed(document, &next)?;
    ensure_ignored(root)?;
    Ok(result)
}

/// Append the mirror directory to `<root>/.gitignore` unless an equivalent
/// line already exists. Returns whether the file was changed.
pub fn ensure_ignored(root: &Path) -> Result<bool, SyncError> {
    let path = root.join(".gitignore");
    let content = read_or_empty(&path)?;
    let entry = format!("{MIRROR_DIR}/");
    let already = content.lines().any(|line| {
        let line = line.trim();
        line.trim_start_matches('/').trim_end_matches('/') == MIRROR_DIR
    });
    if already {
        return Ok(false);
    }

    let block = format!("{IGNORE_HEADER}\n{entry}\n");
    // Only newlines are trimmed: trailing spaces can be significant in ignore rules.
    let existing = content.trim_end_matches(['\n', '\r']);
    let next = if existing.trim().is_empty() {
        block
    } else {
        format!("{existing}\n\n{block}")
    };
    atomic_write(&path, &next)?;
    tracing::debug!("added {entry} to {}", path.display());
    Ok(true)
}
