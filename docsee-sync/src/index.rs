//! Compact directory index of a mirror.
//!
//! One line per directory holding eligible files, groups and file names in
//! byte order:
//!
//! ```text
//! |{overview.md}
//! |guides:{intro.md,setup.mdx}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SyncError;
use crate::mirror::eligible_files;

/// Build the index for the mirror rooted at `root`.
///
/// A missing root produces an empty string.
pub fn build_index(root: &Path) -> Result<String, SyncError> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in eligible_files(root)? {
        let (dir, name) = match file.relative.rsplit_once('/') {
            Some((dir, name)) => (dir.to_string(), name.to_string()),
            None => (String::new(), file.relative),
        };
        groups.entry(dir).or_default().push(name);
    }

    let lines: Vec<String> = groups
        .into_iter()
        .map(|(dir, mut names)| {
            // Byte order, independent of the host locale.
            names.sort();
            let names = names.join(",");
            if dir.is_empty() {
                format!("|{{{names}}}")
            } else {
                format!("|{dir}:{{{names}}}")
            }
        })
        .collect();
    Ok(lines.join("\n"))
}
