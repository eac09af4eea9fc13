//! Eligible-extension predicate.
//!
//! Used for download scope, prune scope and the index alike, so a file type
//! that is never downloaded is also never deleted.

use std::path::Path;

/// Plain-text documentation extensions that are mirrored.
pub const ELIGIBLE_EXTENSIONS: [&str; 4] = ["md", "mdx", "txt", "rst"];

/// True iff the final extension of `path` is one of [`ELIGIBLE_EXTENSIONS`].
///
/// Case-sensitive. A bare dotfile such as `.md` has no extension.
pub fn is_eligible(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ELIGIBLE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("intro.md", true)]
    #[case("guides/setup.mdx", true)]
    #[case("a/b/c/notes.txt", true)]
    #[case("index.rst", true)]
    #[case("archive.tar.md", true)]
    #[case("keep.png", false)]
    #[case("README.MD", false)]
    #[case("Makefile", false)]
    #[case(".md", false)]
    #[case("docs/.md", false)]
    #[case("page.md.bak", false)]
    #[case("", false)]
    fn eligibility(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_eligible(path), expected, "{path}");
    }
}
