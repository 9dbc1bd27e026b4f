//! src/util/paths.rs
//!
//! Slash handling for remote storage paths. Remote paths are plain strings
//! in a `/`-rooted virtual namespace, never `std::path` values: the remote
//! authority defines the separator, not the local platform.

use compact_str::{CompactString, format_compact};

/// Join a child name onto an absolute base path.
///
/// Never produces a double slash and never drops the leading slash:
/// `join_child("/", "docs") == "/docs"`, `join_child("/docs/", "x") == "/docs/x"`.
pub fn join_child(base: &str, name: &str) -> CompactString {
    if base.ends_with('/') {
        format_compact!("{base}{name}")
    } else {
        format_compact!("{base}/{name}")
    }
}

/// Non-empty `/`-separated segments of a path. Root has zero segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Final segment of a path, used to derive a download filename.
/// Falls back to `"download"` for root or degenerate paths.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("download")
}

/// True if the path is absolute in the remote namespace.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_child_no_double_slash() {
        assert_eq!(join_child("/docs/", "x.txt"), "/docs/x.txt");
        assert_eq!(join_child("/docs", "x.txt"), "/docs/x.txt");
    }

    #[test]
    fn test_join_child_keeps_leading_slash() {
        assert_eq!(join_child("/", "docs"), "/docs");
    }

    #[test]
    fn test_segments_filter_empty() {
        let parts: Vec<&str> = segments("/a//b/").collect();
        assert_eq!(parts, vec!["a", "b"]);
        assert_eq!(segments("/").count(), 0);
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("/docs/report.pdf"), "report.pdf");
        assert_eq!(file_name_of("/"), "download");
    }
}
