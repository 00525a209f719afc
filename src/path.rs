//! Path canonicalization
//!
//! Percent-decodes the path, resolves `.` and `..` segments, collapses
//! runs of slashes, and re-escapes the result.

use crate::escape::{escape, unescape_repeatedly};

/// Canonicalize a URL path, always yielding a string that starts with `/`
pub(crate) fn canonical_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    // Splitters can hand over a path without its leading slash, e.g. the
    // `q` in `ftp://host.com?q`; browsers prepend one and so do we.
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    let decoded = unescape_repeatedly(path.as_bytes());

    // A trailing empty, `.`, or `..` segment names a directory, so the
    // canonical form keeps a trailing slash.
    let is_directory =
        decoded.ends_with(b"/") || decoded.ends_with(b"/.") || decoded.ends_with(b"/..");

    let mut segments: Vec<&[u8]> = Vec::new();
    for segment in decoded.split(|&b| b == b'/') {
        match segment {
            b".." => {
                segments.pop();
            }
            // Empty segments come from duplicate slashes and drop out here
            b"." | b"" => {}
            _ => segments.push(segment),
        }
    }

    let mut canonical = vec![b'/'];
    canonical.extend_from_slice(&segments.join(&b'/'));
    if is_directory && !canonical.ends_with(b"/") {
        canonical.push(b'/');
    }

    escape(&canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_path_dot_segments() {
        assert_eq!(canonical_path("/a/b/c/./../../g"), "/a/g");
        assert_eq!(canonical_path("/../blah"), "/blah");
        assert_eq!(canonical_path("/blah/.."), "/");
        assert_eq!(canonical_path("/./"), "/");
        assert_eq!(canonical_path("/what/do/../think/.."), "/what/");
    }

    #[test]
    fn test_canonical_path_slash_runs() {
        assert_eq!(canonical_path("//x//y//"), "/x/y/");
        assert_eq!(canonical_path("/foo"), "/foo");
        assert_eq!(canonical_path("/foo/"), "/foo/");
    }

    #[test]
    fn test_canonical_path_escapes() {
        assert_eq!(canonical_path("/%25%32%35"), "/%25");
        assert_eq!(canonical_path("/foo%23bar"), "/foo%23bar");
        assert_eq!(canonical_path("/a b"), "/a%20b");
        assert_eq!(canonical_path("/%2e/%2e%2e/x"), "/x");
    }

    #[test]
    fn test_canonical_path_leading_slash() {
        assert_eq!(canonical_path(""), "/");
        assert_eq!(canonical_path("q"), "/q");
    }
}
