//! Percent-decoding and safe-character escaping
//!
//! The two halves of the normalization invariant: decode to a fixpoint
//! first, re-escape exactly once at the end. Both operate on raw bytes
//! because decoding can produce values that are not valid UTF-8.

/// Iteration ceiling for the repeated percent-decode loop
///
/// Decoding strictly shrinks its input, so the ceiling only matters for
/// adversarial nesting depths.
const MAX_DECODE_ITERATIONS: usize = 50;

/// Bytes emitted literally by `escape`; everything else becomes `%XX`
///
/// Printable ASCII 33-126 minus `%` (so existing escapes survive) and `#`
/// (a bare hash would read as a fragment delimiter on the next pass).
static SAFE: [bool; 256] = build_safe_table();

const fn build_safe_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut b = 33usize;
    while b <= 126 {
        table[b] = true;
        b += 1;
    }
    table[b'%' as usize] = false;
    table[b'#' as usize] = false;
    table
}

/// Bytes emitted literally by `escape_host`
///
/// The safe set minus `/`, `?`, `:`, and `@`, which would read as
/// authority delimiters on the next parse.
static HOST_SAFE: [bool; 256] = build_host_safe_table();

const fn build_host_safe_table() -> [bool; 256] {
    let mut table = build_safe_table();
    table[b'/' as usize] = false;
    table[b'?' as usize] = false;
    table[b':' as usize] = false;
    table[b'@' as usize] = false;
    table
}

/// Value of an ASCII hex digit, either case
fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode `%XX` escapes in a single pass
///
/// A malformed escape passes through literally: the `%` is emitted and the
/// scan resumes at the very next byte, so the look-ahead can still start a
/// real escape (`%%41` decodes to `%A`).
fn unescape_once(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        let b = input[i];
        if b == b'%' && i + 2 < input.len() {
            if let (Some(hi), Some(lo)) = (hex_val(input[i + 1]), hex_val(input[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(b);
        i += 1;
    }
    out
}

/// Percent-decode repeatedly until the bytes stop changing
///
/// Never fails: if `MAX_DECODE_ITERATIONS` is hit the partially decoded
/// bytes are returned as-is.
pub(crate) fn unescape_repeatedly(input: &[u8]) -> Vec<u8> {
    let mut current = input.to_vec();
    for _ in 0..MAX_DECODE_ITERATIONS {
        let unescaped = unescape_once(&current);
        if unescaped == current {
            break;
        }
        current = unescaped;
    }
    current
}

/// Escape every byte outside the safe set as uppercase `%XX`
pub(crate) fn escape(input: &[u8]) -> String {
    escape_with(&SAFE, input)
}

/// Escape host bytes; decoded authority delimiters stay escaped
pub(crate) fn escape_host(input: &[u8]) -> String {
    escape_with(&HOST_SAFE, input)
}

fn escape_with(safe: &[bool; 256], input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input {
        if safe[b as usize] {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_once() {
        assert_eq!(unescape_once(b"hello%20world"), b"hello world");
        assert_eq!(unescape_once(b"%2525"), b"%25");
        assert_eq!(unescape_once(b"no%escape"), b"no%escape");
        assert_eq!(unescape_once(b"%%41"), b"%A");
        assert_eq!(unescape_once(b"%"), b"%");
        assert_eq!(unescape_once(b"%4"), b"%4");
        assert_eq!(unescape_once(b"%fF"), b"\xff");
    }

    #[test]
    fn test_unescape_repeatedly() {
        assert_eq!(unescape_repeatedly(b"%25%32%35"), b"%");
        assert_eq!(unescape_repeatedly(b"%2525252525252525"), b"%");
        assert_eq!(unescape_repeatedly(b"asdf%25%32%35asd"), b"asdf%asd");
        assert_eq!(unescape_repeatedly(b"plain"), b"plain");
    }

    #[test]
    fn test_unescape_iteration_cap() {
        // 60 nesting levels; only 50 unwrap before the ceiling
        let deep = format!("%{}", "25".repeat(60));
        let partial = format!("%{}", "25".repeat(10));
        assert_eq!(unescape_repeatedly(deep.as_bytes()), partial.as_bytes());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(b"hello world"), "hello%20world");
        assert_eq!(escape(b"test#hash"), "test%23hash");
        assert_eq!(escape(b"100%"), "100%25");
        assert_eq!(escape(b"\x01\x80"), "%01%80");
        assert_eq!(escape(b"~!@$^&*()_+;"), "~!@$^&*()_+;");
    }

    #[test]
    fn test_escape_host() {
        assert_eq!(escape_host(b"a@b:80/c?d"), "a%40b%3A80%2Fc%3Fd");
        assert_eq!(escape_host(b"host%23.com"), "host%2523.com");
        assert_eq!(escape_host(b"google.com"), "google.com");
        // The general escaper leaves the same delimiters raw
        assert_eq!(escape(b"a@b:80/c?d"), "a@b:80/c?d");
    }

    #[test]
    fn test_safe_table() {
        assert!(SAFE[b'a' as usize]);
        assert!(SAFE[b'~' as usize]);
        assert!(SAFE[b'!' as usize]);
        assert!(!SAFE[b'%' as usize]);
        assert!(!SAFE[b'#' as usize]);
        assert!(!SAFE[b' ' as usize]);
        assert!(!SAFE[0x7f]);
        assert!(!SAFE[0xff]);
    }

    #[test]
    fn test_host_safe_table() {
        assert!(HOST_SAFE[b'a' as usize]);
        assert!(HOST_SAFE[b'.' as usize]);
        assert!(HOST_SAFE[b'-' as usize]);
        assert!(!HOST_SAFE[b'/' as usize]);
        assert!(!HOST_SAFE[b'?' as usize]);
        assert!(!HOST_SAFE[b':' as usize]);
        assert!(!HOST_SAFE[b'@' as usize]);
        assert!(!HOST_SAFE[b'%' as usize]);
        assert!(!HOST_SAFE[b'#' as usize]);
    }
}
