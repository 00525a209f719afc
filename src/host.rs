//! Hostname canonicalization
//!
//! Lower-cases and percent-decodes the host, hands numeric-looking hosts
//! to the IP canonicalizer, and collapses stray dots in everything else.

use tracing::debug;

use crate::error::{Error, Result};
use crate::escape::{escape_host, unescape_repeatedly};
use crate::ip::{canonicalize_ip, looks_like_ip};

/// Canonicalize a standalone hostname.
///
/// Unlike hosts inside a full URL, a standalone hostname must form a
/// dotted domain: at least two non-empty labels, or a valid IP address.
/// `localhost` is rejected here.
pub fn canonicalize_host(host: &str) -> Result<String> {
    canonicalize_labels(host, 2)
}

/// Canonicalize the host component of a URL; single-label hosts pass
pub(crate) fn canonical_host(host: &str) -> Result<String> {
    canonicalize_labels(host, 1)
}

fn canonicalize_labels(host: &str, min_labels: usize) -> Result<String> {
    let lowered = host.to_lowercase();
    let mut decoded = unescape_repeatedly(lowered.as_bytes());
    // Escapes can hide uppercase: %41 decodes to A
    decoded.make_ascii_lowercase();

    // An IP host is done as-is. Decoding can leave non-UTF-8 bytes, which
    // can never be part of a numeric host.
    if let Ok(text) = std::str::from_utf8(&decoded) {
        if looks_like_ip(text) {
            match canonicalize_ip(text) {
                Ok(ip) => return Ok(ip),
                Err(e) => debug!("Host {} is not an IP, keeping as hostname: {}", host, e),
            }
        }
    }

    let labels: Vec<&[u8]> = decoded
        .split(|&b| b == b'.')
        .filter(|label| !label.is_empty())
        .collect();
    if labels.len() < min_labels {
        debug!("Host has too few labels: {}", host);
        return Err(Error::InvalidHostname(host.to_string()));
    }

    Ok(escape_host(&labels.join(&b'.')))
}
