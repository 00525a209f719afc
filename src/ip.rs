//! Numeric host normalization
//!
//! Hosts that read as IPv4 addresses come in many spellings: plain dotted
//! quads, octal or hex components, single packed integers, and partial
//! forms like `1.2.3`. Resolvers accept all of them, so phishing URLs use
//! them to dodge string matching. This module rewrites every such spelling
//! into the dotted-quad text the resolver would actually connect to.

use std::net::Ipv4Addr;

use crate::error::{Error, Result};

/// Whether a host could be a numeric IPv4 form; such forms always open
/// with a digit or a dot
pub(crate) fn looks_like_ip(host: &str) -> bool {
    host.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// Interpret a host as an IPv4 address and return its dotted-quad text.
///
/// Components may be decimal, octal (leading `0`), or hex (leading `0x`).
/// Fewer than four components follow resolver packing rules: all but the
/// last fill octets from the left and the last supplies the remaining
/// bits. A single component is the whole 32-bit address. Values wrap
/// modulo 2^32, so oversized components carry into neighboring octets
/// rather than failing.
pub fn canonicalize_ip(host: &str) -> Result<String> {
    let host = strip_resolver_suffix(host);

    let components: Vec<&str> = host.split('.').filter(|c| !c.is_empty()).collect();
    if components.len() > 4 {
        return Err(Error::TooManyIpComponents(components.len()));
    }
    let (last, head) = match components.split_last() {
        Some(split) => split,
        None => return Err(Error::InvalidIpComponent(host.to_string())),
    };

    // One malformed octal component like 09 disables octal for the whole
    // address; those components reparse as decimal.
    let allow_octal = !has_bad_octal(host);

    let mut ip: u32 = 0;
    for component in head {
        let value = parse_component(component, allow_octal)
            .ok_or_else(|| Error::InvalidIpComponent(component.to_string()))?;
        ip = ip.wrapping_shl(8).wrapping_add(value);
    }
    for _ in head.len()..4 {
        ip = ip.wrapping_shl(8);
    }
    let value = parse_component(last, allow_octal)
        .ok_or_else(|| Error::InvalidIpComponent(last.to_string()))?;
    ip = ip.wrapping_add(value);

    Ok(Ipv4Addr::from(ip).to_string())
}

/// Drop trailing text after a dotted quad in hosts of at most 15 chars.
///
/// The Windows resolver accepts `10.192.95.89 xy` as `10.192.95.89` as
/// long as the whole string stays within 15 characters; longer strings go
/// to DNS instead.
fn strip_resolver_suffix(host: &str) -> &str {
    if host.len() > 15 {
        return host;
    }
    match host.find(' ') {
        Some(pos) if is_dotted_quad(&host[..pos]) => &host[..pos],
        _ => host,
    }
}

/// Four dot-separated runs of one to three ASCII digits
fn is_dotted_quad(host: &str) -> bool {
    let parts: Vec<&str> = host.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| (1..=3).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit()))
}

/// Whether any component starts with `0` and has an 8 or 9 in its leading
/// digit run
fn has_bad_octal(host: &str) -> bool {
    host.split('.').any(|component| {
        let mut bytes = component.bytes();
        if bytes.next() != Some(b'0') {
            return false;
        }
        for b in bytes {
            match b {
                b'8' | b'9' => return true,
                b'0'..=b'7' => continue,
                _ => return false,
            }
        }
        false
    })
}

/// Parse one address component as hex, octal, or decimal, wrapping modulo
/// 2^32
fn parse_component(component: &str, allow_octal: bool) -> Option<u32> {
    if let Some(digits) = component
        .strip_prefix("0x")
        .or_else(|| component.strip_prefix("0X"))
    {
        if digits.is_empty() {
            return None;
        }
        return fold_digits(digits, 16);
    }
    if allow_octal && component.len() > 1 {
        if let Some(value) = component.strip_prefix('0').and_then(|d| fold_digits(d, 8)) {
            return Some(value);
        }
    }
    if component.is_empty() {
        return None;
    }
    fold_digits(component, 10)
}

/// Accumulate digits in the given radix with wrapping arithmetic, so
/// arbitrarily long components stay congruent modulo 2^32
fn fold_digits(digits: &str, radix: u32) -> Option<u32> {
    let mut value: u32 = 0;
    for c in digits.chars() {
        let digit = c.to_digit(radix)?;
        value = value.wrapping_mul(radix).wrapping_add(digit);
    }
    Some(value)
}
