//! Error types for URL canonicalization

use thiserror::Error;

/// Result type alias for canonicalization operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the canonicalization pipeline
///
/// Malformed input is routine, so every variant means "this URL cannot be
/// canonicalized" and callers should drop or skip it. There is no partial
/// result: a failed stage fails the whole call.
#[derive(Error, Debug)]
pub enum Error {
    /// Input is empty or all-whitespace
    #[error("empty input")]
    EmptyInput,

    /// Input cannot be split into URL components, even with the default scheme
    #[error("unparsable URL: {0}")]
    UnparsableUrl(String),

    /// Scheme outside the http/https/ftp allow-list
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// Host component empty after user-info and port stripping
    #[error("empty host")]
    EmptyHost,

    /// Hostname has too few non-empty labels and is not an IP address
    #[error("invalid hostname: {0}")]
    InvalidHostname(String),

    /// Dotted IP component matches none of the hex/octal/decimal grammars
    #[error("invalid IP component: {0}")]
    InvalidIpComponent(String),

    /// More than 4 dotted components in an IP candidate
    #[error("too many IP components: {0}")]
    TooManyIpComponents(usize),
}
