//! Error types for address splitting and error encoding.

use std::fmt;
use std::io;

/// A request URL that cannot be decomposed into base address, module and path.
///
/// Every variant of [`AddressErrorKind`] is a malformed address; the kind only
/// says which part of the URL was missing or out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressError {
    /// The input that failed to split
    pub input: String,
    /// The specific error that occurred
    pub kind: AddressErrorKind,
}

/// Specific reasons an address is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressErrorKind {
    /// No `scheme://` prefix
    MissingScheme,
    /// Nothing between `scheme://` and the path
    MissingAuthority,
    /// The URL ends after the authority
    MissingPath,
    /// No path segment contains a module separator
    MissingModule,
    /// The module-boundary segment starts with the separator
    EmptyModule,
    /// Fewer mount segments precede the module than configured
    TooFewMountSegments {
        /// Minimum required segments
        min: usize,
        /// Segments found
        found: usize,
    },
    /// More mount segments precede the module than configured
    TooManyMountSegments {
        /// Maximum allowed segments
        max: usize,
    },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed address '{}': ", self.input)?;
        match &self.kind {
            AddressErrorKind::MissingScheme => {
                write!(f, "missing scheme; expected an absolute URL like 'https://host/...'")
            }
            AddressErrorKind::MissingAuthority => write!(f, "missing authority after scheme"),
            AddressErrorKind::MissingPath => write!(f, "missing path after authority"),
            AddressErrorKind::MissingModule => {
                write!(f, "no path segment names a module ('module:path')")
            }
            AddressErrorKind::EmptyModule => write!(f, "module name before ':' is empty"),
            AddressErrorKind::TooFewMountSegments { min, found } => write!(
                f,
                "{found} mount segment(s) precede the module, at least {min} required"
            ),
            AddressErrorKind::TooManyMountSegments { max } => {
                write!(f, "more than {max} mount segment(s) precede the module")
            }
        }
    }
}

impl std::error::Error for AddressError {}

/// An error body that could not be produced or delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationError {
    /// Media type the body was being encoded as
    pub content_type: &'static str,
    /// The specific error that occurred
    pub kind: SerializationErrorKind,
}

/// Specific serialization failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializationErrorKind {
    /// The encoder rejected the error record
    Encode {
        /// Encoder diagnostic
        reason: String,
    },
    /// The response sink returned an I/O error
    Write {
        /// Kind of the I/O error
        kind: io::ErrorKind,
        /// Display form of the I/O error
        message: String,
    },
    /// The response sink accepted only part of the body
    ShortWrite {
        /// Bytes accepted by the sink
        written: usize,
        /// Length of the encoded body
        expected: usize,
    },
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write '{}' error body: ", self.content_type)?;
        match &self.kind {
            SerializationErrorKind::Encode { reason } => write!(f, "encoding failed: {reason}"),
            SerializationErrorKind::Write { message, .. } => write!(f, "sink error: {message}"),
            SerializationErrorKind::ShortWrite { written, expected } => {
                write!(f, "sink accepted {written} of {expected} bytes")
            }
        }
    }
}

impl std::error::Error for SerializationError {}
