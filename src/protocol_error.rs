//! RESTCONF error records (RFC 8040, section 7).

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// Layer an error originated in (`error-type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// Transport layer
    Transport,
    /// RPC layer
    Rpc,
    /// Protocol operation layer
    #[default]
    Protocol,
    /// Server application layer
    Application,
}

impl ErrorType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Rpc => "rpc",
            Self::Protocol => "protocol",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error condition (`error-tag`) and the HTTP status it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorTag {
    /// Resource in use (409)
    InUse,
    /// Invalid value in the request, or resource not found (400)
    InvalidValue,
    /// Request body too large (413)
    RequestTooBig,
    /// Response would be too large (400)
    ResponseTooBig,
    /// Expected attribute missing (400)
    MissingAttribute,
    /// Attribute value not correct (400)
    BadAttribute,
    /// Unexpected attribute (400)
    UnknownAttribute,
    /// Element value not correct (400)
    BadElement,
    /// Unexpected element (400)
    UnknownElement,
    /// Unexpected namespace (400)
    UnknownNamespace,
    /// Access denied (403)
    AccessDenied,
    /// Lock held by another session (409)
    LockDenied,
    /// Insufficient resources (409)
    ResourceDenied,
    /// Rollback failed (500)
    RollbackFailed,
    /// Data already exists (409)
    DataExists,
    /// Data does not exist (409)
    DataMissing,
    /// Operation not supported (405)
    OperationNotSupported,
    /// Operation failed for another reason (500)
    OperationFailed,
    /// Operation partially applied (500)
    PartialOperation,
    /// Message could not be parsed (400)
    MalformedMessage,
}

impl ErrorTag {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InUse => "in-use",
            Self::InvalidValue => "invalid-value",
            Self::RequestTooBig | Self::ResponseTooBig => "too-big",
            Self::MissingAttribute => "missing-attribute",
            Self::BadAttribute => "bad-attribute",
            Self::UnknownAttribute => "unknown-attribute",
            Self::BadElement => "bad-element",
            Self::UnknownElement => "unknown-element",
            Self::UnknownNamespace => "unknown-namespace",
            Self::AccessDenied => "access-denied",
            Self::LockDenied => "lock-denied",
            Self::ResourceDenied => "resource-denied",
            Self::RollbackFailed => "rollback-failed",
            Self::DataExists => "data-exists",
            Self::DataMissing => "data-missing",
            Self::OperationNotSupported => "operation-not-supported",
            Self::OperationFailed => "operation-failed",
            Self::PartialOperation => "partial-operation",
            Self::MalformedMessage => "malformed-message",
        }
    }

    /// Returns the HTTP status code for this tag.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidValue
            | Self::ResponseTooBig
            | Self::MissingAttribute
            | Self::BadAttribute
            | Self::UnknownAttribute
            | Self::BadElement
            | Self::UnknownElement
            | Self::UnknownNamespace
            | Self::MalformedMessage => 400,
            Self::AccessDenied => 403,
            Self::OperationNotSupported => 405,
            Self::InUse
            | Self::LockDenied
            | Self::ResourceDenied
            | Self::DataExists
            | Self::DataMissing => 409,
            Self::RequestTooBig => 413,
            Self::RollbackFailed | Self::OperationFailed | Self::PartialOperation => 500,
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure ready to be reported to a RESTCONF client.
///
/// `message` is always safe to show. `detail` carries internal diagnostics
/// that only relaxed compliance levels reveal.
///
/// # Examples
///
/// ```
/// use restconf_address::{ErrorTag, ProtocolError};
///
/// let err = ProtocolError::new(ErrorTag::DataMissing, "no such interface")
///     .with_path("ietf-interfaces:interfaces/interface=eth9");
/// assert_eq!(err.tag().status_code(), 409);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    error_type: ErrorType,
    tag: ErrorTag,
    message: String,
    path: Option<String>,
    detail: Option<String>,
}

impl ProtocolError {
    /// Creates a protocol-layer error.
    #[must_use]
    pub fn new(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::default(),
            tag,
            message: message.into(),
            path: None,
            detail: None,
        }
    }

    /// Wraps an arbitrary error as `operation-failed`.
    ///
    /// The error's display becomes the message; its `source()` chain becomes
    /// the internal detail.
    #[must_use]
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        let mut record = Self::new(ErrorTag::OperationFailed, err.to_string());
        if !causes.is_empty() {
            record.detail = Some(causes.join(": "));
        }
        record
    }

    /// Sets the error type.
    #[must_use]
    pub fn with_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = error_type;
        self
    }

    /// Sets an explicit error path, overriding the one derived from the request.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attaches internal diagnostic detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the error type.
    #[must_use]
    pub const fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Returns the error tag.
    #[must_use]
    pub const fn tag(&self) -> ErrorTag {
        self.tag
    }

    /// Returns the client-safe message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the explicit error path, if set.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the internal detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.tag, self.error_type, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl Error for ProtocolError {}

impl From<AddressError> for ProtocolError {
    fn from(err: AddressError) -> Self {
        Self::new(ErrorTag::InvalidValue, "malformed resource address").with_detail(err.to_string())
    }
}
