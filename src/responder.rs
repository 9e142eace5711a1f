//! Encoding of RESTCONF error bodies.
//!
//! [`ErrorResponder`] turns a [`ProtocolError`] into the `ietf-restconf:errors`
//! document of RFC 8040, section 7.1, in XML or JSON:
//!
//! ```text
//! <errors xmlns="urn:ietf:params:xml:ns:yang:ietf-restconf"><error>
//!   <error-type/><error-tag/>[<error-path/>]<error-message/>
//! </error></errors>
//!
//! {"ietf-restconf:errors":{"error":[{"error-type":..,"error-tag":..,
//!   ["error-path":..,]"error-message":..}]}}
//! ```
//!
//! Both encodings are written on a single line without a trailing newline.

use std::borrow::Cow;
use std::io::Write;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::{
    DEFAULT_DATA_MOUNT, PLAIN_TEXT, RESTCONF_JSON_ERRORS, RESTCONF_XML_NAMESPACE, YANG_DATA_JSON,
    YANG_DATA_XML,
};
use crate::error::{SerializationError, SerializationErrorKind};
use crate::protocol_error::ProtocolError;

/// How much diagnostic detail error bodies reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ComplianceLevel {
    /// RFC 8040 envelope with the client-safe message only.
    #[default]
    Strict,
    /// RFC 8040 envelope; the message is followed by internal detail.
    Relaxed,
    /// Plain-text message without an envelope.
    Simple,
}

/// Encoding of the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// `application/yang-data+xml`
    Xml,
    /// `application/yang-data+json`
    #[default]
    Json,
}

impl MediaType {
    /// Returns the media type string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xml => YANG_DATA_XML,
            Self::Json => YANG_DATA_JSON,
        }
    }

    /// Picks the encoding for a `Content-Type` or `Accept` value.
    ///
    /// Any XML type selects [`MediaType::Xml`]; everything else is JSON.
    ///
    /// ```
    /// use restconf_address::MediaType;
    ///
    /// assert_eq!(MediaType::from_content_type("application/yang-data+xml"), MediaType::Xml);
    /// assert_eq!(MediaType::from_content_type("text/xml; charset=utf-8"), MediaType::Xml);
    /// assert_eq!(MediaType::from_content_type("application/yang-data+json"), MediaType::Json);
    /// ```
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type
            .split_once(';')
            .map_or(content_type, |(essence, _)| essence)
            .trim();
        if essence.to_ascii_lowercase().ends_with("xml") {
            Self::Xml
        } else {
            Self::Json
        }
    }
}

/// The parts of the failed request the responder looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestInfo<'a> {
    /// HTTP method, used for logging
    pub method: &'a str,
    /// Request target (path and optional query)
    pub path: &'a str,
}

impl<'a> RequestInfo<'a> {
    /// Creates request info from a method and request target.
    #[must_use]
    pub const fn new(method: &'a str, path: &'a str) -> Self {
        Self { method, path }
    }
}

/// What the transport has to set after an error body was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorReply {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` of the written body
    pub content_type: &'static str,
}

/// Writes RESTCONF error bodies.
///
/// Owns the mount prefix that is stripped from request paths to build the
/// `error-path`.
///
/// # Examples
///
/// ```
/// use restconf_address::{ComplianceLevel, ErrorResponder, ErrorTag, MediaType, ProtocolError, RequestInfo};
///
/// let responder = ErrorResponder::new();
/// let err = ProtocolError::new(ErrorTag::DataMissing, "no such node");
/// let request = RequestInfo::new("GET", "/restconf/data/car:engine");
///
/// let mut body = Vec::new();
/// let reply = responder
///     .handle_err(ComplianceLevel::Strict, &err, &request, &mut body, MediaType::Json)
///     .unwrap();
/// assert_eq!(reply.status, 409);
/// assert_eq!(
///     String::from_utf8(body).unwrap(),
///     r#"{"ietf-restconf:errors":{"error":[{"error-type":"protocol","error-tag":"data-missing","error-path":"car:engine","error-message":"no such node"}]}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponder {
    mount_prefix: String,
}

impl Default for ErrorResponder {
    fn default() -> Self {
        Self {
            mount_prefix: DEFAULT_DATA_MOUNT.to_string(),
        }
    }
}

impl ErrorResponder {
    /// Creates a responder for the default `/restconf/data/` mount.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mount prefix stripped from request paths.
    #[must_use]
    pub fn with_mount_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.mount_prefix = prefix.into();
        self
    }

    /// Returns the configured mount prefix.
    #[must_use]
    pub fn mount_prefix(&self) -> &str {
        &self.mount_prefix
    }

    /// Strips the mount prefix from a request path.
    ///
    /// Paths outside the mount are returned unchanged; nothing is decoded.
    #[must_use]
    pub fn decode_error_path<'p>(&self, path: &'p str) -> &'p str {
        path.strip_prefix(self.mount_prefix.as_str()).unwrap_or(path)
    }

    /// Encodes `err` and writes it to `sink`.
    ///
    /// The body is built in memory and handed to the sink with a single
    /// `write`; it is not retried. On success the status and content type
    /// the transport should send are returned.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the record cannot be encoded, the sink
    /// fails, or the sink accepts only part of the body.
    pub fn handle_err<W: Write + ?Sized>(
        &self,
        compliance: ComplianceLevel,
        err: &ProtocolError,
        request: &RequestInfo<'_>,
        sink: &mut W,
        media: MediaType,
    ) -> Result<ErrorReply, SerializationError> {
        let status = err.tag().status_code();
        tracing::debug!(
            method = request.method,
            path = request.path,
            status,
            error = %err,
            "web request error"
        );

        let (body, content_type) = self.encode(compliance, err, request, media)?;
        write_once(sink, &body, content_type).inspect_err(|e| {
            tracing::warn!(error = %e, "error body not delivered");
        })?;

        Ok(ErrorReply {
            status,
            content_type,
        })
    }

    fn encode(
        &self,
        compliance: ComplianceLevel,
        err: &ProtocolError,
        request: &RequestInfo<'_>,
        media: MediaType,
    ) -> Result<(Vec<u8>, &'static str), SerializationError> {
        let message = match (compliance, err.detail()) {
            (ComplianceLevel::Relaxed, Some(detail)) => {
                Cow::Owned(format!("{}: {detail}", err.message()))
            }
            _ => Cow::Borrowed(err.message()),
        };

        if compliance == ComplianceLevel::Simple {
            return Ok((format!("{message}\n").into_bytes(), PLAIN_TEXT));
        }

        let entry = ErrorEntry {
            error_type: err.error_type().as_str(),
            error_tag: err.tag().as_str(),
            error_path: self.error_path(err, request.path),
            error_message: &message,
        };

        match media {
            MediaType::Xml => Ok((encode_xml(&entry).into_bytes(), YANG_DATA_XML)),
            MediaType::Json => serde_json::to_vec(&ErrorsDocument { entry })
                .map(|body| (body, YANG_DATA_JSON))
                .map_err(|e| SerializationError {
                    content_type: YANG_DATA_JSON,
                    kind: SerializationErrorKind::Encode {
                        reason: e.to_string(),
                    },
                }),
        }
    }

    fn error_path<'s>(&self, err: &'s ProtocolError, request_path: &'s str) -> Option<&'s str> {
        let path = err.path().unwrap_or_else(|| {
            let target = request_path
                .split_once('?')
                .map_or(request_path, |(path, _)| path);
            self.decode_error_path(target)
        });
        Some(path).filter(|p| !p.is_empty())
    }
}

/// Strips the default `/restconf/data/` mount from a request path.
///
/// ```
/// use restconf_address::decode_error_path;
///
/// assert_eq!(decode_error_path("/restconf/data/foo:some/path"), "foo:some/path");
/// assert_eq!(decode_error_path("/other/foo:x"), "/other/foo:x");
/// ```
#[must_use]
pub fn decode_error_path(path: &str) -> &str {
    path.strip_prefix(DEFAULT_DATA_MOUNT).unwrap_or(path)
}

/// Writes an error body using a responder for the default mount.
///
/// # Errors
///
/// Returns `SerializationError` if the body cannot be encoded or written;
/// see [`ErrorResponder::handle_err`].
pub fn handle_err<W: Write + ?Sized>(
    compliance: ComplianceLevel,
    err: &ProtocolError,
    request: &RequestInfo<'_>,
    sink: &mut W,
    media: MediaType,
) -> Result<ErrorReply, SerializationError> {
    ErrorResponder::default().handle_err(compliance, err, request, sink, media)
}

fn write_once<W: Write + ?Sized>(
    sink: &mut W,
    body: &[u8],
    content_type: &'static str,
) -> Result<(), SerializationError> {
    let written = sink.write(body).map_err(|e| SerializationError {
        content_type,
        kind: SerializationErrorKind::Write {
            kind: e.kind(),
            message: e.to_string(),
        },
    })?;

    if written == body.len() {
        Ok(())
    } else {
        Err(SerializationError {
            content_type,
            kind: SerializationErrorKind::ShortWrite {
                written,
                expected: body.len(),
            },
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ErrorEntry<'a> {
    error_type: &'a str,
    error_tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_path: Option<&'a str>,
    error_message: &'a str,
}

#[derive(Serialize)]
struct ErrorList<'e, 'a> {
    error: &'e [ErrorEntry<'a>],
}

struct ErrorsDocument<'a> {
    entry: ErrorEntry<'a>,
}

impl Serialize for ErrorsDocument<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            RESTCONF_JSON_ERRORS,
            &ErrorList {
                error: std::slice::from_ref(&self.entry),
            },
        )?;
        map.end()
    }
}

fn encode_xml(entry: &ErrorEntry<'_>) -> String {
    let mut out = String::with_capacity(192 + entry.error_message.len());
    out.push_str("<errors xmlns=\"");
    out.push_str(RESTCONF_XML_NAMESPACE);
    out.push_str("\"><error>");
    push_element(&mut out, "error-type", entry.error_type);
    push_element(&mut out, "error-tag", entry.error_tag);
    if let Some(path) = entry.error_path {
        push_element(&mut out, "error-path", path);
    }
    push_element(&mut out, "error-message", entry.error_message);
    out.push_str("</error></errors>");
    out
}

fn push_element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
