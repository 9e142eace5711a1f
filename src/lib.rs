//! Resource-address decomposition for RESTCONF servers.
//!
//! RESTCONF URLs overload `/`, `=` and `:` as path separator, list-key
//! delimiter and module boundary. This crate takes a request URL apart one
//! segment at a time and renders protocol errors back to the client.
//!
//! # Overview
//!
//! ```text
//! http://server/restconf/data/ietf-interfaces:interfaces/interface=eth0?depth=1
//! `-------- base address ----'`---- module ---'`------------- path -----------'
//! ```
//!
//! - [`split_address`] finds the module boundary and returns a [`ParsedAddress`]
//! - [`PathCursor`] walks a path segment by segment, keeping raw and decoded forms
//! - [`split_host_port`] splits listen/connect addresses, IPv6 literals included
//! - [`append_url_segment`] joins path fragments with a single `/`
//! - [`ErrorResponder`] writes `ietf-restconf:errors` bodies in XML or JSON
//!
//! # Quick Start
//!
//! ```rust
//! use restconf_address::{split_address, PathCursor};
//!
//! let addr = split_address("http://server/restconf/data/car:engine/cylinder=4?depth=1").unwrap();
//! assert_eq!(addr.base_address(), "http://server/restconf/data/");
//! assert_eq!(addr.module(), "car");
//! assert_eq!(addr.path(), "engine/cylinder=4?depth=1");
//!
//! // walk the instance path
//! let cursor = PathCursor::parse(addr.path());
//! let (node, rest) = cursor.shift_optional_param_within_segment('=', '/');
//! assert_eq!(node.key(), "engine");
//! let (list, _) = rest.shift_optional_param_within_segment('=', '/');
//! assert_eq!(list.key(), "cylinder");
//! assert_eq!(list.param(), Some("4"));
//! ```
//!
//! # Error Bodies
//!
//! ```rust
//! use restconf_address::{handle_err, ComplianceLevel, ErrorTag, MediaType, ProtocolError, RequestInfo};
//!
//! let err = ProtocolError::new(ErrorTag::InvalidValue, "bad list key");
//! let mut body = Vec::new();
//! let reply = handle_err(
//!     ComplianceLevel::Strict,
//!     &err,
//!     &RequestInfo::new("PUT", "/restconf/data/car:engine"),
//!     &mut body,
//!     MediaType::Xml,
//! ).unwrap();
//! assert_eq!(reply.status, 400);
//! assert!(String::from_utf8(body).unwrap().contains("<error-path>car:engine</error-path>"));
//! ```
//!
//! # Percent-Encoding
//!
//! Segments are returned decoded; the unconsumed remainder keeps the caller's
//! encoding. An encoded `/` never ends a segment. Inside a parameterized
//! segment, however, `%3D` and `=` cannot be told apart once decoded, so
//! clients must not encode the delimiters when exact round-tripping matters.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod address;
mod constants;
mod cursor;
mod error;
mod host_port;
#[cfg(kani)]
mod kani_impls;
mod percent;
pub mod prelude;
mod protocol_error;
mod responder;
mod url_segment;

pub use address::{split_address, split_address_with, ParsedAddress, SplitOptions};
pub use constants::{
    DEFAULT_DATA_MOUNT, DEFAULT_STREAMS_MOUNT, PLAIN_TEXT, RESTCONF_JSON_ERRORS,
    RESTCONF_XML_NAMESPACE, YANG_DATA_JSON, YANG_DATA_XML,
};
pub use cursor::{PathCursor, SegmentToken};
pub use error::{AddressError, AddressErrorKind, SerializationError, SerializationErrorKind};
pub use host_port::{split_host_port, HostPort};
pub use protocol_error::{ErrorTag, ErrorType, ProtocolError};
pub use responder::{
    decode_error_path, handle_err, ComplianceLevel, ErrorReply, ErrorResponder, MediaType,
    RequestInfo,
};
pub use url_segment::append_url_segment;
