//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use restconf_address::prelude::*;
//!
//! let addr = split_address("http://server/restconf/data/car:engine").unwrap();
//! assert_eq!(addr.module(), "car");
//! ```

pub use crate::{
    // Address decomposition
    append_url_segment, split_address, split_address_with, split_host_port, HostPort,
    ParsedAddress, PathCursor, SegmentToken, SplitOptions,
    // Error bodies
    decode_error_path, handle_err, ComplianceLevel, ErrorReply, ErrorResponder, ErrorTag,
    ErrorType, MediaType, ProtocolError, RequestInfo,
    // Errors
    AddressError, AddressErrorKind, SerializationError, SerializationErrorKind,
    // Constants
    DEFAULT_DATA_MOUNT, DEFAULT_STREAMS_MOUNT, YANG_DATA_JSON, YANG_DATA_XML,
};
