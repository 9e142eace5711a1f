//! Constants for RESTCONF address handling and error encoding.

/// Canonical mount prefix of the RESTCONF datastore resource.
pub const DEFAULT_DATA_MOUNT: &str = "/restconf/data/";

/// Canonical mount prefix of the RESTCONF event stream resource.
pub const DEFAULT_STREAMS_MOUNT: &str = "/restconf/streams/";

/// Media type of XML encoded YANG data (RFC 8040).
pub const YANG_DATA_XML: &str = "application/yang-data+xml";

/// Media type of JSON encoded YANG data (RFC 8040).
pub const YANG_DATA_JSON: &str = "application/yang-data+json";

/// Content type of the plain-text error fallback.
pub const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// XML namespace of the `ietf-restconf` module.
pub const RESTCONF_XML_NAMESPACE: &str = "urn:ietf:params:xml:ns:yang:ietf-restconf";

/// Qualified name of the JSON errors container.
pub const RESTCONF_JSON_ERRORS: &str = "ietf-restconf:errors";

/// Separator between a URL scheme and its authority.
pub const SCHEME_SEPARATOR: &str = "://";

/// Separator between a module name and the instance path.
pub const MODULE_SEPARATOR: char = ':';
