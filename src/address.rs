//! Decomposition of request URLs into base address, module and path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MODULE_SEPARATOR, SCHEME_SEPARATOR};
use crate::cursor::PathCursor;
use crate::error::{AddressError, AddressErrorKind};
use crate::percent;

/// A request URL split at its module boundary.
///
/// # Structure
///
/// ```text
/// <base-address><module>:<path>
/// http://server/restconf/data/ietf-interfaces:interfaces/interface=eth0?depth=1
/// `------------ base ---------'`--- module ---'`----------- path -----------'
/// ```
///
/// The base address always ends with `/`, the module is never empty and the
/// path may be empty or carry a query.
///
/// # Examples
///
/// ```
/// use restconf_address::ParsedAddress;
///
/// let addr = ParsedAddress::parse("http://server/restconf/data/module:path/some=x").unwrap();
/// assert_eq!(addr.base_address(), "http://server/restconf/data/");
/// assert_eq!(addr.module(), "module");
/// assert_eq!(addr.path(), "path/some=x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParsedAddress {
    base_address: String,
    module: String,
    path: String,
}

impl ParsedAddress {
    /// Splits a URL with default [`SplitOptions`].
    ///
    /// # Errors
    ///
    /// Returns `AddressError` if the URL is malformed; see [`split_address`].
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        split_address(input)
    }

    /// Returns the scheme, authority and mount segments, ending in `/`.
    #[must_use]
    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    /// Returns the data-model module name.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the instance path after the module separator.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Consumes the address, returning `(base_address, module, path)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, String) {
        (self.base_address, self.module, self.path)
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{MODULE_SEPARATOR}{}",
            self.base_address, self.module, self.path
        )
    }
}

impl FromStr for ParsedAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ParsedAddress {
    type Error = AddressError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// Bounds on the mount segments that may precede the module boundary.
///
/// The default accepts any number, including none.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Minimum number of mount segments.
    ///
    /// Default: 0
    pub min_mount_segments: usize,

    /// Maximum number of mount segments. None means unbounded.
    ///
    /// Default: None
    pub max_mount_segments: Option<usize>,
}

impl SplitOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum number of mount segments.
    #[must_use]
    pub const fn with_min_mount_segments(mut self, min: usize) -> Self {
        self.min_mount_segments = min;
        self
    }

    /// Sets the maximum number of mount segments.
    #[must_use]
    pub const fn with_max_mount_segments(mut self, max: usize) -> Self {
        self.max_mount_segments = Some(max);
        self
    }
}

/// Splits a request URL into base address, module and path.
///
/// Path segments are consumed until one contains a `:`, literal or encoded as
/// `%3A`. The consumed segments form the base address; the boundary segment is
/// split at its first colon into the decoded module name and the start of the
/// path. The path keeps the caller's encoding from the colon onward, and any
/// query is kept verbatim, so `base + module + ":" + path` splits again into
/// the same three parts.
///
/// # Errors
///
/// Returns `AddressError` if:
/// - The URL has no scheme or authority
/// - No path follows the authority
/// - No segment contains a module separator
/// - The module name is empty
///
/// # Examples
///
/// ```
/// use restconf_address::split_address;
///
/// let addr = split_address("foo://server/mount/module:").unwrap();
/// assert_eq!(addr.base_address(), "foo://server/mount/");
/// assert_eq!(addr.module(), "module");
/// assert_eq!(addr.path(), "");
///
/// assert!(split_address("foo://server/mount/no-module").is_err());
/// ```
pub fn split_address(input: &str) -> Result<ParsedAddress, AddressError> {
    split_address_with(input, &SplitOptions::default())
}

/// Splits a request URL, enforcing the given mount-segment bounds.
///
/// # Errors
///
/// Returns `AddressError` for the reasons listed on [`split_address`], or if
/// the number of mount segments is outside `options`.
///
/// # Examples
///
/// ```
/// use restconf_address::{split_address_with, SplitOptions};
///
/// let options = SplitOptions::new().with_min_mount_segments(1);
/// assert!(split_address_with("http://server/module:path", &options).is_err());
/// assert!(split_address_with("http://server/data/module:path", &options).is_ok());
/// ```
pub fn split_address_with(
    input: &str,
    options: &SplitOptions,
) -> Result<ParsedAddress, AddressError> {
    split_inner(input, options).map_err(|kind| {
        tracing::trace!(url = input, ?kind, "address did not split");
        AddressError {
            input: input.to_string(),
            kind,
        }
    })
}

fn split_inner(input: &str, options: &SplitOptions) -> Result<ParsedAddress, AddressErrorKind> {
    let (origin, path_and_query) = split_origin(input)?;

    let mut base_address = format!("{origin}/");
    let mut cursor = PathCursor::parse(path_and_query);
    let mut mount_segments = 0;

    while !cursor.is_empty() {
        let (raw_segment, raw_rest) = cursor.split_raw('/');

        if let Some(separator) =
            percent::find_literal_or_escaped(raw_segment, MODULE_SEPARATOR)
        {
            let module = percent::decode(&raw_segment[..separator.start]);
            if module.is_empty() {
                return Err(AddressErrorKind::EmptyModule);
            }
            if mount_segments < options.min_mount_segments {
                return Err(AddressErrorKind::TooFewMountSegments {
                    min: options.min_mount_segments,
                    found: mount_segments,
                });
            }

            let mut path = raw_segment[separator.end..].to_string();
            if let Some(rest) = raw_rest {
                path.push('/');
                path.push_str(rest);
            }
            if let Some(query) = cursor.query() {
                path.push('?');
                path.push_str(query);
            }

            return Ok(ParsedAddress {
                base_address,
                module: module.into_owned(),
                path,
            });
        }

        mount_segments += 1;
        if let Some(max) = options.max_mount_segments.filter(|&max| mount_segments > max) {
            return Err(AddressErrorKind::TooManyMountSegments { max });
        }
        base_address.push_str(raw_segment);
        base_address.push('/');
        cursor = cursor.remainder(raw_rest.unwrap_or(""));
    }

    Err(AddressErrorKind::MissingModule)
}

/// Separates `scheme://authority` from the path and query that follow it.
fn split_origin(input: &str) -> Result<(&str, &str), AddressErrorKind> {
    let scheme_end = input
        .find(SCHEME_SEPARATOR)
        .ok_or(AddressErrorKind::MissingScheme)?;
    let scheme = &input[..scheme_end];
    if scheme.is_empty() || scheme.contains(['/', '?', '#']) {
        return Err(AddressErrorKind::MissingScheme);
    }

    let authority_start = scheme_end + SCHEME_SEPARATOR.len();
    let after_scheme = &input[authority_start..];
    let authority_len = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    if authority_len == 0 {
        return Err(AddressErrorKind::MissingAuthority);
    }

    let (origin, rest) = input.split_at(authority_start + authority_len);
    if !rest.starts_with('/') {
        return Err(AddressErrorKind::MissingPath);
    }
    Ok((origin, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(url: &str) -> (String, String, String) {
        split_address(url).unwrap().into_parts()
    }

    fn kind(url: &str) -> AddressErrorKind {
        split_address(url).unwrap_err().kind
    }

    #[test]
    fn split_data_resource() {
        let (base, module, path) = parts("http://server:port/restconf/data/module:path/some=x/where");
        assert_eq!(base, "http://server:port/restconf/data/");
        assert_eq!(module, "module");
        assert_eq!(path, "path/some=x/where");
    }

    #[test]
    fn split_keeps_query() {
        let (base, module, path) = parts("http://server/restconf=100/streams/module:path=z?p=1&z=x");
        assert_eq!(base, "http://server/restconf=100/streams/");
        assert_eq!(module, "module");
        assert_eq!(path, "path=z?p=1&z=x");
    }

    #[test]
    fn split_bare_module() {
        let (base, module, path) = parts("foo://server/mount/module:");
        assert_eq!(base, "foo://server/mount/");
        assert_eq!(module, "module");
        assert_eq!(path, "");
    }

    #[test]
    fn split_bare_module_with_query() {
        let (_, module, path) = parts("foo://server/mount/module:?depth=2");
        assert_eq!(module, "module");
        assert_eq!(path, "?depth=2");
    }

    #[test]
    fn split_keeps_trailing_slash() {
        let (_, _, path) = parts("foo://server/mount/module:path/");
        assert_eq!(path, "path/");
    }

    #[test]
    fn split_without_mount() {
        let (base, module, path) = parts("https://router/ietf-system:system");
        assert_eq!(base, "https://router/");
        assert_eq!(module, "ietf-system");
        assert_eq!(path, "system");
    }

    #[test]
    fn split_at_first_colon() {
        let (_, module, path) = parts("http://s/data/a:b:c/d");
        assert_eq!(module, "a");
        assert_eq!(path, "b:c/d");
    }

    #[test]
    fn split_keeps_tail_encoding() {
        let (base, module, path) = parts("http://s/re%73tconf/data/mod:list=a%2Fb/leaf%20x");
        assert_eq!(base, "http://s/re%73tconf/data/");
        assert_eq!(module, "mod");
        assert_eq!(path, "list=a%2Fb/leaf%20x");
    }

    #[test]
    fn split_keeps_boundary_segment_encoding() {
        let (_, module, path) = parts("http://s/restconf/data/mod:leaf%23x/y");
        assert_eq!(module, "mod");
        assert_eq!(path, "leaf%23x/y");

        let (_, _, path) = parts("http://s/restconf/data/mod:name=a%2541");
        assert_eq!(path, "name=a%2541");

        let (_, _, path) = parts("http://s/data/mod:a%3Fb%3A%2F");
        assert_eq!(path, "a%3Fb%3A%2F");
    }

    #[test]
    fn resplit_escaped_path_is_stable() {
        for url in [
            "http://s/restconf/data/mod:leaf%23x/y",
            "http://s/restconf/data/mod:name=a%2541",
            "http://s/restconf/data/mod:list=a%2Fb?depth=1",
            "http://s/restconf/data/m%6Fd%3Apath%3Fx",
        ] {
            let first = split_address(url).unwrap();
            let rebuilt = format!(
                "{}{}:{}",
                first.base_address(),
                first.module(),
                first.path()
            );
            assert_eq!(split_address(&rebuilt).unwrap(), first, "re-splitting {url}");
        }
    }

    #[test]
    fn encoded_slash_stays_in_list_key() {
        let (_, _, path) = parts("http://s/restconf/data/mod:list=a%2Fb");
        let (token, rest) = PathCursor::new(&path).shift_optional_param_within_segment('=', '/');
        assert_eq!(token.key(), "list");
        assert_eq!(token.param(), Some("a/b"));
        assert!(rest.is_empty());
    }

    #[test]
    fn split_decodes_module_name() {
        let (base, module, path) = parts("http://s/re%73tconf/ietf%2Dsystem:system%20x");
        assert_eq!(base, "http://s/re%73tconf/");
        assert_eq!(module, "ietf-system");
        assert_eq!(path, "system%20x");
    }

    #[test]
    fn split_decodes_boundary_segment() {
        let (_, module, path) = parts("http://s/data/mod%3Apath/x");
        assert_eq!(module, "mod");
        assert_eq!(path, "path/x");
    }

    #[test]
    fn split_drops_fragment() {
        let (_, _, path) = parts("http://s/data/mod:path?q=1#frag");
        assert_eq!(path, "path?q=1");
    }

    #[test]
    fn malformed_addresses() {
        assert_eq!(kind("no-protocol"), AddressErrorKind::MissingScheme);
        assert_eq!(kind("foo://no-module-or-path"), AddressErrorKind::MissingPath);
        assert_eq!(kind("foo://server/no-mount"), AddressErrorKind::MissingModule);
        assert_eq!(kind("foo://server/mount/no-module"), AddressErrorKind::MissingModule);
    }

    #[test]
    fn malformed_origin() {
        assert_eq!(kind("://server/m:p"), AddressErrorKind::MissingScheme);
        assert_eq!(kind("foo:///m:p"), AddressErrorKind::MissingAuthority);
        assert_eq!(kind("foo://server?x=a:b"), AddressErrorKind::MissingPath);
    }

    #[test]
    fn zero_path_segments() {
        assert_eq!(kind("foo://server/"), AddressErrorKind::MissingModule);
    }

    #[test]
    fn colon_in_query_is_not_a_boundary() {
        assert_eq!(kind("foo://server/mount/x?a=b:c"), AddressErrorKind::MissingModule);
    }

    #[test]
    fn empty_module() {
        assert_eq!(kind("foo://server/mount/:path"), AddressErrorKind::EmptyModule);
        assert_eq!(kind("foo://server/mount/%3Apath"), AddressErrorKind::EmptyModule);
    }

    #[test]
    fn mount_segment_bounds() {
        let options = SplitOptions::new()
            .with_min_mount_segments(1)
            .with_max_mount_segments(2);

        let err = split_address_with("http://s/m:p", &options).unwrap_err();
        assert_eq!(
            err.kind,
            AddressErrorKind::TooFewMountSegments { min: 1, found: 0 }
        );

        assert!(split_address_with("http://s/a/m:p", &options).is_ok());
        assert!(split_address_with("http://s/a/b/m:p", &options).is_ok());

        let err = split_address_with("http://s/a/b/c/m:p", &options).unwrap_err();
        assert_eq!(err.kind, AddressErrorKind::TooManyMountSegments { max: 2 });
    }

    #[test]
    fn error_keeps_input() {
        let err = split_address("foo://server/no-mount").unwrap_err();
        assert_eq!(err.input, "foo://server/no-mount");
    }

    #[test]
    fn display_reconstructs_url() {
        let url = "http://server/restconf/data/module:path/some=x?depth=1";
        assert_eq!(ParsedAddress::parse(url).unwrap().to_string(), url);
    }

    #[test]
    fn from_str_and_try_from() {
        let a: ParsedAddress = "http://s/d/m:p".parse().unwrap();
        let b = ParsedAddress::try_from("http://s/d/m:p").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: SplitOptions = serde_json::from_str(r#"{"max_mount_segments": 3}"#).unwrap();
        assert_eq!(options, SplitOptions::new().with_max_mount_segments(3));

        let options: SplitOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SplitOptions::default());
    }
}
