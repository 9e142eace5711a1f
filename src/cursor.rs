//! Immutable path cursor and segment-at-a-time tokenizer.
//!
//! RESTCONF overloads `/`, `=` and `:`, so paths are consumed one segment at
//! a time instead of with a single global split. Each shift returns a new
//! [`PathCursor`]; the input cursor is never modified.

use std::borrow::Cow;
use std::fmt;

use crate::constants::SCHEME_SEPARATOR;
use crate::percent;

/// The unparsed remainder of a request path.
///
/// Holds the path exactly as the caller encoded it and the query component.
/// The decoded form is derived from the raw form on demand, so the two always
/// denote the same path and a shift only pays for the segment it returns.
///
/// # Examples
///
/// ```
/// use restconf_address::PathCursor;
///
/// let cursor = PathCursor::parse("http://server:999/some/path=xxx%30xxx/here?p=1");
/// let (segment, rest) = cursor.shift('/');
/// assert_eq!(segment, "some");
/// assert_eq!(rest.path(), "path=xxx0xxx/here");
/// assert_eq!(rest.raw_path(), "path=xxx%30xxx/here");
/// assert_eq!(rest.query(), Some("p=1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathCursor {
    raw: String,
    query: Option<String>,
}

impl PathCursor {
    /// Creates a cursor over a bare, possibly percent-encoded path.
    #[must_use]
    pub fn new(raw_path: &str) -> Self {
        Self::from_parts(raw_path, None)
    }

    /// Creates a cursor from an absolute URL or a relative reference.
    ///
    /// Scheme and authority are skipped, the query is kept, the fragment is
    /// dropped.
    #[must_use]
    pub fn parse(reference: &str) -> Self {
        let reference = reference.split_once('#').map_or(reference, |(r, _)| r);
        let (target, query) = match reference.split_once('?') {
            Some((target, query)) => (target, Some(query.to_string())),
            None => (reference, None),
        };

        let path = match target.find(SCHEME_SEPARATOR) {
            Some(idx) if !target[..idx].contains('/') => {
                let authority_and_path = &target[idx + SCHEME_SEPARATOR.len()..];
                authority_and_path
                    .find('/')
                    .map_or("", |slash| &authority_and_path[slash..])
            }
            _ => target,
        };

        Self::from_parts(path, query)
    }

    /// Returns a copy of this cursor carrying the given query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the percent-decoded path.
    ///
    /// Borrows the raw path when it contains no escapes.
    #[must_use]
    pub fn path(&self) -> Cow<'_, str> {
        percent::decode(&self.raw)
    }

    /// Returns the path as the caller encoded it.
    #[must_use]
    pub fn raw_path(&self) -> &str {
        &self.raw
    }

    /// Returns the query (without leading '?'), if present.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns true if no path remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Consumes one segment delimited by `delim`.
    ///
    /// One leading `delim` is skipped. The segment runs to the next unescaped
    /// `delim` or the end of the path and is returned percent-decoded. An
    /// encoded delimiter such as `%2F` never ends a segment. The remainder
    /// keeps the raw encoding and the query. An empty cursor yields an empty
    /// segment and an equal cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use restconf_address::PathCursor;
    ///
    /// let (segment, rest) = PathCursor::new("some/path/here").shift('/');
    /// assert_eq!(segment, "some");
    /// assert_eq!(rest.path(), "path/here");
    /// ```
    #[must_use]
    pub fn shift(&self, delim: char) -> (String, Self) {
        let (segment, rest) = self.split_raw(delim);
        (
            percent::decode(segment).into_owned(),
            self.remainder(rest.unwrap_or("")),
        )
    }

    /// Consumes one segment and splits it into a key and an optional parameter.
    ///
    /// The segment is isolated with [`shift`](Self::shift) on `seg_delim`, then
    /// split at the first `param_delim`. `"some=x/path"` with `'='` and `'/'`
    /// gives key `some`, parameter `x` and remainder `path`.
    ///
    /// A colon is not special here: `"data/call-home-register:"` yields key
    /// `data` and leaves `call-home-register:` for the next call.
    ///
    /// # Limitation
    ///
    /// The split runs on the decoded segment, so a percent-encoded delimiter
    /// (`%3D` for `=`, `%2F` for `/`) is indistinguishable from a literal one
    /// once decoded. Callers that need exact round-tripping must not encode
    /// either delimiter inside a parameterized segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use restconf_address::PathCursor;
    ///
    /// let (token, rest) = PathCursor::new("some=x/path").shift_optional_param_within_segment('=', '/');
    /// assert_eq!(token.key(), "some");
    /// assert_eq!(token.param(), Some("x"));
    /// assert_eq!(rest.path(), "path");
    /// ```
    #[must_use]
    pub fn shift_optional_param_within_segment(
        &self,
        param_delim: char,
        seg_delim: char,
    ) -> (SegmentToken, Self) {
        let (segment, rest) = self.shift(seg_delim);
        let token = match segment.split_once(param_delim) {
            Some((key, param)) => SegmentToken {
                key: key.to_string(),
                param: Some(param.to_string()),
            },
            None => SegmentToken {
                key: segment,
                param: None,
            },
        };
        (token, rest)
    }

    /// Splits off the next raw segment.
    ///
    /// The second value is `None` when no delimiter followed the segment.
    pub(crate) fn split_raw(&self, delim: char) -> (&str, Option<&str>) {
        let raw = self.raw.strip_prefix(delim).unwrap_or(&self.raw);
        match percent::find_unescaped(raw, delim) {
            Some(idx) => (&raw[..idx], Some(&raw[idx + delim.len_utf8()..])),
            None => (raw, None),
        }
    }

    /// Returns a cursor over `raw` that keeps this cursor's query.
    pub(crate) fn remainder(&self, raw: &str) -> Self {
        Self::from_parts(raw, self.query.clone())
    }

    fn from_parts(raw: &str, query: Option<String>) -> Self {
        Self {
            raw: raw.to_string(),
            query,
        }
    }
}

impl fmt::Display for PathCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

/// A path segment split into a key and an optional embedded parameter.
///
/// `param` is `Some` whenever the parameter delimiter occurred in the segment,
/// even if nothing followed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SegmentToken {
    key: String,
    param: Option<String>,
}

impl SegmentToken {
    /// Returns the text before the parameter delimiter.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the parameter, if the delimiter occurred.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Returns the parameter, or an empty string if absent.
    #[must_use]
    pub fn param_str(&self) -> &str {
        self.param.as_deref().unwrap_or("")
    }

    /// Consumes the token, returning key and parameter.
    #[must_use]
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.key, self.param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift_case(input: &str) -> (String, PathCursor) {
        PathCursor::parse(input).shift('/')
    }

    fn param_case(input: &str) -> (SegmentToken, PathCursor) {
        PathCursor::parse(input).shift_optional_param_within_segment('=', '/')
    }

    #[test]
    fn parse_absolute_url() {
        let cursor = PathCursor::parse("http://server:999/some/path?p=1&z=x#frag");
        assert_eq!(cursor.raw_path(), "/some/path");
        assert_eq!(cursor.query(), Some("p=1&z=x"));
    }

    #[test]
    fn parse_authority_only() {
        let cursor = PathCursor::parse("foo://server");
        assert!(cursor.is_empty());
        assert_eq!(cursor.query(), None);
    }

    #[test]
    fn parse_relative_reference() {
        let cursor = PathCursor::parse("data/call-home-register:");
        assert_eq!(cursor.path(), "data/call-home-register:");
    }

    #[test]
    fn shift_absolute_url() {
        let (segment, rest) = shift_case("http://server:999/some/path/here");
        assert_eq!(segment, "some");
        assert_eq!(rest.path(), "path/here");
    }

    #[test]
    fn shift_keeps_query_on_remainder() {
        let (segment, rest) = shift_case("http://server:999/some/path/here?p=1&z=x");
        assert_eq!(segment, "some");
        assert_eq!(rest.path(), "path/here");
        assert_eq!(rest.query(), Some("p=1&z=x"));
    }

    #[test]
    fn shift_keeps_raw_encoding() {
        let (segment, rest) = shift_case("http://server:999/some/path=xxx%30xxx/here");
        assert_eq!(segment, "some");
        assert_eq!(rest.path(), "path=xxx0xxx/here");
        assert_eq!(rest.raw_path(), "path=xxx%30xxx/here");
    }

    #[test]
    fn shift_relative() {
        let (segment, rest) = shift_case("some/path/here");
        assert_eq!(segment, "some");
        assert_eq!(rest.path(), "path/here");
    }

    #[test]
    fn shift_last_segment() {
        let (segment, rest) = shift_case("some");
        assert_eq!(segment, "some");
        assert_eq!(rest.path(), "");

        let (segment, rest) = shift_case("some/");
        assert_eq!(segment, "some");
        assert_eq!(rest.path(), "");
    }

    #[test]
    fn shift_empty_is_unchanged() {
        let cursor = PathCursor::new("").with_query("a=1");
        let (segment, rest) = cursor.shift('/');
        assert_eq!(segment, "");
        assert_eq!(rest, cursor);
    }

    #[test]
    fn shift_does_not_split_on_encoded_delimiter() {
        let (segment, rest) = shift_case("a%2Fb/c");
        assert_eq!(segment, "a/b");
        assert_eq!(rest.raw_path(), "c");
    }

    #[test]
    fn shift_decodes_segment() {
        let (segment, _) = shift_case("caf%C3%A9/x");
        assert_eq!(segment, "café");
    }

    #[test]
    fn shift_leaves_input_untouched() {
        let cursor = PathCursor::new("a/b/c");
        let (_, rest) = cursor.shift('/');
        let (_, rest_again) = cursor.shift('/');
        assert_eq!(cursor.path(), "a/b/c");
        assert_eq!(rest, rest_again);
    }

    #[test]
    fn shift_other_delimiter() {
        let (segment, rest) = PathCursor::new("a,b,c").shift(',');
        assert_eq!(segment, "a");
        assert_eq!(rest.path(), "b,c");
    }

    #[test]
    fn param_absent() {
        let (token, rest) = param_case("http://server:999/some/path/here");
        assert_eq!(token.key(), "some");
        assert_eq!(token.param(), None);
        assert_eq!(token.param_str(), "");
        assert_eq!(rest.path(), "path/here");
    }

    #[test]
    fn param_trailing_delimiter() {
        let (token, rest) = param_case("some/");
        assert_eq!(token.key(), "some");
        assert_eq!(token.param_str(), "");
        assert_eq!(rest.path(), "");
    }

    #[test]
    fn param_empty_value() {
        let (token, rest) = param_case("some=/");
        assert_eq!(token.key(), "some");
        assert_eq!(token.param(), Some(""));
        assert_eq!(rest.path(), "");
    }

    #[test]
    fn param_present() {
        let (token, rest) = param_case("some=x/");
        assert_eq!(token.key(), "some");
        assert_eq!(token.param(), Some("x"));
        assert_eq!(rest.path(), "");

        let (token, rest) = param_case("some=x/path");
        assert_eq!(token.into_parts(), ("some".to_string(), Some("x".to_string())));
        assert_eq!(rest.path(), "path");
    }

    #[test]
    fn param_decodes_value() {
        let (token, rest) = param_case("some=x%3ax/path");
        assert_eq!(token.key(), "some");
        assert_eq!(token.param(), Some("x:x"));
        assert_eq!(rest.path(), "path");
    }

    #[test]
    fn param_colon_is_not_special() {
        let (token, rest) = param_case("data/call-home-register:");
        assert_eq!(token.key(), "data");
        assert_eq!(token.param(), None);
        assert_eq!(rest.path(), "call-home-register:");
    }

    #[test]
    fn param_leading_delimiter() {
        let (token, rest) = param_case("/some");
        assert_eq!(token.key(), "some");
        assert_eq!(rest.path(), "");
    }

    #[test]
    fn encoded_param_delimiter_is_indistinguishable() {
        // %3D decodes to '=' before the split, so it acts as a real delimiter
        let (token, _) = param_case("some%3Dx/path");
        assert_eq!(token.key(), "some");
        assert_eq!(token.param(), Some("x"));

        let (token, _) = param_case("some=a%3Db/path");
        assert_eq!(token.param(), Some("a=b"));
    }

    #[test]
    fn path_borrows_unescaped_raw() {
        let cursor = PathCursor::new("a/b");
        assert!(matches!(cursor.path(), Cow::Borrowed("a/b")));
    }

    #[test]
    fn walking_keeps_raw_and_decoded_in_step() {
        let mut cursor = PathCursor::new("a%20b/c%2Fd/e");
        let mut decoded = Vec::new();
        while !cursor.is_empty() {
            let (segment, rest) = cursor.shift('/');
            decoded.push(segment);
            assert_eq!(rest.path(), percent::decode(rest.raw_path()));
            cursor = rest;
        }
        assert_eq!(decoded, ["a b", "c/d", "e"]);
    }

    #[test]
    fn display_rejoins_query() {
        let cursor = PathCursor::parse("http://h/a/b%20c?x=1");
        assert_eq!(cursor.to_string(), "/a/b%20c?x=1");
    }
}
