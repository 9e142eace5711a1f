//! Joining of URL path fragments.

/// Joins two URL path fragments with exactly one `/` between them.
///
/// An empty side returns the other side untouched, so `"a/"` joined with
/// `""` stays `"a/"` and `""` joined with `"/b"` stays `"/b"`.
///
/// # Examples
///
/// ```
/// use restconf_address::append_url_segment;
///
/// assert_eq!(append_url_segment("a", "b"), "a/b");
/// assert_eq!(append_url_segment("a/", "/b"), "a/b");
/// assert_eq!(append_url_segment("", "/b"), "/b");
/// ```
#[must_use]
pub fn append_url_segment(a: &str, b: &str) -> String {
    if a.is_empty() {
        return b.to_string();
    }
    if b.is_empty() {
        return a.to_string();
    }
    match (a.ends_with('/'), b.starts_with('/')) {
        (true, true) => format!("{a}{}", &b[1..]),
        (true, false) | (false, true) => format!("{a}{b}"),
        (false, false) => format!("{a}/{b}"),
    }
}
