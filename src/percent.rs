//! Percent-encoding helpers shared by the path cursor.

use std::borrow::Cow;
use std::ops::Range;

/// Decodes `%XX` escapes.
///
/// Malformed escapes are kept literally and the resulting bytes are read as
/// UTF-8 with lossy replacement, so decoding never fails.
pub(crate) fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains('%') {
        return Cow::Borrowed(input);
    }

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match escaped_byte(bytes, i) {
            Some(byte) => {
                decoded.push(byte);
                i += 3;
            }
            None => {
                decoded.push(bytes[i]);
                i += 1;
            }
        }
    }

    Cow::Owned(String::from_utf8_lossy(&decoded).into_owned())
}

/// Finds the first `delim` that is not part of a `%XX` escape.
pub(crate) fn find_unescaped(input: &str, delim: char) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut chars = input.char_indices();
    while let Some((idx, c)) = chars.next() {
        if c == '%' && escaped_byte(bytes, idx).is_some() {
            // skip both hex digits
            chars.next();
            chars.next();
            continue;
        }
        if c == delim {
            return Some(idx);
        }
    }
    None
}

/// Finds the first `target`, either literal or written as a `%XX` escape.
///
/// Returns the byte range the match occupies in `input`, so the text on
/// either side can be sliced without decoding it.
pub(crate) fn find_literal_or_escaped(input: &str, target: char) -> Option<Range<usize>> {
    let bytes = input.as_bytes();
    let mut chars = input.char_indices();
    while let Some((idx, c)) = chars.next() {
        if c == target {
            return Some(idx..idx + c.len_utf8());
        }
        if let Some(byte) = escaped_byte(bytes, idx) {
            if char::from(byte) == target {
                return Some(idx..idx + 3);
            }
            chars.next();
            chars.next();
        }
    }
    None
}

fn escaped_byte(bytes: &[u8], at: usize) -> Option<u8> {
    if bytes.get(at) != Some(&b'%') {
        return None;
    }
    let hi = hex_value(*bytes.get(at + 1)?)?;
    let lo = hex_value(*bytes.get(at + 2)?)?;
    Some((hi << 4) | lo)
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
