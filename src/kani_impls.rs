//! Kani proof harnesses for the string helpers.
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{append_url_segment, split_host_port};

/// Characters that exercise every branch: separators, brackets and text
const PATH_CHARS: &[u8] = b"a/:[]";

fn arbitrary_char() -> char {
    let idx: usize = kani::any();
    PATH_CHARS[idx % PATH_CHARS.len()] as char
}

/// Generate a 0-4 char string for tractability
fn arbitrary_string() -> String {
    let len: usize = kani::any();
    let len = len % 5;
    (0..len).map(|_| arbitrary_char()).collect()
}

// ============================================================================
// Kani Proof Harnesses
// ============================================================================

/// Proof: Joining with an empty fragment returns the other side unchanged
#[kani::proof]
#[kani::unwind(6)]
fn proof_append_empty_identity() {
    let x = arbitrary_string();
    assert_eq!(append_url_segment(&x, ""), x);
    assert_eq!(append_url_segment("", &x), x);
}

/// Proof: Two non-empty fragments are joined by exactly one added or kept slash
#[kani::proof]
#[kani::unwind(6)]
fn proof_append_length() {
    let a = arbitrary_string();
    let b = arbitrary_string();
    kani::assume(!a.is_empty() && !b.is_empty());

    let joined = append_url_segment(&a, &b);
    let slashes = usize::from(a.ends_with('/')) + usize::from(b.starts_with('/'));
    let expected = match slashes {
        0 => a.len() + b.len() + 1,
        1 => a.len() + b.len(),
        _ => a.len() + b.len() - 1,
    };
    assert_eq!(joined.len(), expected);
}

/// Proof: Splitting never loses characters
#[kani::proof]
#[kani::unwind(6)]
fn proof_host_port_preserves_input() {
    let spec = arbitrary_string();
    let hp = split_host_port(&spec);
    assert!(spec.starts_with(hp.host()));
    assert!(spec.ends_with(hp.port()));
    assert!(hp.host().len() + hp.port().len() <= spec.len());
}
