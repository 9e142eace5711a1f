//! Host and port splitting for listen and connect addresses.

use std::fmt;

use serde::Serialize;

/// A host specifier split into host and port text.
///
/// Bracketed IPv6 hosts keep their brackets. The port is empty when the
/// input had none, or when the host is a bare IPv6 literal whose colons make
/// any split ambiguous.
///
/// # Examples
///
/// ```
/// use restconf_address::split_host_port;
///
/// let hp = split_host_port("[::1]:1000");
/// assert_eq!(hp.host(), "[::1]");
/// assert_eq!(hp.port(), "1000");
/// assert_eq!(hp.port_number(), Some(1000));
///
/// let hp = split_host_port("::1");
/// assert_eq!(hp.host(), "::1");
/// assert_eq!(hp.port(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct HostPort {
    host: String,
    port: String,
}

impl HostPort {
    /// Returns the host, brackets included for IPv6 literals.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port text, empty if absent.
    #[must_use]
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Returns true if a port was given.
    #[must_use]
    pub fn has_port(&self) -> bool {
        !self.port.is_empty()
    }

    /// Returns the port as a number, if present and valid.
    #[must_use]
    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }

    /// Returns the host without enclosing IPv6 brackets.
    #[must_use]
    pub fn unbracketed_host(&self) -> &str {
        self.host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host)
    }

    /// Consumes the value, returning `(host, port)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.host, self.port)
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port.is_empty() {
            f.write_str(&self.host)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl From<&str> for HostPort {
    fn from(spec: &str) -> Self {
        split_host_port(spec)
    }
}

/// Splits `host[:port]`, accepting bracketed and bare IPv6 literals.
///
/// Never fails:
/// - `[addr]` or `[addr]:port` keeps the brackets on the host
/// - exactly one colon splits into host and port
/// - no colon, or several (a bare IPv6 literal), leaves the input as host
#[must_use]
pub fn split_host_port(spec: &str) -> HostPort {
    if spec.starts_with('[') {
        if let Some(close) = spec.find(']') {
            let (host, rest) = spec.split_at(close + 1);
            return HostPort {
                host: host.to_string(),
                port: rest.strip_prefix(':').unwrap_or("").to_string(),
            };
        }
        return whole_host(spec);
    }

    // exactly one colon
    match spec.split_once(':') {
        Some((host, port)) if !port.contains(':') => HostPort {
            host: host.to_string(),
            port: port.to_string(),
        },
        _ => whole_host(spec),
    }
}

fn whole_host(spec: &str) -> HostPort {
    HostPort {
        host: spec.to_string(),
        port: String::new(),
    }
}
