//! Resolution error codes.
//!
//! Every failure a caller can observe from this crate is one of the
//! [`NetError`] variants below. The system-resolver boundary reports its
//! own diagnostic as a [`LookupError`], which [`NetError::ResolutionFailed`]
//! carries through unchanged.

use thiserror::Error;

/// Diagnostic produced by the system resolver boundary.
///
/// `code` is the raw `getaddrinfo` return value (an `EAI_*` constant on
/// POSIX) and `message` the `gai_strerror` rendering of it. Mock lookups
/// used in tests fabricate both.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LookupError {
    /// Raw resolver return code.
    pub code: i32,
    /// Human-readable diagnostic.
    pub message: String,
}

impl LookupError {
    /// Creates a diagnostic from an explicit code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Errors produced while turning a target string into socket addresses.
///
/// All three variants are terminal for the request that produced them;
/// the only retry this crate ever performs is the single well-known
/// service fallback inside the resolver itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    /// The host portion of the target could not be determined.
    #[error("unparseable host:port: '{target}'")]
    MalformedTarget { target: String },

    /// The target carries no port and no default was supplied.
    #[error("no port in name '{target}'")]
    MissingPort { target: String },

    /// The system resolver rejected the lookup, fallback included.
    #[error("resolving '{target}': {source}")]
    ResolutionFailed { target: String, source: LookupError },
}

impl NetError {
    /// Unparseable target context.
    pub fn malformed_target(target: impl Into<String>) -> Self {
        NetError::MalformedTarget {
            target: target.into(),
        }
    }

    /// Missing-port context.
    pub fn missing_port(target: impl Into<String>) -> Self {
        NetError::MissingPort {
            target: target.into(),
        }
    }

    /// Wraps the resolver diagnostic for a failed target.
    pub fn resolution_failed(target: impl Into<String>, source: LookupError) -> Self {
        NetError::ResolutionFailed {
            target: target.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings() {
        let err = NetError::malformed_target(":80");
        assert_eq!(err.to_string(), "unparseable host:port: ':80'");

        let err = NetError::missing_port("badhost");
        assert_eq!(err.to_string(), "no port in name 'badhost'");

        let err = NetError::resolution_failed(
            "example.com:http",
            LookupError::new(-2, "Name or service not known"),
        );
        assert_eq!(
            err.to_string(),
            "resolving 'example.com:http': Name or service not known"
        );
    }

    #[test]
    fn test_lookup_error_round_trips_through_net_error() {
        let lookup = LookupError::new(-8, "Servname not supported for ai_socktype");
        let err = NetError::resolution_failed("host:ftp", lookup.clone());

        match err {
            NetError::ResolutionFailed { target, source } => {
                assert_eq!(target, "host:ftp");
                assert_eq!(source, lookup);
            }
            other => panic!("expected ResolutionFailed, got {other:?}"),
        }
    }
}
