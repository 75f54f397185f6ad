//! System resolver boundary using getaddrinfo.
//!
//! [`Lookup`] is the seam between the resolver's policy (parsing,
//! defaulting, fallback) and the operating system's name resolution;
//! tests substitute deterministic implementations behind it.
//! [`GaiLookup`] is the production implementation over the platform's
//! `getaddrinfo`, honoring the system's resolver configuration
//! (/etc/resolv.conf, /etc/hosts, NSS).

use crate::base::neterror::LookupError;
use crate::resolver::address::ResolvedAddress;
use std::ffi::{CStr, CString};
use std::sync::Arc;

/// One blocking name-service lookup.
///
/// `host` is the node to resolve; `service` a numeric port or a service
/// name. Implementations return every address the backing resolver
/// produced, in its enumeration order, or the resolver's diagnostic.
/// This is the only operation in the crate that may block on the
/// network.
pub trait Lookup: Send + Sync {
    fn lookup(&self, host: &str, service: &str) -> Result<Vec<ResolvedAddress>, LookupError>;
}

/// Blanket implementation for Arc-wrapped lookups.
impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    fn lookup(&self, host: &str, service: &str) -> Result<Vec<ResolvedAddress>, LookupError> {
        (**self).lookup(host, service)
    }
}

/// System lookup via `getaddrinfo`.
///
/// Hints request any address family, stream sockets, and the passive
/// flag, so the answers suit both connecting to named hosts and binding
/// wildcard listeners. The call runs on the invoking thread; callers
/// wanting it off their thread go through the resolver's async entry
/// points.
#[derive(Clone, Debug, Default)]
pub struct GaiLookup;

impl GaiLookup {
    /// Creates a new `GaiLookup`.
    pub fn new() -> Self {
        Self
    }
}

fn gai_error(code: libc::c_int) -> LookupError {
    // SAFETY: gai_strerror returns a pointer to a static NUL-terminated
    // message for every return code.
    let message = unsafe { CStr::from_ptr(libc::gai_strerror(code)) };
    LookupError::new(code, message.to_string_lossy().into_owned())
}

impl Lookup for GaiLookup {
    fn lookup(&self, host: &str, service: &str) -> Result<Vec<ResolvedAddress>, LookupError> {
        tracing::debug!(host = %host, service = %service, "resolving via getaddrinfo");

        let c_host = CString::new(host)
            .map_err(|_| LookupError::new(libc::EAI_NONAME, "hostname contains NUL byte"))?;
        let c_service = CString::new(service)
            .map_err(|_| LookupError::new(libc::EAI_SERVICE, "service contains NUL byte"))?;

        let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
        hints.ai_family = libc::AF_UNSPEC;
        hints.ai_socktype = libc::SOCK_STREAM;
        hints.ai_flags = libc::AI_PASSIVE;

        let mut result: *mut libc::addrinfo = std::ptr::null_mut();
        // SAFETY: c_host/c_service are valid NUL-terminated strings,
        // hints is fully initialized, result is a valid out-pointer.
        let rc = unsafe { libc::getaddrinfo(c_host.as_ptr(), c_service.as_ptr(), &hints, &mut result) };
        if rc != 0 {
            return Err(gai_error(rc));
        }

        let mut addrs = Vec::new();
        let mut entry = result;
        while !entry.is_null() {
            // SAFETY: entry walks the list getaddrinfo handed back;
            // ai_addr points at ai_addrlen bytes of sockaddr.
            let info = unsafe { &*entry };
            if !info.ai_addr.is_null() {
                let bytes = unsafe {
                    std::slice::from_raw_parts(info.ai_addr as *const u8, info.ai_addrlen as usize)
                };
                // Families outside the hints never appear; anything else
                // unrepresentable is dropped rather than half-copied.
                if let Some(addr) = ResolvedAddress::from_family_bytes(info.ai_family, bytes) {
                    addrs.push(addr);
                }
            }
            entry = info.ai_next;
        }

        // SAFETY: result came from getaddrinfo and is freed exactly once.
        unsafe { libc::freeaddrinfo(result) };

        tracing::debug!(host = %host, count = addrs.len(), "getaddrinfo complete");
        Ok(addrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::address::AddressFamily;

    #[test]
    fn test_numeric_lookup_needs_no_network() {
        let addrs = GaiLookup::new().lookup("127.0.0.1", "8080").unwrap();

        assert!(!addrs.is_empty());
        assert!(addrs.iter().all(|a| a.family() == AddressFamily::Ipv4));
        assert_eq!(
            addrs[0].socket_addr(),
            Some("127.0.0.1:8080".parse().unwrap())
        );
    }

    #[test]
    fn test_service_name_failure_carries_diagnostic() {
        // A service name that no /etc/services has an entry for.
        let err = GaiLookup::new()
            .lookup("127.0.0.1", "no-such-service-xyzzy")
            .unwrap_err();

        assert_ne!(err.code, 0);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_gai_error_renders_message() {
        let err = gai_error(libc::EAI_NONAME);
        assert_eq!(err.code, libc::EAI_NONAME);
        assert!(!err.message.is_empty());
    }
}
