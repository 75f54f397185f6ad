//! Address Resolution Module
//!
//! Turns textual endpoint targets into connectable socket addresses:
//! - Target parsing (`host:port`, bracketed IPv6, `unix:` paths)
//! - Blocking, future-based, and callback-based resolution
//! - Well-known service fallback (`http` → 80, `https` → 443)
//! - A pluggable system-resolver seam for tests and custom backends
//!
//! # Architecture
//!
//! [`HostResolver`] carries the policy; [`Lookup`] is the boundary to
//! the operating system's name service, with [`GaiLookup`] as the
//! production `getaddrinfo` implementation. Results arrive as a
//! [`ResolvedAddressList`], an owned, move-only container of raw
//! `sockaddr` encodings.
//!
//! # Example
//!
//! ```rust,ignore
//! use resolvenet::iomgr::IoManager;
//! use resolvenet::resolver::HostResolver;
//!
//! let resolver = HostResolver::new(IoManager::new());
//! let addrs = resolver.resolve_blocking("example.com:https", None)?;
//! for addr in &addrs {
//!     println!("resolved: {}", addr.to_uri());
//! }
//! ```

mod address;
mod gai;
mod host_resolver;
mod target;

pub use address::{AddressFamily, ResolvedAddress, ResolvedAddressList, STORAGE_LEN};
pub use gai::{GaiLookup, Lookup};
pub use host_resolver::HostResolver;
pub use target::{split_host_port, unix_path_of, UNIX_SCHEME};
