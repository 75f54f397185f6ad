//! # resolvenet
//!
//! An address-resolution library for network I/O managers.
//!
//! `resolvenet` turns a textual endpoint name into one or more concrete,
//! connectable socket addresses, with blocking, future-based, and
//! callback-based entry points and lifecycle accounting for the I/O
//! manager that owns the outstanding work.
//!
//! ## Features
//!
//! - **Target parsing**: `host:port`, bracketed and bare IPv6 literals,
//!   and `unix:<path>` filesystem sockets
//! - **System resolution**: `getaddrinfo` with stream-socket, passive,
//!   any-family hints, behind a pluggable [`Lookup`](resolver::Lookup) seam
//! - **Well-known service fallback**: a failed lookup for `http`/`https`
//!   retries exactly once with the numeric port (80/443)
//! - **Owned results**: raw `sockaddr` encodings in a move-only
//!   container; dropping it is the release
//! - **Lifecycle coordination**: every async dispatch is paired with a
//!   scoped I/O-manager acquisition, released on every exit path
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resolvenet::iomgr::IoManager;
//! use resolvenet::resolver::HostResolver;
//!
//! let iomgr = IoManager::new();
//! let resolver = HostResolver::new(iomgr.clone());
//!
//! resolver.resolve_async(
//!     "example.com:https",
//!     None,
//!     |addrs, tag: &str| match addrs {
//!         Some(addrs) => println!("{tag}: {} addresses", addrs.len()),
//!         None => println!("{tag}: resolution failed"),
//!     },
//!     "startup",
//! );
//!
//! // Shutdown waits for outstanding resolutions to drain.
//! iomgr.wait_idle();
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy
//! - [`iomgr`] - I/O-manager lifetime accounting
//! - [`resolver`] - Target parsing, resolution, and resolved addresses
//!
//! ## Failure Behavior
//!
//! A failed resolution never crosses the async boundary as a panic or
//! error: the callback path always delivers exactly one completion,
//! `None` on failure, with the diagnostic logged beforehand.

pub mod base;
pub mod iomgr;
pub mod resolver;
