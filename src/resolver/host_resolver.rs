//! Host resolution: policy, blocking entry point, async dispatch.
//!
//! [`HostResolver`] turns a textual target into a [`ResolvedAddressList`]:
//!
//! 1. `unix:<path>` targets short-circuit to a single Unix-domain
//!    address without touching the system resolver.
//! 2. Otherwise the target splits into host and port; a missing port
//!    falls back to the caller's default, and a missing default is an
//!    error.
//! 3. One system lookup runs. If it fails and the service is a
//!    recognized well-known name, the lookup is retried exactly once
//!    with the mapped numeric port: `http` as `80`, `https` as `443`,
//!    nothing else.
//!
//! The async entry points run the same sequence off the caller's thread
//! and hold an [`IoGuard`](crate::iomgr::IoGuard) for their full extent,
//! so the owning I/O manager stays alive until the completion has fired.

use crate::base::neterror::{LookupError, NetError};
use crate::iomgr::IoManager;
use crate::resolver::address::{ResolvedAddress, ResolvedAddressList};
use crate::resolver::gai::{GaiLookup, Lookup};
use crate::resolver::target;
use std::sync::Arc;
use std::thread;

/// Service names eligible for the numeric-port retry.
const WELL_KNOWN_SERVICES: &[(&str, &str)] = &[("http", "80"), ("https", "443")];

fn well_known_port(service: &str) -> Option<&'static str> {
    WELL_KNOWN_SERVICES
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, port)| *port)
}

/// The full resolution sequence against an arbitrary lookup.
fn resolve_with(
    lookup: &dyn Lookup,
    target: &str,
    default_port: Option<&str>,
) -> Result<ResolvedAddressList, NetError> {
    if let Some(path) = target::unix_path_of(target) {
        let addr = ResolvedAddress::unix(path).ok_or_else(|| {
            tracing::error!(target = %target, "unix path does not fit sockaddr_un");
            NetError::malformed_target(target)
        })?;
        return Ok(ResolvedAddressList::from_vec(vec![addr]));
    }

    let Some((host, port)) = target::split_host_port(target) else {
        tracing::error!(target = %target, "unparseable host:port");
        return Err(NetError::malformed_target(target));
    };
    let service = match port {
        Some(port) => port,
        None => match default_port {
            Some(default) => default,
            None => {
                tracing::error!(target = %target, "no port in name");
                return Err(NetError::missing_port(target));
            }
        },
    };

    let mut outcome = lookup.lookup(host, service);
    if outcome.is_err() {
        if let Some(numeric) = well_known_port(service) {
            tracing::debug!(
                host = %host,
                service = %service,
                port = %numeric,
                "retrying well-known service as numeric port"
            );
            outcome = lookup.lookup(host, numeric);
        }
    }

    match outcome {
        Ok(addrs) if addrs.is_empty() => {
            tracing::error!(target = %target, "resolver returned no addresses");
            Err(NetError::resolution_failed(
                target,
                LookupError::new(libc::EAI_NONAME, "no addresses returned by resolver"),
            ))
        }
        Ok(addrs) => Ok(ResolvedAddressList::from_vec(addrs)),
        Err(source) => {
            tracing::error!(target = %target, error = %source, "getaddrinfo failed");
            Err(NetError::resolution_failed(target, source))
        }
    }
}

/// Holds an async request's callback and context until delivery.
///
/// A completion dropped without an explicit delivery reports failure,
/// so the callback runs exactly once on every path, worker death and
/// spawn failure included.
struct Completion<C, F>
where
    F: FnOnce(Option<ResolvedAddressList>, C),
{
    slot: Option<(F, C)>,
}

impl<C, F> Completion<C, F>
where
    F: FnOnce(Option<ResolvedAddressList>, C),
{
    fn new(callback: F, context: C) -> Self {
        Self {
            slot: Some((callback, context)),
        }
    }

    fn deliver(mut self, result: Option<ResolvedAddressList>) {
        if let Some((callback, context)) = self.slot.take() {
            callback(result, context);
        }
    }
}

impl<C, F> Drop for Completion<C, F>
where
    F: FnOnce(Option<ResolvedAddressList>, C),
{
    fn drop(&mut self) {
        if let Some((callback, context)) = self.slot.take() {
            callback(None, context);
        }
    }
}

/// Resolves textual targets into connectable socket addresses.
///
/// Holds the system-resolver seam and the I/O-manager handle every
/// asynchronous dispatch is accounted against. Cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use resolvenet::iomgr::IoManager;
/// use resolvenet::resolver::HostResolver;
///
/// let resolver = HostResolver::new(IoManager::new());
/// let addrs = resolver.resolve_blocking("localhost:443", None)?;
/// for addr in &addrs {
///     println!("resolved: {addr}");
/// }
/// ```
#[derive(Clone)]
pub struct HostResolver {
    lookup: Arc<dyn Lookup>,
    iomgr: IoManager,
}

impl HostResolver {
    /// Creates a resolver backed by the system's `getaddrinfo`.
    pub fn new(iomgr: IoManager) -> Self {
        Self::with_lookup(iomgr, Arc::new(GaiLookup::new()))
    }

    /// Creates a resolver over a caller-supplied lookup.
    pub fn with_lookup(iomgr: IoManager, lookup: Arc<dyn Lookup>) -> Self {
        Self { lookup, iomgr }
    }

    /// The I/O manager this resolver accounts against.
    pub fn io_manager(&self) -> &IoManager {
        &self.iomgr
    }

    /// Resolves on the calling thread, blocking until done.
    ///
    /// The returned list is the caller's to drop. `default_port`
    /// substitutes for a target without a port component.
    pub fn resolve_blocking(
        &self,
        target: &str,
        default_port: Option<&str>,
    ) -> Result<ResolvedAddressList, NetError> {
        resolve_with(&*self.lookup, target, default_port)
    }

    /// Resolves off the calling thread, returning a future.
    ///
    /// The lookup runs on the runtime's blocking pool (it would
    /// otherwise stall the async executor); the I/O-manager guard spans
    /// the whole task.
    pub async fn resolve(
        &self,
        target: &str,
        default_port: Option<&str>,
    ) -> Result<ResolvedAddressList, NetError> {
        let owned_target = target.to_owned();
        let default_port = default_port.map(str::to_owned);
        let lookup = Arc::clone(&self.lookup);
        let guard = self.iomgr.acquire();

        let outcome = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            resolve_with(&*lookup, &owned_target, default_port.as_deref())
        })
        .await;

        match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(target = %target, error = %err, "resolver task failed");
                Err(NetError::resolution_failed(
                    target,
                    LookupError::new(libc::EAI_SYSTEM, "resolver task failed"),
                ))
            }
        }
    }

    /// Dispatches a resolution to a dedicated worker and returns
    /// immediately.
    ///
    /// The target and default are copied before this call returns, so
    /// the caller's borrows end here. `completion` is invoked exactly
    /// once, on the worker thread, with `Some(list)` on success or
    /// `None` on any failure (the diagnostic is logged before
    /// delivery). There is no cancellation: once dispatched, the
    /// request runs to completion.
    pub fn resolve_async<C, F>(
        &self,
        target: &str,
        default_port: Option<&str>,
        completion: F,
        context: C,
    ) where
        C: Send + 'static,
        F: FnOnce(Option<ResolvedAddressList>, C) + Send + 'static,
    {
        let target = target.to_owned();
        let default_port = default_port.map(str::to_owned);
        let lookup = Arc::clone(&self.lookup);
        let guard = self.iomgr.acquire();
        let completion = Completion::new(completion, context);

        let spawned = thread::Builder::new()
            .name("resolve-worker".into())
            .spawn(move || {
                // Declared before the completion: delivery happens
                // first, release second, on every exit path.
                let _guard = guard;
                let completion = completion;
                match resolve_with(&*lookup, &target, default_port.as_deref()) {
                    Ok(addrs) => {
                        tracing::debug!(
                            target = %target,
                            count = addrs.len(),
                            "async resolution complete"
                        );
                        completion.deliver(Some(addrs));
                    }
                    Err(err) => {
                        tracing::debug!(
                            target = %target,
                            error = %err,
                            "async resolution failed"
                        );
                        completion.deliver(None);
                    }
                }
            });

        if let Err(err) = spawned {
            // The worker never started; dropping the closure already
            // fired the completion with None and released the guard.
            tracing::error!(error = %err, "failed to spawn resolver worker");
        }
    }
}

impl std::fmt::Debug for HostResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostResolver")
            .field("inflight", &self.iomgr.inflight())
            .finish_non_exhaustive()
    }
}
