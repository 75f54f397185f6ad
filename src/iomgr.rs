//! I/O manager lifetime accounting.
//!
//! Asynchronous resolutions must keep the owning I/O manager alive until
//! their completion callback has run. [`IoManager`] tracks that inflight
//! count; [`IoManager::acquire`] hands out an [`IoGuard`] whose drop
//! performs the matching release, so every exit path of a worker
//! (panics and early failures included) pays the count back.
//!
//! Shutdown-side callers use [`IoManager::wait_idle`] to block until all
//! outstanding operations have drained.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Shared {
    inflight: Mutex<usize>,
    idle: Condvar,
}

/// Shared handle to the I/O manager's inflight count.
///
/// Cheap to clone; all clones observe the same count. The count is only
/// ever moved by [`acquire`](IoManager::acquire) and by dropping the
/// returned guard, so it can never go negative and never leaks on a
/// failure branch.
#[derive(Debug, Clone, Default)]
pub struct IoManager {
    shared: Arc<Shared>,
}

impl IoManager {
    /// Creates a handle with an idle count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one outstanding operation.
    ///
    /// The returned guard must stay alive for the operation's full
    /// extent; dropping it is the release.
    #[must_use = "dropping the guard immediately releases the reference"]
    pub fn acquire(&self) -> IoGuard {
        let mut inflight = self.shared.inflight.lock().unwrap();
        *inflight += 1;
        tracing::trace!(inflight = *inflight, "iomgr acquire");
        IoGuard {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Current number of outstanding operations.
    pub fn inflight(&self) -> usize {
        *self.shared.inflight.lock().unwrap()
    }

    /// Blocks until every outstanding operation has released its guard.
    pub fn wait_idle(&self) {
        let mut inflight = self.shared.inflight.lock().unwrap();
        while *inflight != 0 {
            inflight = self.shared.idle.wait(inflight).unwrap();
        }
    }

    /// Like [`wait_idle`](Self::wait_idle) with a deadline.
    ///
    /// Returns `true` if the count reached zero before `timeout` elapsed.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut inflight = self.shared.inflight.lock().unwrap();
        while *inflight != 0 {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, result) = self
                .shared
                .idle
                .wait_timeout(inflight, deadline - now)
                .unwrap();
            inflight = guard;
            if result.timed_out() && *inflight != 0 {
                return false;
            }
        }
        true
    }
}

/// Scoped acquisition of the I/O manager.
///
/// Releases the underlying count exactly once, when dropped.
#[derive(Debug)]
pub struct IoGuard {
    shared: Arc<Shared>,
}

impl Drop for IoGuard {
    fn drop(&mut self) {
        let mut inflight = self.shared.inflight.lock().unwrap();
        *inflight -= 1;
        tracing::trace!(inflight = *inflight, "iomgr release");
        if *inflight == 0 {
            self.shared.idle.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_acquire_release_balances() {
        let iomgr = IoManager::new();
        assert_eq!(iomgr.inflight(), 0);

        let a = iomgr.acquire();
        let b = iomgr.acquire();
        assert_eq!(iomgr.inflight(), 2);

        drop(a);
        assert_eq!(iomgr.inflight(), 1);
        drop(b);
        assert_eq!(iomgr.inflight(), 0);
    }

    #[test]
    fn test_clones_share_the_count() {
        let iomgr = IoManager::new();
        let clone = iomgr.clone();

        let guard = clone.acquire();
        assert_eq!(iomgr.inflight(), 1);
        drop(guard);
        assert_eq!(iomgr.inflight(), 0);
    }

    #[test]
    fn test_wait_idle_blocks_until_released() {
        let iomgr = IoManager::new();
        let guard = iomgr.acquire();

        let waiter = {
            let iomgr = iomgr.clone();
            thread::spawn(move || {
                iomgr.wait_idle();
                iomgr.inflight()
            })
        };

        thread::sleep(Duration::from_millis(20));
        drop(guard);

        assert_eq!(waiter.join().unwrap(), 0);
    }

    #[test]
    fn test_wait_idle_timeout_reports_outcome() {
        let iomgr = IoManager::new();
        assert!(iomgr.wait_idle_timeout(Duration::from_millis(10)));

        let guard = iomgr.acquire();
        assert!(!iomgr.wait_idle_timeout(Duration::from_millis(10)));
        drop(guard);
        assert!(iomgr.wait_idle_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn test_guard_releases_on_panic() {
        let iomgr = IoManager::new();
        let guard = iomgr.acquire();

        let worker = thread::spawn(move || {
            let _guard = guard;
            panic!("worker died");
        });
        assert!(worker.join().is_err());
        assert_eq!(iomgr.inflight(), 0);
    }
}
