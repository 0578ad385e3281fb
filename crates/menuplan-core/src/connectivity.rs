//! Connectivity monitor.
//!
//! Wraps the host's reachability signal as a boolean consumed by the
//! facades to decide the optimistic-write-and-enqueue path. The caller
//! feeds transitions in; [`ConnectivityMonitor::set_online`] reports
//! whether this call was an actual offline-to-online transition so a
//! sync drain runs exactly once per regain.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide online/offline flag with transition detection.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    online: AtomicBool,
}

impl ConnectivityMonitor {
    /// Create a monitor with the initial reachability state, read from
    /// the platform at mount.
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn is_offline(&self) -> bool {
        !self.is_online()
    }

    /// Mark the network reachable. Returns true only when this was an
    /// offline-to-online transition; the caller then triggers one
    /// sync drain.
    pub fn set_online(&self) -> bool {
        !self.online.swap(true, Ordering::SeqCst)
    }

    /// Mark the network unreachable.
    pub fn set_offline(&self) {
        self.online.store(false, Ordering::SeqCst);
    }
}
