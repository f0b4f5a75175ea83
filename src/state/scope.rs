//! View lifetime tracking
//!
//! Fetches run on behalf of a mounted view. When the user navigates away
//! the view's scope is cancelled, and any in-flight fetch must stop before
//! applying its result to the cache.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::utils::errors::{PortalError, Result};

/// Mounted-flag cancellation token for a view.
///
/// Cloning shares the flag; cancelling any clone cancels them all.
/// Checked after every await and before every cache mutation in fetch
/// paths.
#[derive(Debug, Clone)]
pub struct ViewScope {
    active: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the view unmounted; pending fetch results are discarded
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.active.load(Ordering::SeqCst)
    }

    /// Guard call before applying fetched data to shared state
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PortalError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_starts_active() {
        let scope = ViewScope::new();
        assert!(!scope.is_cancelled());
        assert!(scope.ensure_active().is_ok());
    }

    #[test]
    fn test_cancel_propagates_to_clones() {
        let scope = ViewScope::new();
        let clone = scope.clone();

        clone.cancel();
        assert!(scope.is_cancelled());
        assert!(matches!(scope.ensure_active(), Err(PortalError::Cancelled)));
    }
}
