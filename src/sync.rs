//! Synchronization primitives for the search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe stop flag for controlling search termination.
///
/// Wraps `Arc<AtomicBool>` so the UCI reader thread and the search loop can
/// share one flag without passing raw atomics around.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub fn as_arc(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Arc<AtomicBool>> for StopFlag {
    fn from(arc: Arc<AtomicBool>) -> Self {
        StopFlag(arc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_set());
        flag.set();
        assert!(flag.is_set());
        flag.reset();
        assert!(!flag.is_set());
    }

    #[test]
    fn clone_shares_state() {
        let flag1 = StopFlag::new();
        let flag2 = flag1.clone();
        flag1.set();
        assert!(flag2.is_set());
    }

    #[test]
    fn stopped_starts_set() {
        assert!(StopFlag::stopped().is_set());
    }
}
