//! Counting semaphore for bounding the root worker fan-out.

use std::sync::{Condvar, Mutex};

/// A counting semaphore.
///
/// Built on a mutex-guarded permit count and a condvar; created fresh for
/// every root search, so no stale state survives between engine calls.
pub(crate) struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    /// Create a semaphore holding `permits` permits.
    pub(crate) fn new(permits: usize) -> Semaphore {
        Semaphore {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Block until a permit is available, then take it.
    pub(crate) fn acquire(&self) {
        let mut permits = self.permits.lock().expect("semaphore mutex poisoned");
        while *permits == 0 {
            permits = self.available.wait(permits).expect("semaphore mutex poisoned");
        }
        *permits -= 1;
    }

    /// Return a permit, waking one waiter.
    pub(crate) fn release(&self) {
        let mut permits = self.permits.lock().expect("semaphore mutex poisoned");
        *permits += 1;
        drop(permits);
        self.available.notify_one();
    }
}
