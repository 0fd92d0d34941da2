//! Counting semaphore.
//!
//! A semaphore initialized with zero permits works as a repeating event
//! signal: [`Semaphore::post`] records that something happened and wakes one
//! blocked thread, [`Semaphore::wait`] blocks until such a record exists and
//! consumes it.  A post with nobody waiting is not lost; the permit stays until
//! someone takes it.
//!
//! Waiters are not served in FIFO order.  Which of several blocked threads
//! wins a permit is up to the condition variable, and nothing in the protocol
//! relies on it.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Counting semaphore built from a mutex-guarded counter and a condition
/// variable.
#[derive(Default)]
pub struct Semaphore {
    permits: Mutex<usize>,
    cond:    Condvar,
}

impl Semaphore {
    /// Creates a semaphore holding `permits` initial permits.
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            cond:    Condvar::new(),
        }
    }

    /// Adds one permit and wakes one waiter, if any.
    pub fn post(&self) {
        let mut permits = self.lock();
        *permits += 1;
        self.cond.notify_one();
    }

    /// Adds `n` permits at once.
    ///
    /// Equivalent to `n` calls to [`post`](Self::post) but takes the counter
    /// lock once.  Every waiter is woken; the ones that find nothing left go
    /// back to sleep.
    pub fn post_n(&self, n: usize) {
        if n == 0 {
            return;
        }
        let mut permits = self.lock();
        *permits += n;
        if n == 1 {
            self.cond.notify_one();
        } else {
            self.cond.notify_all();
        }
    }

    /// Blocks until a permit is available, then consumes it.
    pub fn wait(&self) {
        let guard = self.lock();
        let mut permits = self
            .cond
            .wait_while(guard, |p| *p == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *permits -= 1;
    }

    /// Consumes `n` permits, one at a time.
    ///
    /// Permits are taken as they arrive rather than all at once, so two
    /// threads each waiting for several permits cannot starve each other.
    pub fn wait_n(&self, n: usize) {
        for _ in 0..n {
            self.wait();
        }
    }

    /// Permits currently pending.  Only a snapshot; may be stale on return.
    pub fn available(&self) -> usize {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The counter is a plain integer; a panic elsewhere cannot leave it
        // half-updated.
        self.permits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
