/*!
 * Wait Queue
 *
 * Condvar-backed suspension with FIFO wake-up. A queue is bound to the mutex
 * whose guard is handed to `pend`; parking_lot parks waiters in arrival
 * order, so `wake_one` resumes the earliest suspender and wakes are never
 * spurious.
 */

use parking_lot::{Condvar, MutexGuard};
use std::time::Instant;

/// Result of a wake operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeResult {
    /// Successfully woke N waiters (N >= 1)
    Woken(usize),
    /// No waiters were waiting
    NoWaiters,
}

impl WakeResult {
    /// Check if any waiters were woken
    #[inline]
    pub fn is_woken(&self) -> bool {
        matches!(self, WakeResult::Woken(_))
    }

    /// Number of woken waiters (0 if none)
    #[inline]
    pub fn count(&self) -> usize {
        match self {
            WakeResult::Woken(n) => *n,
            WakeResult::NoWaiters => 0,
        }
    }
}

/// FIFO-ordered queue of threads suspended until explicitly woken
pub struct WaitQueue {
    condvar: Condvar,
}

impl WaitQueue {
    pub const fn new() -> Self {
        Self {
            condvar: Condvar::new(),
        }
    }

    /// Atomically release the guarded lock and suspend the current thread.
    ///
    /// Returns `true` when woken by [`wake_one`](Self::wake_one) or
    /// [`wake_all`](Self::wake_all), `false` when the deadline passed first;
    /// `None` suspends without a deadline. The lock is re-acquired before
    /// returning on every path.
    pub fn pend<T>(&self, guard: &mut MutexGuard<'_, T>, deadline: Option<Instant>) -> bool {
        match deadline {
            Some(deadline) => !self.condvar.wait_until(guard, deadline).timed_out(),
            None => {
                self.condvar.wait(guard);
                true
            }
        }
    }

    /// Wake the earliest suspended thread, if any.
    ///
    /// Must be called while holding the lock the waiters pended with, so the
    /// wake cannot slip between a predicate check and the suspension.
    pub fn wake_one(&self) -> WakeResult {
        if self.condvar.notify_one() {
            WakeResult::Woken(1)
        } else {
            WakeResult::NoWaiters
        }
    }

    /// Wake every suspended thread
    pub fn wake_all(&self) -> WakeResult {
        match self.condvar.notify_all() {
            0 => WakeResult::NoWaiters,
            n => WakeResult::Woken(n),
        }
    }
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}
