/*!
 * Pipe State Machine
 *
 * A bounded blocking byte pipe: one ring buffer, two FIFO wait queues, a
 * lifecycle flag word, and a waiter count, all serialized under a single
 * lock. Writers suspend while the buffer is full, readers while it is empty.
 * `reset` cancels every suspended caller and discards buffered bytes without
 * closing the pipe; `close` disables it permanently, letting readers drain
 * what is left before they see EOF.
 */

use super::ring::RingBuffer;
use super::types::{PipeError, PipeFlags};
use crate::core::sync::{Timeout, WaitQueue};
use crate::core::types::Size;
use parking_lot::{Mutex, MutexGuard};

/// Shared state guarded by the pipe lock
struct PipeState {
    buf: RingBuffer,
    flags: PipeFlags,
    /// Threads currently suspended on either wait queue
    waiting: Size,
}

type WaitCond = fn(&PipeState) -> bool;

fn pipe_full(state: &PipeState) -> bool {
    state.buf.is_full()
}

fn pipe_empty(state: &PipeState) -> bool {
    state.buf.is_empty()
}

/// Bounded blocking byte pipe
pub struct Pipe {
    state: Mutex<PipeState>,
    /// Readers suspended until the buffer is non-empty
    data: WaitQueue,
    /// Writers suspended until the buffer is non-full
    space: WaitQueue,
}

impl Pipe {
    /// Create an open pipe buffering up to `capacity` bytes.
    ///
    /// A capacity of zero is allowed; such a pipe can never transfer a byte,
    /// so every non-empty write or read blocks or fails with
    /// [`PipeError::WouldBlock`].
    pub fn new(capacity: Size) -> Self {
        Self {
            state: Mutex::new(PipeState {
                buf: RingBuffer::new(capacity),
                flags: PipeFlags::OPEN,
                waiting: 0,
            }),
            data: WaitQueue::new(),
            space: WaitQueue::new(),
        }
    }

    /// Suspend the current thread on `queue` until `cond` clears.
    ///
    /// Returns with the lock held on every path. Wakes are classified
    /// against pipe state, never against the wake reason; a close observed
    /// after the wake wins over a reset in progress. A wake that lost the
    /// race to a fast-path caller re-pends until the deadline passes. The
    /// last waiter to depart a reset lowers the RESET bit.
    fn wait_for(
        &self,
        queue: &WaitQueue,
        state: &mut MutexGuard<'_, PipeState>,
        cond: WaitCond,
        timeout: Timeout,
    ) -> Result<(), PipeError> {
        if timeout.is_no_wait() || state.flags.contains(PipeFlags::RESET) {
            return Err(PipeError::WouldBlock);
        }
        let deadline = timeout.deadline();
        loop {
            state.waiting += 1;
            let woken = queue.pend(state, deadline);
            state.waiting -= 1;

            if !state.flags.contains(PipeFlags::OPEN) {
                return Err(PipeError::Closed);
            }
            if state.flags.contains(PipeFlags::RESET) {
                if state.waiting == 0 {
                    state.flags.remove(PipeFlags::RESET);
                }
                return Err(PipeError::Canceled);
            }
            if !cond(state) {
                return Ok(());
            }
            if !woken {
                return Err(PipeError::WouldBlock);
            }
            // Woken, but a racing caller claimed the bytes or the space
            // before this thread re-acquired the lock; sleep again.
        }
    }

    /// Write up to `src.len()` bytes, suspending while the buffer is full.
    ///
    /// Returns the number of bytes accepted, which may be less than
    /// `src.len()`: a partial transfer returns immediately and the caller
    /// re-issues for the remainder. An empty `src` transfers nothing and
    /// never suspends.
    pub fn write(&self, src: &[u8], timeout: Timeout) -> Result<Size, PipeError> {
        let mut state = self.state.lock();
        if src.is_empty() {
            return if state.flags.contains(PipeFlags::OPEN) {
                Ok(0)
            } else {
                Err(PipeError::Closed)
            };
        }
        if pipe_full(&state) {
            self.wait_for(&self.space, &mut state, pipe_full, timeout)?;
        }
        if !state.flags.contains(PipeFlags::OPEN) {
            return Err(PipeError::Closed);
        }
        let written = state.buf.put(src);
        if written > 0 {
            self.data.wake_one();
        }
        Ok(written)
    }

    /// Read up to `dst.len()` bytes, suspending while the buffer is empty.
    ///
    /// A reader woken by `close` still drains whatever was buffered before
    /// the close; only an empty closed pipe reports [`PipeError::Closed`].
    pub fn read(&self, dst: &mut [u8], timeout: Timeout) -> Result<Size, PipeError> {
        let mut state = self.state.lock();
        if dst.is_empty() {
            return if pipe_empty(&state) && !state.flags.contains(PipeFlags::OPEN) {
                Err(PipeError::Closed)
            } else {
                Ok(0)
            };
        }
        if pipe_empty(&state) && state.flags.contains(PipeFlags::OPEN) {
            match self.wait_for(&self.data, &mut state, pipe_empty, timeout) {
                // A close while suspended still lets the reader drain below.
                Ok(()) | Err(PipeError::Closed) => {}
                Err(e) => return Err(e),
            }
        }
        if pipe_empty(&state) && !state.flags.contains(PipeFlags::OPEN) {
            return Err(PipeError::Closed);
        }
        let read = state.buf.get(dst);
        if read > 0 {
            self.space.wake_one();
        }
        Ok(read)
    }

    /// Discard buffered bytes and cancel every suspended reader and writer.
    ///
    /// Canceled callers return [`PipeError::Canceled`]; the pipe stays open
    /// and usable. The RESET bit is raised only while waiters are draining,
    /// and the last of them lowers it, so a quiescent pipe carries no
    /// residue into the next operation.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.buf.reset();
        if state.waiting > 0 {
            state.flags.insert(PipeFlags::RESET);
            self.data.wake_all();
            self.space.wake_all();
        }
    }

    /// Permanently disable the pipe.
    ///
    /// Suspended writers fail with [`PipeError::Closed`]; suspended readers
    /// drain remaining bytes first. A second close reports
    /// [`PipeError::AlreadyClosed`].
    pub fn close(&self) -> Result<(), PipeError> {
        let mut state = self.state.lock();
        if !state.flags.contains(PipeFlags::OPEN) {
            return Err(PipeError::AlreadyClosed);
        }
        state.flags = PipeFlags::empty();
        self.data.wake_all();
        self.space.wake_all();
        Ok(())
    }

    /// Buffer capacity in bytes
    pub fn capacity(&self) -> Size {
        self.state.lock().buf.capacity()
    }

    /// Bytes currently buffered
    pub fn buffered(&self) -> Size {
        self.state.lock().buf.len()
    }

    /// Bytes of free buffer space
    pub fn available_space(&self) -> Size {
        self.state.lock().buf.space()
    }

    /// Whether the pipe has not been closed
    pub fn is_open(&self) -> bool {
        self.state.lock().flags.contains(PipeFlags::OPEN)
    }

    /// Threads currently suspended on either queue
    pub fn waiting(&self) -> Size {
        self.state.lock().waiting
    }
}

impl std::fmt::Debug for Pipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Pipe")
            .field("buffered", &state.buf.len())
            .field("capacity", &state.buf.capacity())
            .field("waiting", &state.waiting)
            .field("open", &state.flags.contains(PipeFlags::OPEN))
            .finish()
    }
}
