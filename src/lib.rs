/*!
 * bytepipe
 *
 * Bounded blocking byte pipes for cooperating threads:
 * - FIFO byte channels with caller-chosen capacity
 * - Timed blocking reads and writes with a no-wait fast-fail mode
 * - Connection-like lifecycle: reset cancels waiters, close drains then EOFs
 * - An id-keyed registry for sharing pipes across subsystems
 */

pub mod core;
pub mod ipc;

pub use crate::core::sync::{Timeout, WaitQueue, WakeResult};
pub use crate::ipc::pipe::{Pipe, PipeError, PipeManager, PipeStats};
pub use crate::ipc::traits::PipeChannel;
pub use crate::ipc::types::PipeId;
