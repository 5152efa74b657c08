/*!
 * Synchronization Primitives
 *
 * Timed suspension and FIFO wake-up for blocking pipe operations:
 * - `Timeout`: no-wait / bounded / unbounded wait values
 * - `WaitQueue`: condvar-backed suspension bound to a shared-state lock
 */

pub mod timeout;
pub mod wait;

// Re-export public API
pub use timeout::Timeout;
pub use wait::{WaitQueue, WakeResult};
