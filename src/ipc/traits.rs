/*!
 * IPC Traits
 * Abstractions over the pipe registry surface
 */

use crate::core::sync::Timeout;
use crate::core::types::Size;
use crate::ipc::pipe::{PipeError, PipeStats};
use crate::ipc::types::PipeId;

/// Pipe communication interface
pub trait PipeChannel: Send + Sync {
    /// Create a new pipe
    fn create(&self, capacity: Option<Size>) -> Result<PipeId, PipeError>;

    /// Write data to a pipe
    fn write(&self, pipe_id: PipeId, data: &[u8], timeout: Timeout) -> Result<Size, PipeError>;

    /// Read up to `size` bytes from a pipe
    fn read(&self, pipe_id: PipeId, size: Size, timeout: Timeout) -> Result<Vec<u8>, PipeError>;

    /// Discard buffered bytes and cancel suspended callers
    fn reset(&self, pipe_id: PipeId) -> Result<(), PipeError>;

    /// Permanently disable a pipe
    fn close(&self, pipe_id: PipeId) -> Result<(), PipeError>;

    /// Remove a pipe from the registry
    fn destroy(&self, pipe_id: PipeId) -> Result<(), PipeError>;

    /// Get pipe statistics
    fn stats(&self, pipe_id: PipeId) -> Result<PipeStats, PipeError>;
}
