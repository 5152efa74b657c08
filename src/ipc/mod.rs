/*!
 * IPC Module
 * In-process communication: blocking byte pipes and their registry
 */

pub mod pipe;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use pipe::{Pipe, PipeError, PipeManager, PipeStats};
pub use traits::PipeChannel;
pub use types::PipeId;
