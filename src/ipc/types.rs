/*!
 * IPC Types
 * Common identifier types for IPC objects
 */

/// Pipe identifier
pub type PipeId = u32;
