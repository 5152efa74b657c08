/*!
 * Pipe Types
 * Errors, lifecycle flags, and stats snapshots for pipes
 */

use crate::core::serde::{is_false, is_zero_usize};
use crate::core::types::Size;
use crate::ipc::types::PipeId;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

bitflags! {
    /// Pipe lifecycle flags.
    ///
    /// `OPEN` is set from construction until `close`. `RESET` is raised by
    /// `reset` while callers are suspended and lowered by the last of them to
    /// depart.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PipeFlags: u8 {
        const OPEN = 1 << 0;
        const RESET = 1 << 1;
    }
}

/// Pipe error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipeError {
    /// Non-blocking attempt failed, or a blocking attempt timed out
    #[error("operation would block")]
    WouldBlock,

    /// The pipe was closed, possibly while the caller was suspended
    #[error("pipe closed")]
    Closed,

    /// The caller was unblocked by a reset; the pipe remains usable
    #[error("operation canceled by pipe reset")]
    Canceled,

    /// Close of an already-closed pipe
    #[error("pipe already closed")]
    AlreadyClosed,

    /// No live pipe registered under this id
    #[error("pipe not found: {0}")]
    NotFound(PipeId),

    /// Too many live pipes
    #[error("pipe limit exceeded: {0}/{1}")]
    LimitExceeded(Size, Size),
}

impl PipeError {
    /// POSIX errno equivalent for the userspace syscall boundary
    pub fn errno(&self) -> i32 {
        match self {
            PipeError::WouldBlock => 11,        // EAGAIN
            PipeError::Closed => 32,            // EPIPE
            PipeError::Canceled => 125,         // ECANCELED
            PipeError::AlreadyClosed => 114,    // EALREADY
            PipeError::NotFound(_) => 2,        // ENOENT
            PipeError::LimitExceeded(..) => 24, // EMFILE
        }
    }
}

/// Pipe statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipeStats {
    pub id: PipeId,
    pub capacity: Size,
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub buffered: Size,
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub waiting: Size,
    #[serde(default, skip_serializing_if = "is_false")]
    pub closed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(PipeError::WouldBlock.errno(), 11);
        assert_eq!(PipeError::Closed.errno(), 32);
        assert_eq!(PipeError::Canceled.errno(), 125);
        assert_eq!(PipeError::AlreadyClosed.errno(), 114);
    }

    #[test]
    fn test_flag_transitions() {
        let mut flags = PipeFlags::OPEN;
        assert!(flags.contains(PipeFlags::OPEN));
        assert!(!flags.contains(PipeFlags::RESET));

        flags.insert(PipeFlags::RESET);
        assert!(flags.contains(PipeFlags::OPEN | PipeFlags::RESET));

        flags.remove(PipeFlags::RESET);
        assert_eq!(flags, PipeFlags::OPEN);

        // close clears everything at once
        flags = PipeFlags::empty();
        assert!(!flags.contains(PipeFlags::OPEN));
    }

    #[test]
    fn test_stats_skip_quiescent_fields() {
        let stats = PipeStats {
            id: 7,
            capacity: 64,
            buffered: 0,
            waiting: 0,
            closed: false,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"id":7,"capacity":64}"#);

        let parsed: PipeStats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.buffered, 0);
        assert!(!parsed.closed);
    }
}
