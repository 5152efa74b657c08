/*!
 * Pipe Manager
 * Id-keyed registry of live pipes
 */

use super::pipe::Pipe;
use super::types::{PipeError, PipeStats};
use crate::core::limits::{DEFAULT_PIPE_CAPACITY, MAX_PIPES, MAX_PIPE_CAPACITY};
use crate::core::sync::Timeout;
use crate::core::types::Size;
use crate::ipc::traits::PipeChannel;
use crate::ipc::types::PipeId;
use dashmap::DashMap;
use log::{info, trace, warn};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Pipe registry
pub struct PipeManager {
    pipes: Arc<DashMap<PipeId, Arc<Pipe>>>,
    next_id: AtomicU32,
}

impl PipeManager {
    pub fn new() -> Self {
        info!(
            "Pipe manager initialized (default capacity: {})",
            DEFAULT_PIPE_CAPACITY
        );
        Self {
            // Use 64 shards for pipes - high I/O contention
            pipes: Arc::new(DashMap::with_shard_amount(64)),
            next_id: AtomicU32::new(1),
        }
    }

    /// Register a new pipe; `None` selects the default capacity.
    ///
    /// Requested capacities are clamped to `MAX_PIPE_CAPACITY`.
    pub fn create(&self, capacity: Option<Size>) -> Result<PipeId, PipeError> {
        let live = self.pipes.len();
        if live >= MAX_PIPES {
            return Err(PipeError::LimitExceeded(live, MAX_PIPES));
        }

        let capacity = capacity
            .unwrap_or(DEFAULT_PIPE_CAPACITY)
            .min(MAX_PIPE_CAPACITY);
        let pipe_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.pipes.insert(pipe_id, Arc::new(Pipe::new(capacity)));

        info!("Created pipe {} (capacity: {} bytes)", pipe_id, capacity);
        Ok(pipe_id)
    }

    /// Resolve a pipe handle outside any shard lock, so a blocking pipe
    /// operation cannot stall unrelated registry calls
    fn pipe(&self, pipe_id: PipeId) -> Result<Arc<Pipe>, PipeError> {
        self.pipes
            .get(&pipe_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(PipeError::NotFound(pipe_id))
    }

    pub fn write(
        &self,
        pipe_id: PipeId,
        data: &[u8],
        timeout: Timeout,
    ) -> Result<Size, PipeError> {
        let pipe = self.pipe(pipe_id)?;
        let written = pipe.write(data, timeout)?;

        trace!(
            "Pipe {} write: {} bytes ({} buffered)",
            pipe_id,
            written,
            pipe.buffered()
        );

        Ok(written)
    }

    pub fn read(&self, pipe_id: PipeId, size: Size, timeout: Timeout) -> Result<Vec<u8>, PipeError> {
        let pipe = self.pipe(pipe_id)?;

        // A single call can deliver at most one buffer's worth
        let mut data = vec![0u8; size.min(MAX_PIPE_CAPACITY)];
        let read = pipe.read(&mut data, timeout)?;
        data.truncate(read);

        trace!(
            "Pipe {} read: {} bytes ({} remaining)",
            pipe_id,
            read,
            pipe.buffered()
        );

        Ok(data)
    }

    /// Discard buffered bytes and cancel suspended callers
    pub fn reset(&self, pipe_id: PipeId) -> Result<(), PipeError> {
        let pipe = self.pipe(pipe_id)?;
        pipe.reset();
        info!("Reset pipe {}", pipe_id);
        Ok(())
    }

    /// Permanently disable a pipe, leaving it registered for draining
    pub fn close(&self, pipe_id: PipeId) -> Result<(), PipeError> {
        let pipe = self.pipe(pipe_id)?;
        pipe.close()?;
        info!("Closed pipe {}", pipe_id);
        Ok(())
    }

    /// Remove a pipe from the registry.
    ///
    /// The pipe is closed first so suspended callers depart before the entry
    /// disappears; storage is freed once the last handle drops.
    pub fn destroy(&self, pipe_id: PipeId) -> Result<(), PipeError> {
        let (_, pipe) = self
            .pipes
            .remove(&pipe_id)
            .ok_or(PipeError::NotFound(pipe_id))?;

        if pipe.close().is_err() {
            // Already closed by its users; nobody left to wake
            warn!("Destroying pipe {} that was already closed", pipe_id);
        }

        info!(
            "Destroyed pipe {} (reclaimed {} bytes of capacity)",
            pipe_id,
            pipe.capacity()
        );
        Ok(())
    }

    pub fn stats(&self, pipe_id: PipeId) -> Result<PipeStats, PipeError> {
        let pipe = self.pipe(pipe_id)?;

        Ok(PipeStats {
            id: pipe_id,
            capacity: pipe.capacity(),
            buffered: pipe.buffered(),
            waiting: pipe.waiting(),
            closed: !pipe.is_open(),
        })
    }

    /// Number of registered pipes
    pub fn count(&self) -> Size {
        self.pipes.len()
    }
}

impl Clone for PipeManager {
    fn clone(&self) -> Self {
        Self {
            pipes: Arc::clone(&self.pipes),
            next_id: AtomicU32::new(self.next_id.load(Ordering::SeqCst)),
        }
    }
}

impl Default for PipeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PipeChannel for PipeManager {
    fn create(&self, capacity: Option<Size>) -> Result<PipeId, PipeError> {
        self.create(capacity)
    }

    fn write(&self, pipe_id: PipeId, data: &[u8], timeout: Timeout) -> Result<Size, PipeError> {
        self.write(pipe_id, data, timeout)
    }

    fn read(&self, pipe_id: PipeId, size: Size, timeout: Timeout) -> Result<Vec<u8>, PipeError> {
        self.read(pipe_id, size, timeout)
    }

    fn reset(&self, pipe_id: PipeId) -> Result<(), PipeError> {
        self.reset(pipe_id)
    }

    fn close(&self, pipe_id: PipeId) -> Result<(), PipeError> {
        self.close(pipe_id)
    }

    fn destroy(&self, pipe_id: PipeId) -> Result<(), PipeError> {
        self.destroy(pipe_id)
    }

    fn stats(&self, pipe_id: PipeId) -> Result<PipeStats, PipeError> {
        self.stats(pipe_id)
    }
}
