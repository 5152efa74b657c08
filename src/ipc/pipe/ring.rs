/*!
 * Ring Buffer
 * Bounded byte FIFO over `ringbuf::HeapRb`, tolerant of zero capacity
 */

use crate::core::types::Size;
use ringbuf::{traits::*, HeapRb};

/// Bounded byte FIFO backing one pipe.
///
/// `HeapRb` rejects a zero capacity, so a capacity-zero ring holds no storage
/// at all: it reports zero space and zero occupancy and every transfer moves
/// nothing.
pub(crate) struct RingBuffer {
    rb: Option<HeapRb<u8>>,
    capacity: Size,
}

impl RingBuffer {
    pub fn new(capacity: Size) -> Self {
        Self {
            rb: (capacity > 0).then(|| HeapRb::new(capacity)),
            capacity,
        }
    }

    /// Copy as many bytes as fit from `src`; returns the count copied
    pub fn put(&mut self, src: &[u8]) -> Size {
        self.rb.as_mut().map_or(0, |rb| rb.push_slice(src))
    }

    /// Copy up to `dst.len()` buffered bytes out; returns the count copied
    pub fn get(&mut self, dst: &mut [u8]) -> Size {
        self.rb.as_mut().map_or(0, |rb| rb.pop_slice(dst))
    }

    /// Bytes of free space
    pub fn space(&self) -> Size {
        self.rb.as_ref().map_or(0, |rb| rb.vacant_len())
    }

    /// Bytes currently buffered
    pub fn len(&self) -> Size {
        self.rb.as_ref().map_or(0, |rb| rb.occupied_len())
    }

    pub fn capacity(&self) -> Size {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.space() == 0
    }

    /// Discard all buffered bytes
    pub fn reset(&mut self) {
        if let Some(rb) = self.rb.as_mut() {
            rb.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut ring = RingBuffer::new(8);
        assert_eq!(ring.put(b"abc"), 3);
        assert_eq!(ring.put(b"de"), 2);

        let mut out = [0u8; 8];
        assert_eq!(ring.get(&mut out), 5);
        assert_eq!(&out[..5], b"abcde");
        assert!(ring.is_empty());
    }

    #[test]
    fn test_partial_put_when_full() {
        let mut ring = RingBuffer::new(4);
        assert_eq!(ring.put(b"abcdef"), 4);
        assert!(ring.is_full());
        assert_eq!(ring.put(b"x"), 0);
    }

    #[test]
    fn test_wraparound() {
        let mut ring = RingBuffer::new(4);
        let mut out = [0u8; 4];

        // Cycle the indices past the end of the storage several times
        for round in 0..10u8 {
            let chunk = [round, round.wrapping_add(1), round.wrapping_add(2)];
            assert_eq!(ring.put(&chunk), 3);
            assert_eq!(ring.get(&mut out[..3]), 3);
            assert_eq!(&out[..3], &chunk);
        }
    }

    #[test]
    fn test_space_accounting() {
        let mut ring = RingBuffer::new(8);
        assert_eq!(ring.space(), 8);
        ring.put(b"abc");
        assert_eq!(ring.space(), 5);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.capacity(), 8);
    }

    #[test]
    fn test_reset_discards_bytes() {
        let mut ring = RingBuffer::new(8);
        ring.put(b"abc");
        ring.reset();
        assert!(ring.is_empty());
        assert_eq!(ring.space(), 8);
    }

    #[test]
    fn test_zero_capacity() {
        let mut ring = RingBuffer::new(0);
        assert_eq!(ring.capacity(), 0);
        assert_eq!(ring.space(), 0);
        assert!(ring.is_empty());
        assert!(ring.is_full());
        assert_eq!(ring.put(b"abc"), 0);

        let mut out = [0u8; 4];
        assert_eq!(ring.get(&mut out), 0);
    }
}
