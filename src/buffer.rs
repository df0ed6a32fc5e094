//! Owned byte region with prepend headroom.
//!
//! RLC transmit paths build a PDU around an existing payload: the payload is
//! placed first and the header is prepended once segmentation is decided. The
//! original-style approach of decrementing a raw start pointer is replaced
//! here by [`PduBuffer`], which owns a fixed allocation and tracks the used
//! range `[start, end)` inside it. Growing the region in either direction is
//! an explicit, checked operation.

use crate::error::RlcBuildingError;

/// Byte region `[start, end)` inside a fixed-capacity owned allocation.
///
/// `prepend` exposes bytes before `start` (for headers), `extend_tail` and
/// `append` expose bytes after `end` (for payload or trailing fields). Both
/// fail with a structured error when the allocation has no room left; the
/// region is never reallocated or moved.
#[derive(Debug, Clone)]
pub struct PduBuffer {
    buf: Box<[u8]>,
    start: usize,
    end: usize,
}

impl PduBuffer {
    /// Creates an empty region of `capacity` bytes with the used range
    /// positioned `headroom` bytes in, leaving that much prefix space for
    /// later prepends.
    ///
    /// `headroom` is clamped to `capacity`.
    pub fn with_headroom(capacity: usize, headroom: usize) -> Self {
        let headroom = headroom.min(capacity);
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            start: headroom,
            end: headroom,
        }
    }

    /// Creates a region holding a copy of `payload`, with `headroom` bytes of
    /// prefix space before it.
    pub fn from_payload(payload: &[u8], headroom: usize) -> Self {
        let mut buf = vec![0u8; headroom + payload.len()].into_boxed_slice();
        buf[headroom..].copy_from_slice(payload);
        Self {
            buf,
            start: headroom,
            end: headroom + payload.len(),
        }
    }

    /// Length of the used range.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the used range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Total allocated capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Unused bytes before the region start.
    #[inline]
    pub fn headroom(&self) -> usize {
        self.start
    }

    /// Unused bytes after the region end.
    #[inline]
    pub fn tailroom(&self) -> usize {
        self.buf.len() - self.end
    }

    /// The used range as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    /// The used range as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..self.end]
    }

    /// Grows the region backward by `len` bytes and returns the newly exposed
    /// prefix for the caller to fill. Bytes already in the region keep their
    /// position immediately after the returned slice.
    ///
    /// # Errors
    /// - [`RlcBuildingError::InsufficientHeadroom`] - Fewer than `len` unused
    ///   bytes before the region start. The region is unchanged.
    pub fn prepend(&mut self, len: usize) -> Result<&mut [u8], RlcBuildingError> {
        if len > self.start {
            return Err(RlcBuildingError::InsufficientHeadroom {
                needed: len,
                available: self.start,
            });
        }
        self.start -= len;
        Ok(&mut self.buf[self.start..self.start + len])
    }

    /// Grows the region forward by `len` bytes and returns the newly exposed
    /// suffix for the caller to fill.
    ///
    /// # Errors
    /// - [`RlcBuildingError::BufferTooSmall`] - Fewer than `len` unused bytes
    ///   after the region end. The region is unchanged.
    pub fn extend_tail(&mut self, len: usize) -> Result<&mut [u8], RlcBuildingError> {
        if len > self.tailroom() {
            return Err(RlcBuildingError::BufferTooSmall {
                needed: self.len() + len,
                available: self.capacity() - self.start,
            });
        }
        let old_end = self.end;
        self.end += len;
        Ok(&mut self.buf[old_end..self.end])
    }

    /// Appends a copy of `bytes` at the region end.
    ///
    /// # Errors
    /// - [`RlcBuildingError::BufferTooSmall`] - Not enough tail capacity.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), RlcBuildingError> {
        let dst = self.extend_tail(bytes.len())?;
        dst.copy_from_slice(bytes);
        Ok(())
    }
}
