//! Bounds-checked views over caller-owned byte buffers.
//!
//! A [`ByteView`] describes the region of an externally-allocated buffer that
//! a single bridge call may read from or write to: everything between the
//! view's *position* and its *limit*. The bridge advances the position by the
//! number of bytes the engine consumed or produced and never touches the
//! limit or the buffer allocation itself. The `position <= limit <= capacity`
//! invariant is enforced by this type rather than by caller convention.

use thiserror::Error;

/// A caller-owned buffer region with cursor semantics.
///
/// The view borrows the buffer for its lifetime, so the memory cannot be
/// moved, freed, or resized while a bridge call is in flight.
#[derive(Debug)]
pub struct ByteView<'a> {
    bytes: &'a mut [u8],
    position: usize,
    limit: usize,
}

impl<'a> ByteView<'a> {
    /// Creates a view spanning the whole buffer, with the position at zero
    /// and the limit at the buffer's length.
    #[must_use]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        let limit = bytes.len();
        Self {
            bytes,
            position: 0,
            limit,
        }
    }

    /// Creates a view over an explicit `position..limit` region of the
    /// buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::LimitBeyondCapacity`] when `limit` exceeds the
    /// buffer length and [`ViewError::PositionBeyondLimit`] when `position`
    /// exceeds `limit`.
    pub fn with_region(
        bytes: &'a mut [u8],
        position: usize,
        limit: usize,
    ) -> Result<Self, ViewError> {
        if limit > bytes.len() {
            return Err(ViewError::LimitBeyondCapacity {
                limit,
                capacity: bytes.len(),
            });
        }
        if position > limit {
            return Err(ViewError::PositionBeyondLimit { position, limit });
        }
        Ok(Self {
            bytes,
            position,
            limit,
        })
    }

    /// Returns the index of the next byte to read or write.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the end of the valid region. The bridge never changes this.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the total length of the underlying buffer.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the number of bytes between the position and the limit.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns `true` while any bytes remain between position and limit.
    #[must_use]
    pub const fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Moves the position, e.g. to replay or skip part of the region.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::PositionBeyondLimit`] when the new position would
    /// pass the limit.
    pub fn set_position(&mut self, position: usize) -> Result<(), ViewError> {
        if position > self.limit {
            return Err(ViewError::PositionBeyondLimit {
                position,
                limit: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Moves the limit. Callers use this to stage a partial region; the
    /// bridge itself never calls it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::LimitBeyondCapacity`] when the new limit exceeds
    /// the buffer length and [`ViewError::PositionBeyondLimit`] when it would
    /// fall below the current position.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), ViewError> {
        if limit > self.bytes.len() {
            return Err(ViewError::LimitBeyondCapacity {
                limit,
                capacity: self.bytes.len(),
            });
        }
        if self.position > limit {
            return Err(ViewError::PositionBeyondLimit {
                position: self.position,
                limit,
            });
        }
        self.limit = limit;
        Ok(())
    }

    /// Returns the readable `position..limit` region.
    #[must_use]
    pub fn remaining_slice(&self) -> &[u8] {
        &self.bytes[self.position..self.limit]
    }

    /// Returns the writable `position..limit` region.
    #[must_use]
    pub fn remaining_slice_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.position..self.limit]
    }

    /// Advances the position after the engine consumed or produced `count`
    /// bytes. The engine never reports more progress than the region it was
    /// handed, so this cannot pass the limit.
    pub(crate) fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.remaining());
        self.position = self.limit.min(self.position + count);
    }
}

/// Error returned when constructing or adjusting a view would break the
/// `position <= limit <= capacity` invariant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ViewError {
    /// The requested position lies past the view's limit.
    #[error("view position {position} exceeds limit {limit}")]
    PositionBeyondLimit {
        /// Requested position.
        position: usize,
        /// Limit in effect.
        limit: usize,
    },
    /// The requested limit lies past the end of the underlying buffer.
    #[error("view limit {limit} exceeds buffer capacity {capacity}")]
    LimitBeyondCapacity {
        /// Requested limit.
        limit: usize,
        /// Length of the underlying buffer.
        capacity: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_view_spans_whole_buffer() {
        let mut buf = [0u8; 8];
        let view = ByteView::new(&mut buf);
        assert_eq!(view.position(), 0);
        assert_eq!(view.limit(), 8);
        assert_eq!(view.remaining(), 8);
        assert!(view.has_remaining());
    }

    #[test]
    fn with_region_validates_bounds() {
        let mut buf = [0u8; 8];
        assert!(ByteView::with_region(&mut buf, 2, 6).is_ok());
        assert_eq!(
            ByteView::with_region(&mut buf, 0, 9).unwrap_err(),
            ViewError::LimitBeyondCapacity {
                limit: 9,
                capacity: 8
            }
        );
        assert_eq!(
            ByteView::with_region(&mut buf, 5, 4).unwrap_err(),
            ViewError::PositionBeyondLimit {
                position: 5,
                limit: 4
            }
        );
    }

    #[test]
    fn advance_moves_position_only() {
        let mut buf = [0u8; 8];
        let mut view = ByteView::with_region(&mut buf, 1, 7).unwrap();
        view.advance(3);
        assert_eq!(view.position(), 4);
        assert_eq!(view.limit(), 7);
        assert_eq!(view.remaining(), 3);
    }

    #[test]
    fn set_position_rejects_passing_the_limit() {
        let mut buf = [0u8; 8];
        let mut view = ByteView::with_region(&mut buf, 0, 4).unwrap();
        assert!(view.set_position(4).is_ok());
        assert!(view.set_position(5).is_err());
    }

    #[test]
    fn set_limit_rejects_falling_below_position() {
        let mut buf = [0u8; 8];
        let mut view = ByteView::with_region(&mut buf, 3, 6).unwrap();
        assert!(view.set_limit(8).is_ok());
        assert!(view.set_limit(2).is_err());
        assert!(view.set_limit(9).is_err());
    }

    #[test]
    fn remaining_slices_cover_the_region() {
        let mut buf: Vec<u8> = (0..8).collect();
        let mut view = ByteView::with_region(&mut buf, 2, 5).unwrap();
        assert_eq!(view.remaining_slice(), &[2, 3, 4]);
        view.remaining_slice_mut()[0] = 42;
        assert_eq!(view.remaining_slice(), &[42, 3, 4]);
    }
}
