// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Deref, DerefMut, Range};

/// A bounded view over a buffer handed off by
/// [`Builder::close_slice_range`](crate::Builder::close_slice_range).
///
/// Owns the whole buffer; dereferences to exactly the requested elements.
///
/// # Example
///
/// ```rust
/// use handoff::Builder;
///
/// let mut builder = Builder::from_seq([10, 20, 30, 40]);
/// let view = builder.close_slice_range(1, 2).unwrap();
///
/// assert_eq!(&*view, &[20, 30]);
/// assert_eq!(view.range(), 1..3);
/// assert_eq!(view.into_vec(), [20, 30]);
/// ```
pub struct ClosedSlice<T> {
    buffer: Vec<T>,
    start: usize,
    len: usize,
}

impl<T> ClosedSlice<T> {
    pub(crate) fn new(buffer: Vec<T>, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= buffer.len());

        Self { buffer, start, len }
    }

    /// Position of the view within the handed-off buffer.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The viewed elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer[self.range()]
    }

    /// The viewed elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let range = self.range();
        &mut self.buffer[range]
    }

    /// The whole handed-off buffer, including elements outside the view.
    #[inline]
    pub fn buffer(&self) -> &Vec<T> {
        &self.buffer
    }

    /// Splits into the handed-off buffer and the view's range within it.
    pub fn into_parts(self) -> (Vec<T>, Range<usize>) {
        let range = self.range();
        (self.buffer, range)
    }

    /// Keeps only the viewed elements, dropping the rest. The allocation is reused.
    pub fn into_vec(self) -> Vec<T> {
        let Range { start, end } = self.range();
        let mut buffer = self.buffer;

        buffer.truncate(end);
        buffer.drain(..start);

        buffer
    }
}

impl<T> Deref for ClosedSlice<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for ClosedSlice<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for ClosedSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosedSlice")
            .field("range", &self.range())
            .field("buffer_capacity", &self.buffer.capacity())
            .field("items", &self.as_slice())
            .finish()
    }
}
