// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::builder::Builder;
use crate::error::BuilderError;

/// A forward-only, version-stamped walk over a [`Builder`].
///
/// The cursor does not borrow the builder between steps, so the builder may be
/// mutated while a walk is in progress. Each step re-checks that the builder is
/// still open and that its mutation counter matches the one captured when the
/// cursor was created; any structural change makes the next step fail with
/// [`BuilderError::ConcurrentModification`].
///
/// A cursor is single-pass. Call [`Builder::cursor`] again to restart.
///
/// # Example
///
/// ```rust
/// use handoff::{Builder, BuilderError};
///
/// let mut builder = Builder::from_seq([1, 2, 3]);
/// let mut cursor = builder.cursor().unwrap();
///
/// assert_eq!(cursor.next(&builder), Ok(Some(&1)));
/// builder.push(4).unwrap();
/// assert_eq!(cursor.next(&builder), Err(BuilderError::ConcurrentModification));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    version: u64,
    position: usize,
}

impl Cursor {
    pub(crate) fn new(version: u64) -> Self {
        Self {
            version,
            position: 0,
        }
    }

    /// Advances the cursor, returning the next element or `None` at the end.
    pub fn next<'a, T>(&mut self, builder: &'a Builder<T>) -> Result<Option<&'a T>, BuilderError> {
        let items = builder.open_items()?;

        if builder.stamp() != self.version {
            return Err(BuilderError::ConcurrentModification);
        }

        let item = items.get(self.position);
        if item.is_some() {
            self.position += 1;
        }

        Ok(item)
    }

    /// Number of elements yielded so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}
