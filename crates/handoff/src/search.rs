// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Linear and binary search over a builder's live elements.

use core::cmp::Ordering;

use crate::builder::Builder;
use crate::error::BuilderError;

/// Result of a binary search.
///
/// Positions are absolute indices into the builder, also when a sub-range was
/// searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// An equal element sits at this index.
    Found(usize),
    /// No equal element; inserting at `insert_at` keeps the range sorted.
    NotFound {
        /// Insertion point.
        insert_at: usize,
    },
}

impl SearchOutcome {
    /// Returns `true` for [`SearchOutcome::Found`].
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Index of the match, if any.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(*index),
            Self::NotFound { .. } => None,
        }
    }

    /// Classic signed encoding: the match index, or the bitwise complement of
    /// the insertion point (always negative).
    pub fn encoded(&self) -> isize {
        match self {
            Self::Found(index) => isize::try_from(*index).unwrap_or(isize::MAX),
            Self::NotFound { insert_at } => !isize::try_from(*insert_at).unwrap_or(isize::MAX),
        }
    }

    /// Same shape as [`slice::binary_search`]: `Ok(index)` or `Err(insert_at)`.
    #[inline]
    pub fn into_result(self) -> Result<usize, usize> {
        match self {
            Self::Found(index) => Ok(index),
            Self::NotFound { insert_at } => Err(insert_at),
        }
    }
}

impl<T> Builder<T> {
    /// Binary search over all elements, which must be sorted by [`Ord`].
    pub fn binary_search(&self, value: &T) -> Result<SearchOutcome, BuilderError>
    where
        T: Ord,
    {
        self.binary_search_by(value, T::cmp)
    }

    /// Binary search over all elements, which must be sorted by `compare`.
    pub fn binary_search_by<F>(&self, value: &T, compare: F) -> Result<SearchOutcome, BuilderError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = self.len()?;
        self.binary_search_range_by(0, len, value, compare)
    }

    /// Binary search over `[index, index + count)`, which must be sorted by
    /// `compare`. Forwards to [`slice::binary_search_by`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use handoff::{Builder, SearchOutcome};
    ///
    /// let builder = Builder::from_seq([9, 1, 3, 5, 7, 0]);
    ///
    /// assert_eq!(
    ///     builder.binary_search_range_by(1, 4, &5, i32::cmp),
    ///     Ok(SearchOutcome::Found(3))
    /// );
    /// let missing = builder.binary_search_range_by(1, 4, &4, i32::cmp).unwrap();
    /// assert_eq!(missing, SearchOutcome::NotFound { insert_at: 3 });
    /// assert_eq!(missing.encoded(), !3);
    /// ```
    pub fn binary_search_range_by<F>(
        &self,
        index: usize,
        count: usize,
        value: &T,
        mut compare: F,
    ) -> Result<SearchOutcome, BuilderError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let items = self.open_items()?;
        let end = checked_end(index, count, items.len())?;

        let outcome = match items[index..end].binary_search_by(|probe| compare(probe, value)) {
            Ok(found) => SearchOutcome::Found(index + found),
            Err(insert_at) => SearchOutcome::NotFound {
                insert_at: index + insert_at,
            },
        };

        Ok(outcome)
    }

    /// Index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Result<Option<usize>, BuilderError>
    where
        T: PartialEq,
    {
        let len = self.len()?;
        self.index_of_range(value, 0, len)
    }

    /// Index of the first element equal to `value` at or after `start`.
    pub fn index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>, BuilderError>
    where
        T: PartialEq,
    {
        let len = self.len()?;

        if start > len {
            return Err(BuilderError::index_out_of_range(start, len));
        }

        self.index_of_range(value, start, len - start)
    }

    /// Index of the first element equal to `value` within `[start, start + count)`.
    pub fn index_of_range(
        &self,
        value: &T,
        start: usize,
        count: usize,
    ) -> Result<Option<usize>, BuilderError>
    where
        T: PartialEq,
    {
        let items = self.open_items()?;

        if start > items.len() {
            return Err(BuilderError::index_out_of_range(start, items.len()));
        }

        let end = checked_end(start, count, items.len())?;

        Ok(items[start..end]
            .iter()
            .position(|item| item == value)
            .map(|found| start + found))
    }

    /// Index of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Result<Option<usize>, BuilderError>
    where
        T: PartialEq,
    {
        match self.len()? {
            0 => Ok(None),
            len => self.last_index_of_range(value, len - 1, len),
        }
    }

    /// Index of the last element equal to `value` at or before `start`.
    pub fn last_index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>, BuilderError>
    where
        T: PartialEq,
    {
        self.last_index_of_range(value, start, start.saturating_add(1))
    }

    /// Searches backwards from `start` over `count` elements, i.e. the range
    /// `[start + 1 - count, start]`.
    ///
    /// An empty builder always yields `None`.
    pub fn last_index_of_range(
        &self,
        value: &T,
        start: usize,
        count: usize,
    ) -> Result<Option<usize>, BuilderError>
    where
        T: PartialEq,
    {
        let items = self.open_items()?;

        if items.is_empty() {
            return Ok(None);
        }

        if start >= items.len() {
            return Err(BuilderError::index_out_of_range(start, items.len()));
        }

        if count > start + 1 {
            return Err(BuilderError::invalid_argument(
                "backward range extends before the first element",
            ));
        }

        if count == 0 {
            return Ok(None);
        }

        let first = start + 1 - count;

        Ok(items[first..=start]
            .iter()
            .rposition(|item| item == value)
            .map(|found| first + found))
    }
}

fn checked_end(index: usize, count: usize, len: usize) -> Result<usize, BuilderError> {
    index
        .checked_add(count)
        .filter(|end| *end <= len)
        .ok_or(BuilderError::invalid_argument(
            "range exceeds the builder length",
        ))
}
