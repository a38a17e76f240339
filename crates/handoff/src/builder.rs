// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::fmt;

use crate::closed_slice::ClosedSlice;
use crate::cursor::Cursor;
use crate::error::BuilderError;
use crate::policy::GrowthPolicy;
use crate::state::BuilderState;

/// A growable, indexable sequence whose backing buffer is handed to the caller
/// exactly once.
///
/// A `Builder` starts `Open` and supports list-style mutation. One of the close
/// operations ([`close`](Builder::close), [`close_slice`](Builder::close_slice),
/// [`close_trimmed`](Builder::close_trimmed)) moves the buffer out and leaves the
/// builder `Closed`; [`dispose`](Builder::dispose) drops the buffer and leaves it
/// `Disposed`. Every other operation fails once the builder is no longer open.
///
/// # Growth
///
/// When an append needs one more slot than available the capacity doubles
/// (starting at 4), clamped to the policy maximum but never below what the
/// operation needs. See [`GrowthPolicy`].
///
/// # Example
///
/// ```rust
/// use handoff::{Builder, BuilderError};
///
/// fn example() -> Result<(), BuilderError> {
///     let mut builder = Builder::new();
///     builder.push("a")?;
///     builder.push("b")?;
///     builder.push("c")?;
///     assert_eq!(builder.capacity()?, 4);
///
///     let buffer = builder.close()?;
///     assert_eq!(buffer, ["a", "b", "c"]);
///     assert_eq!(buffer.capacity(), 4);
///
///     // The builder is inert from now on.
///     assert_eq!(builder.len(), Err(BuilderError::Closed));
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct Builder<T> {
    state: BuilderState<T>,
    version: u64,
    policy: GrowthPolicy,
}

/// Reallocates `buffer` to exactly `capacity` slots. Caller guarantees `capacity >= len`.
#[cold]
#[inline(never)]
fn realloc_exact<T>(buffer: &mut Vec<T>, capacity: usize) {
    let old_capacity = buffer.capacity();
    debug_assert!(capacity >= buffer.len());

    if capacity == old_capacity {
        return;
    }

    if capacity == 0 {
        // Empty sentinel: no allocation.
        *buffer = Vec::new();
    } else if capacity > old_capacity {
        buffer.reserve_exact(capacity - buffer.len());
    } else {
        buffer.shrink_to(capacity);
    }

    tracing::trace!(
        old_capacity,
        new_capacity = buffer.capacity(),
        len = buffer.len(),
        "builder buffer reallocated"
    );
}

#[inline(always)]
fn maybe_grow_to<T>(buffer: &mut Vec<T>, policy: &GrowthPolicy, needed: usize) {
    if buffer.capacity() >= needed {
        return;
    }

    let capacity = policy.grown_capacity(buffer.capacity(), needed);
    realloc_exact(buffer, capacity);
}

/// Appends `items`, returning whether length or capacity changed.
fn append_iter<T, I>(buffer: &mut Vec<T>, policy: &GrowthPolicy, items: I) -> bool
where
    I: Iterator<Item = T>,
{
    let shape = (buffer.len(), buffer.capacity());
    let (lower, _) = items.size_hint();
    let needed = buffer.len().saturating_add(lower);
    maybe_grow_to(buffer, policy, needed);

    for item in items {
        let needed = buffer.len() + 1;
        maybe_grow_to(buffer, policy, needed);
        buffer.push(item);
    }

    shape != (buffer.len(), buffer.capacity())
}

impl<T> Builder<T> {
    /// Creates an open builder with zero capacity. Does not allocate.
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Creates an open builder with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(Vec::with_capacity(capacity), GrowthPolicy::default())
    }

    /// Creates an open, empty builder that grows according to `policy`.
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self::from_parts(Vec::new(), policy)
    }

    /// Creates an open builder seeded with every element of `items`, in order.
    ///
    /// A source of known length is seeded into exactly that many slots. Sources
    /// of unknown length grow by the default policy.
    pub fn from_seq<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let policy = GrowthPolicy::default();
        let items = items.into_iter();
        let mut buffer = match items.size_hint() {
            (lower, Some(upper)) if lower == upper => Vec::with_capacity(lower),
            _ => Vec::new(),
        };
        append_iter(&mut buffer, &policy, items);

        Self::from_parts(buffer, policy)
    }

    /// Like [`from_seq`](Builder::from_seq), but fails with
    /// [`BuilderError::NullInput`] when no source is supplied.
    pub fn try_from_seq<I>(items: Option<I>) -> Result<Self, BuilderError>
    where
        I: IntoIterator<Item = T>,
    {
        items.map(Self::from_seq).ok_or(BuilderError::NullInput)
    }

    /// Creates an open builder holding clones of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_parts(items.to_vec(), GrowthPolicy::default())
    }

    fn from_parts(buffer: Vec<T>, policy: GrowthPolicy) -> Self {
        Self {
            state: BuilderState::Open(buffer),
            version: 0,
            policy,
        }
    }

    #[inline(always)]
    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    #[inline(always)]
    pub(crate) fn open_items(&self) -> Result<&[T], BuilderError> {
        self.state.open().map(Vec::as_slice)
    }

    #[inline(always)]
    pub(crate) fn stamp(&self) -> u64 {
        self.version
    }

    /// The growth policy this builder was created with.
    #[inline]
    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    // =========================================================================
    // Size and capacity
    // =========================================================================

    /// Returns the number of elements in the builder.
    #[inline]
    pub fn len(&self) -> Result<usize, BuilderError> {
        Ok(self.state.open()?.len())
    }

    /// Returns `true` if the builder holds no elements.
    #[inline]
    pub fn is_empty(&self) -> Result<bool, BuilderError> {
        Ok(self.state.open()?.is_empty())
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    pub fn capacity(&self) -> Result<usize, BuilderError> {
        Ok(self.state.open()?.capacity())
    }

    /// Returns the mutation counter.
    #[inline]
    pub fn version(&self) -> Result<u64, BuilderError> {
        self.state.open()?;
        Ok(self.version)
    }

    /// Reallocates the buffer to exactly `capacity` slots.
    ///
    /// A capacity of zero releases the buffer without allocating a new one.
    /// Fails with [`BuilderError::InvalidArgument`] if `capacity` is below the
    /// current length.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), BuilderError> {
        let buffer = self.state.open_mut()?;

        if capacity < buffer.len() {
            return Err(BuilderError::invalid_argument(
                "capacity is below the current length",
            ));
        }

        if capacity != buffer.capacity() {
            realloc_exact(buffer, capacity);
            self.bump();
        }

        Ok(())
    }

    /// Grows the buffer with the doubling policy until it holds at least
    /// `min_capacity` slots. Returns the resulting capacity.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<usize, BuilderError> {
        let policy = self.policy;
        let buffer = self.state.open_mut()?;
        let before = buffer.capacity();

        maybe_grow_to(buffer, &policy, min_capacity);
        let after = buffer.capacity();

        if after != before {
            self.bump();
        }

        Ok(after)
    }

    /// Shrinks the buffer to exactly `len` slots when occupancy is below the
    /// policy threshold (90% by default). Near the threshold nothing happens.
    pub fn trim_excess(&mut self) -> Result<(), BuilderError> {
        let buffer = self.state.open()?;

        if self.policy.should_trim(buffer.len(), buffer.capacity()) {
            let len = buffer.len();
            self.set_capacity(len)?;
        }

        Ok(())
    }

    // =========================================================================
    // Element access
    // =========================================================================

    /// Returns a reference to the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, BuilderError> {
        let buffer = self.state.open()?;

        buffer
            .get(index)
            .ok_or_else(|| BuilderError::index_out_of_range(index, buffer.len()))
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Counts as a mutation: in-flight cursors are invalidated.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, BuilderError> {
        let buffer = self.state.open_mut()?;
        let len = buffer.len();
        let slot = buffer
            .get_mut(index)
            .ok_or_else(|| BuilderError::index_out_of_range(index, len))?;

        let old = core::mem::replace(slot, value);
        self.bump();

        Ok(old)
    }

    /// Returns the live elements as a slice.
    pub fn as_slice(&self) -> Result<&[T], BuilderError> {
        self.open_items()
    }

    /// Returns a snapshot of the live elements.
    pub fn to_vec(&self) -> Result<Vec<T>, BuilderError>
    where
        T: Clone,
    {
        Ok(self.open_items()?.to_vec())
    }

    /// Returns `true` if an element equal to `value` is present.
    pub fn contains(&self, value: &T) -> Result<bool, BuilderError>
    where
        T: PartialEq,
    {
        Ok(self.open_items()?.contains(value))
    }

    /// Returns the index of the first element matching `predicate`.
    pub fn position<F>(&self, predicate: F) -> Result<Option<usize>, BuilderError>
    where
        F: FnMut(&T) -> bool,
    {
        Ok(self.open_items()?.iter().position(predicate))
    }

    /// Clones every element into `dest`, starting at `dest_index`.
    pub fn copy_to(&self, dest: &mut [T], dest_index: usize) -> Result<(), BuilderError>
    where
        T: Clone,
    {
        let len = self.len()?;
        self.copy_range_to(0, dest, dest_index, len)
    }

    /// Clones `count` elements starting at `index` into `dest[dest_index..]`.
    pub fn copy_range_to(
        &self,
        index: usize,
        dest: &mut [T],
        dest_index: usize,
        count: usize,
    ) -> Result<(), BuilderError>
    where
        T: Clone,
    {
        let items = self.open_items()?;

        let end = index
            .checked_add(count)
            .filter(|end| *end <= items.len())
            .ok_or(BuilderError::invalid_argument(
                "source range exceeds the builder length",
            ))?;

        let dest_end = dest_index
            .checked_add(count)
            .filter(|end| *end <= dest.len())
            .ok_or(BuilderError::invalid_argument(
                "destination is too small for the copied range",
            ))?;

        dest[dest_index..dest_end].clone_from_slice(&items[index..end]);

        Ok(())
    }

    /// Borrowing iterator over the live elements.
    ///
    /// The state is checked once here; the borrow then rules out mutation for
    /// the iterator's lifetime. Use [`cursor`](Builder::cursor) for a detached,
    /// version-checked walk.
    pub fn iter(&self) -> Result<core::slice::Iter<'_, T>, BuilderError> {
        Ok(self.open_items()?.iter())
    }

    /// Starts a new version-stamped cursor at the first element.
    pub fn cursor(&self) -> Result<Cursor, BuilderError> {
        self.state.open()?;
        Ok(Cursor::new(self.version))
    }

    // =========================================================================
    // Appending and inserting
    // =========================================================================

    /// Appends `value`, growing the buffer if it is full.
    pub fn push(&mut self, value: T) -> Result<(), BuilderError> {
        let policy = self.policy;
        let buffer = self.state.open_mut()?;

        let needed = buffer.len() + 1;
        maybe_grow_to(buffer, &policy, needed);
        buffer.push(value);
        self.bump();

        Ok(())
    }

    /// Appends every element of `items`, in order.
    pub fn extend<I>(&mut self, items: I) -> Result<(), BuilderError>
    where
        I: IntoIterator<Item = T>,
    {
        let policy = self.policy;
        let buffer = self.state.open_mut()?;

        if append_iter(buffer, &policy, items.into_iter()) {
            self.bump();
        }

        Ok(())
    }

    /// Appends clones of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), BuilderError>
    where
        T: Clone,
    {
        let policy = self.policy;
        let buffer = self.state.open_mut()?;

        if items.is_empty() {
            return Ok(());
        }

        let needed = buffer.len() + items.len();
        maybe_grow_to(buffer, &policy, needed);
        buffer.extend_from_slice(items);
        self.bump();

        Ok(())
    }

    /// Appends a copy of the builder's own contents: `[a, b]` becomes `[a, b, a, b]`.
    pub fn append_self(&mut self) -> Result<(), BuilderError>
    where
        T: Clone,
    {
        let len = self.len()?;
        self.insert_self_at(len)
    }

    /// Inserts `value` at `index`, shifting the tail right by one.
    ///
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), BuilderError> {
        let policy = self.policy;
        let buffer = self.state.open_mut()?;
        let len = buffer.len();

        if index > len {
            return Err(BuilderError::index_out_of_range(index, len));
        }

        maybe_grow_to(buffer, &policy, len + 1);
        buffer.insert(index, value);
        self.bump();

        Ok(())
    }

    /// Inserts every element of `items` at `index`, shifting the tail right by
    /// the number of inserted elements.
    pub fn insert_range<I>(&mut self, index: usize, items: I) -> Result<(), BuilderError>
    where
        I: IntoIterator<Item = T>,
    {
        let policy = self.policy;
        let buffer = self.state.open_mut()?;
        let len = buffer.len();

        if index > len {
            return Err(BuilderError::index_out_of_range(index, len));
        }

        if append_iter(buffer, &policy, items.into_iter()) {
            let inserted = buffer.len() - len;
            buffer[index..].rotate_right(inserted);
            self.bump();
        }

        Ok(())
    }

    /// Inserts a copy of the builder's own contents at `index`.
    ///
    /// Source and destination alias the same buffer, so this is handled
    /// separately from [`insert_range`](Builder::insert_range): the original
    /// contents are first duplicated past the end (`L U` becomes `L U L' U'`,
    /// with `L = [..index]` and `U = [index..]`), then the middle block is rotated
    /// so the copied lower segment lands before the relocated upper one
    /// (`L L' U U'`). No element is overwritten before it is read.
    ///
    /// ```rust
    /// use handoff::Builder;
    ///
    /// let mut builder = Builder::from_seq(['A', 'B']);
    /// builder.insert_self_at(1).unwrap();
    /// assert_eq!(builder.as_slice().unwrap(), ['A', 'A', 'B', 'B']);
    /// ```
    pub fn insert_self_at(&mut self, index: usize) -> Result<(), BuilderError>
    where
        T: Clone,
    {
        let policy = self.policy;
        let buffer = self.state.open_mut()?;
        let len = buffer.len();

        if index > len {
            return Err(BuilderError::index_out_of_range(index, len));
        }

        if len == 0 {
            return Ok(());
        }

        maybe_grow_to(buffer, &policy, len.saturating_mul(2));
        buffer.extend_from_within(..);
        buffer[index..index + len].rotate_left(len - index);
        self.bump();

        Ok(())
    }

    // =========================================================================
    // Removing
    // =========================================================================

    /// Removes and returns the element at `index`, shifting the tail left by one.
    pub fn remove_at(&mut self, index: usize) -> Result<T, BuilderError> {
        let buffer = self.state.open_mut()?;
        let len = buffer.len();

        if index >= len {
            return Err(BuilderError::index_out_of_range(index, len));
        }

        let removed = buffer.remove(index);
        self.bump();

        Ok(removed)
    }

    /// Removes `count` elements starting at `index`. Removed elements are dropped.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), BuilderError> {
        let buffer = self.state.open_mut()?;

        let end = index
            .checked_add(count)
            .filter(|end| *end <= buffer.len())
            .ok_or(BuilderError::invalid_argument(
                "range exceeds the builder length",
            ))?;

        if count > 0 {
            buffer.drain(index..end);
            self.bump();
        }

        Ok(())
    }

    /// Removes the first element equal to `value`. Returns whether one was found.
    pub fn remove(&mut self, value: &T) -> Result<bool, BuilderError>
    where
        T: PartialEq,
    {
        let found = self.open_items()?.iter().position(|item| item == value);

        match found {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) -> Result<(), BuilderError> {
        let buffer = self.state.open_mut()?;

        if buffer.is_empty() {
            return Ok(());
        }

        buffer.clear();
        self.bump();

        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Hands the backing buffer to the caller and closes the builder.
    ///
    /// The returned `Vec` has the builder's length and its untrimmed capacity.
    /// Fails with [`BuilderError::Closed`] or [`BuilderError::Disposed`] if the
    /// builder is not open.
    pub fn close(&mut self) -> Result<Vec<T>, BuilderError> {
        let buffer = self.state.close()?;

        tracing::debug!(
            len = buffer.len(),
            capacity = buffer.capacity(),
            "builder closed"
        );

        Ok(buffer)
    }

    /// Closes the builder and returns a view over all of its elements.
    pub fn close_slice(&mut self) -> Result<ClosedSlice<T>, BuilderError> {
        let len = self.len()?;
        self.close_slice_range(0, len)
    }

    /// Closes the builder and returns a view of `count` elements starting at
    /// `index` over the handed-off buffer.
    ///
    /// The range is validated before closing: on
    /// [`BuilderError::InvalidArgument`] the builder stays open.
    pub fn close_slice_range(
        &mut self,
        index: usize,
        count: usize,
    ) -> Result<ClosedSlice<T>, BuilderError> {
        let len = self.state.open()?.len();

        if index > len || len - index < count {
            return Err(BuilderError::invalid_argument(
                "slice range exceeds the builder length",
            ));
        }

        let buffer = self.state.close()?;

        tracing::debug!(
            len,
            capacity = buffer.capacity(),
            index,
            count,
            "builder closed to slice"
        );

        Ok(ClosedSlice::new(buffer, index, count))
    }

    /// Closes the builder and returns a buffer whose capacity equals its length.
    ///
    /// When the buffer is already full it is handed off as-is, exactly like
    /// [`close`](Builder::close); otherwise the elements are moved into a new
    /// exact-size allocation.
    pub fn close_trimmed(&mut self) -> Result<Vec<T>, BuilderError> {
        let mut buffer = self.state.close()?;

        if buffer.len() != buffer.capacity() {
            let mut exact = Vec::with_capacity(buffer.len());
            exact.append(&mut buffer);
            buffer = exact;
        }

        tracing::debug!(len = buffer.len(), "builder closed trimmed");

        Ok(buffer)
    }

    /// Releases the buffer without handing it off and marks the builder disposed.
    ///
    /// Never fails and may be called any number of times from any state.
    pub fn dispose(&mut self) {
        if !matches!(self.state, BuilderState::Disposed) {
            tracing::debug!(from = self.state.name(), "builder disposed");
        }

        self.state.dispose();
    }

    /// Returns `true` once a close operation has succeeded.
    ///
    /// Fails with [`BuilderError::Disposed`] after [`dispose`](Builder::dispose).
    pub fn is_closed(&self) -> Result<bool, BuilderError> {
        self.state.is_closed()
    }
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Builder<T> {
    /// Adopts `buffer` as-is, keeping its length and capacity.
    fn from(buffer: Vec<T>) -> Self {
        Self::from_parts(buffer, GrowthPolicy::default())
    }
}

impl<T> FromIterator<T> for Builder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_seq(iter)
    }
}

impl<T: fmt::Debug> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Builder");
        debug
            .field("state", &self.state.name())
            .field("version", &self.version);

        if let BuilderState::Open(buffer) = &self.state {
            debug
                .field("len", &buffer.len())
                .field("capacity", &buffer.capacity())
                .field("items", buffer);
        }

        debug.finish()
    }
}
