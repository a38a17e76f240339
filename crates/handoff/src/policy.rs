// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growth and trim policy for the backing buffer.

use crate::error::BuilderError;

/// Capacity used for the first growth of an empty buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// Largest capacity the doubling policy will pick on its own.
///
/// Explicit requests above this value are still honoured; the allocator decides.
pub const DEFAULT_MAX_CAPACITY: usize = 0x7FEF_FFFF;

/// `trim_excess()` only reallocates while `len` is below this percentage of capacity.
pub const DEFAULT_TRIM_THRESHOLD_PERCENT: u8 = 90;

/// Controls how a [`Builder`](crate::Builder) grows and trims its buffer.
///
/// # Example
///
/// ```rust
/// use handoff::{Builder, BuilderError, GrowthPolicy};
///
/// fn example() -> Result<(), BuilderError> {
///     let policy = GrowthPolicy::new(16, 1 << 20, 75)?;
///     let mut builder = Builder::with_policy(policy);
///
///     builder.push(1u32)?;
///     assert_eq!(builder.capacity()?, 16);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    initial_capacity: usize,
    max_capacity: usize,
    trim_threshold_percent: u8,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
            trim_threshold_percent: DEFAULT_TRIM_THRESHOLD_PERCENT,
        }
    }
}

impl GrowthPolicy {
    /// Creates a validated policy.
    ///
    /// Fails with [`BuilderError::InvalidArgument`] when `initial_capacity` is zero,
    /// when `max_capacity < initial_capacity`, or when `trim_threshold_percent` is
    /// outside `1..=100`.
    pub fn new(
        initial_capacity: usize,
        max_capacity: usize,
        trim_threshold_percent: u8,
    ) -> Result<Self, BuilderError> {
        if initial_capacity == 0 {
            return Err(BuilderError::invalid_argument(
                "initial capacity must be non-zero",
            ));
        }

        if max_capacity < initial_capacity {
            return Err(BuilderError::invalid_argument(
                "max capacity must not be below initial capacity",
            ));
        }

        if !(1..=100).contains(&trim_threshold_percent) {
            return Err(BuilderError::invalid_argument(
                "trim threshold must be within 1..=100 percent",
            ));
        }

        Ok(Self {
            initial_capacity,
            max_capacity,
            trim_threshold_percent,
        })
    }

    /// Capacity picked for the first growth of an empty buffer.
    #[inline]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Upper bound the doubling step is clamped to.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Occupancy percentage below which `trim_excess()` shrinks the buffer.
    #[inline]
    pub fn trim_threshold_percent(&self) -> u8 {
        self.trim_threshold_percent
    }

    /// Returns the capacity to grow to when `needed` slots are required and
    /// `current` are available.
    ///
    /// Doubling (or the initial capacity for an empty buffer) is clamped to
    /// `max_capacity`, but never below `needed`.
    pub fn grown_capacity(&self, current: usize, needed: usize) -> usize {
        let doubled = if current == 0 {
            self.initial_capacity
        } else {
            current.saturating_mul(2)
        };

        doubled.min(self.max_capacity).max(needed)
    }

    /// Returns `true` if a buffer holding `len` of `capacity` slots is sparse
    /// enough to be trimmed.
    pub fn should_trim(&self, len: usize, capacity: usize) -> bool {
        (len as u128) * 100 < (capacity as u128) * u128::from(self.trim_threshold_percent)
    }
}
