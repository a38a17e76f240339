// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for handoff.
use thiserror::Error;

/// Errors that can occur when working with a [`Builder`](crate::Builder).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// The buffer has already been handed off by a close operation.
    #[error("builder is closed: its buffer has already been handed off")]
    Closed,

    /// The builder was torn down with `dispose()`.
    #[error("builder is disposed")]
    Disposed,

    /// An argument combination does not describe a valid capacity or range.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// An index fell outside the logical bounds of the builder.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The logical length at the time of the call.
        len: usize,
    },

    /// A required source sequence was absent.
    #[error("required input sequence is absent")]
    NullInput,

    /// The builder was structurally modified while a cursor was walking it.
    #[error("builder was modified during iteration")]
    ConcurrentModification,

    /// An untyped value does not match the element type.
    #[error("type mismatch: expected {expected}")]
    TypeMismatch {
        /// Name of the expected element type.
        expected: &'static str,
    },
}

impl BuilderError {
    /// Returns `true` for the two invalid-state flavours (`Closed` and `Disposed`).
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::Closed | Self::Disposed)
    }

    pub(crate) fn invalid_argument(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }

    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
