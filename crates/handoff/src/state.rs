// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Lifecycle state of a builder and the gate every operation passes through.
//!
//! The buffer lives inside [`BuilderState::Open`], so leaving `Open` drops or
//! moves it out structurally: a closed or disposed builder cannot reach storage
//! it no longer owns.

use alloc::vec::Vec;

use crate::error::BuilderError;

pub(crate) enum BuilderState<T> {
    Open(Vec<T>),
    Closed,
    Disposed,
}

impl<T> BuilderState<T> {
    /// Shared access to the buffer, or the invalid-state error for the current state.
    #[inline(always)]
    pub(crate) fn open(&self) -> Result<&Vec<T>, BuilderError> {
        match self {
            Self::Open(buffer) => Ok(buffer),
            Self::Closed => Err(BuilderError::Closed),
            Self::Disposed => Err(BuilderError::Disposed),
        }
    }

    /// Exclusive access to the buffer, or the invalid-state error for the current state.
    #[inline(always)]
    pub(crate) fn open_mut(&mut self) -> Result<&mut Vec<T>, BuilderError> {
        match self {
            Self::Open(buffer) => Ok(buffer),
            Self::Closed => Err(BuilderError::Closed),
            Self::Disposed => Err(BuilderError::Disposed),
        }
    }

    /// Open -> Closed, moving the buffer out to the caller.
    pub(crate) fn close(&mut self) -> Result<Vec<T>, BuilderError> {
        match core::mem::replace(self, Self::Closed) {
            Self::Open(buffer) => Ok(buffer),
            Self::Closed => Err(BuilderError::Closed),
            Self::Disposed => {
                // Disposed is absorbing.
                *self = Self::Disposed;
                Err(BuilderError::Disposed)
            }
        }
    }

    /// Any -> Disposed. Drops the buffer if one is still held.
    pub(crate) fn dispose(&mut self) {
        *self = Self::Disposed;
    }

    pub(crate) fn is_closed(&self) -> Result<bool, BuilderError> {
        match self {
            Self::Open(_) => Ok(false),
            Self::Closed => Ok(true),
            Self::Disposed => Err(BuilderError::Disposed),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Closed => "closed",
            Self::Disposed => "disposed",
        }
    }
}
