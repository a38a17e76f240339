// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable builder that hands its backing buffer to the caller exactly once.
//!
//! [`Builder<T>`] is a list with amortized O(1) append and the usual
//! index-based mutation. Its distinguishing feature is the close family of
//! operations, which move the backing buffer out to the caller without copying
//! and leave the builder permanently inert.
//!
//! # Lifecycle
//!
//! ```text
//!            close / close_slice / close_trimmed
//!   Open ─────────────────────────────────────────▶ Closed
//!     │                                               │
//!     │ dispose                               dispose │
//!     ▼                                               ▼
//!   Disposed ◀────────────────────────────────────────┘
//! ```
//!
//! - **Open**: every operation is available.
//! - **Closed**: the buffer belongs to the caller. Everything fails with
//!   [`BuilderError::Closed`] except [`Builder::dispose`] and
//!   [`Builder::is_closed`].
//! - **Disposed**: absorbing. Everything fails with [`BuilderError::Disposed`],
//!   including `is_closed()`; `dispose()` stays a no-op.
//!
//! # Example: Building and Handing Off
//!
//! ```rust
//! use handoff::{Builder, BuilderError};
//!
//! fn example() -> Result<(), BuilderError> {
//!     let mut builder = Builder::from_seq([1, 2, 3, 4, 5]);
//!     builder.remove_range(1, 2)?;
//!     assert_eq!(builder.as_slice()?, [1, 4, 5]);
//!
//!     let exact = builder.close_trimmed()?;
//!     assert_eq!(exact, [1, 4, 5]);
//!     assert_eq!(exact.capacity(), 3);
//!
//!     assert_eq!(builder.close(), Err(BuilderError::Closed));
//!     builder.dispose();
//!     builder.dispose();
//!     assert_eq!(builder.is_closed(), Err(BuilderError::Disposed));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Detecting Mutation During Iteration
//!
//! ```rust
//! use handoff::{Builder, BuilderError};
//!
//! let mut builder = Builder::from_seq(["x", "y"]);
//! let mut cursor = builder.cursor().unwrap();
//!
//! assert_eq!(cursor.next(&builder), Ok(Some(&"x")));
//! builder.set(1, "z").unwrap();
//! assert_eq!(cursor.next(&builder), Err(BuilderError::ConcurrentModification));
//! ```
//!
//! # Features
//!
//! - `untyped` (default): the [`UntypedList`] adapter over `dyn Any` values.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod builder;
mod closed_slice;
mod cursor;
mod error;
mod policy;
mod search;
mod state;

#[cfg(feature = "untyped")]
mod untyped;

pub use builder::Builder;
pub use closed_slice::ClosedSlice;
pub use cursor::Cursor;
pub use error::BuilderError;
pub use policy::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY, DEFAULT_TRIM_THRESHOLD_PERCENT, GrowthPolicy,
};
pub use search::SearchOutcome;

#[cfg(feature = "untyped")]
pub use untyped::UntypedList;
