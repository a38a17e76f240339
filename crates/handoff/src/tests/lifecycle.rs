// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! State machine: Open -> Closed, Open/Closed -> Disposed.

use std::cell::Cell;
use std::rc::Rc;

use crate::tests::utils::probes;
use crate::{Builder, BuilderError};

/// Runs every gated operation and asserts each one fails with `expected`.
fn assert_all_gated(builder: &mut Builder<i32>, expected: BuilderError) {
    let mut dest = [0; 4];

    assert_eq!(builder.len(), Err(expected));
    assert_eq!(builder.is_empty(), Err(expected));
    assert_eq!(builder.capacity(), Err(expected));
    assert_eq!(builder.version(), Err(expected));
    assert_eq!(builder.get(0), Err(expected));
    assert_eq!(builder.set(0, 1), Err(expected));
    assert_eq!(builder.as_slice(), Err(expected));
    assert_eq!(builder.to_vec(), Err(expected));
    assert_eq!(builder.contains(&1), Err(expected));
    assert_eq!(builder.position(|_| true), Err(expected));
    assert_eq!(builder.copy_to(&mut dest, 0), Err(expected));
    assert!(matches!(builder.iter(), Err(e) if e == expected));
    assert!(matches!(builder.cursor(), Err(e) if e == expected));
    assert_eq!(builder.push(1), Err(expected));
    assert_eq!(builder.extend([1, 2]), Err(expected));
    assert_eq!(builder.extend_from_slice(&[1]), Err(expected));
    assert_eq!(builder.append_self(), Err(expected));
    assert_eq!(builder.insert(0, 1), Err(expected));
    assert_eq!(builder.insert_range(0, [1]), Err(expected));
    assert_eq!(builder.insert_self_at(0), Err(expected));
    assert_eq!(builder.remove_at(0), Err(expected));
    assert_eq!(builder.remove_range(0, 0), Err(expected));
    assert_eq!(builder.remove(&1), Err(expected));
    assert_eq!(builder.clear(), Err(expected));
    assert_eq!(builder.set_capacity(8), Err(expected));
    assert_eq!(builder.ensure_capacity(8), Err(expected));
    assert_eq!(builder.trim_excess(), Err(expected));
    assert_eq!(builder.binary_search(&1), Err(expected));
    assert_eq!(builder.index_of(&1), Err(expected));
    assert_eq!(builder.last_index_of(&1), Err(expected));
    assert_eq!(builder.close(), Err(expected));
    assert!(matches!(builder.close_slice(), Err(e) if e == expected));
    assert!(matches!(builder.close_slice_range(0, 0), Err(e) if e == expected));
    assert_eq!(builder.close_trimmed(), Err(expected));
}

// =============================================================================
// close()
// =============================================================================

#[test]
fn test_close_returns_untrimmed_buffer() {
    let mut builder = Builder::new();
    for value in ["a", "b", "c"] {
        builder.push(value).expect("Failed to push()");
    }

    let buffer = builder.close().expect("Failed to close()");

    assert_eq!(buffer, ["a", "b", "c"]);
    assert_eq!(buffer.capacity(), 4);
    assert_eq!(builder.is_closed(), Ok(true));
}

#[test]
fn test_close_hands_off_same_allocation() {
    let mut builder = Builder::with_capacity(8);
    builder.extend([1u64, 2, 3]).expect("Failed to extend()");
    let ptr = builder.as_slice().expect("Failed to as_slice()").as_ptr();

    let buffer = builder.close().expect("Failed to close()");

    assert_eq!(buffer.as_ptr(), ptr);
}

#[test]
fn test_close_twice_fails() {
    let mut builder = Builder::from_seq([1]);

    builder.close().expect("Failed to close()");

    assert_eq!(builder.close(), Err(BuilderError::Closed));
}

#[test]
fn test_operations_after_close_fail_closed() {
    let mut builder = Builder::from_seq([1, 2, 3]);
    builder.close().expect("Failed to close()");

    assert_all_gated(&mut builder, BuilderError::Closed);
    assert_eq!(builder.is_closed(), Ok(true));
}

// =============================================================================
// close_slice(), close_slice_range()
// =============================================================================

#[test]
fn test_close_slice_defaults_to_everything() {
    let mut builder = Builder::from_seq([1, 2, 3]);

    let view = builder.close_slice().expect("Failed to close_slice()");

    assert_eq!(&*view, &[1, 2, 3]);
    assert_eq!(builder.is_closed(), Ok(true));
}

#[test]
fn test_close_slice_range_bounds_view() {
    let mut builder = Builder::from_seq([1, 2, 3, 4, 5]);

    let view = builder
        .close_slice_range(1, 3)
        .expect("Failed to close_slice_range()");

    assert_eq!(&*view, &[2, 3, 4]);
    assert_eq!(view.len(), 3);
}

#[test]
fn test_close_slice_range_too_long_leaves_builder_open() {
    let mut builder = Builder::from_seq([1, 2, 3]);

    let result = builder.close_slice_range(1, 3);

    assert!(matches!(result, Err(BuilderError::InvalidArgument { .. })));
    assert_eq!(builder.is_closed(), Ok(false));
    assert_eq!(builder.as_slice(), Ok(&[1, 2, 3][..]));
}

#[test]
fn test_close_slice_range_start_past_end_leaves_builder_open() {
    let mut builder = Builder::from_seq([1, 2, 3]);

    let result = builder.close_slice_range(4, 0);

    assert!(matches!(result, Err(BuilderError::InvalidArgument { .. })));
    assert_eq!(builder.is_closed(), Ok(false));
}

#[test]
fn test_close_slice_range_empty_at_end() {
    let mut builder = Builder::from_seq([1, 2, 3]);

    let view = builder
        .close_slice_range(3, 0)
        .expect("Failed to close_slice_range()");

    assert!(view.is_empty());
    assert_eq!(builder.is_closed(), Ok(true));
}

// =============================================================================
// close_trimmed()
// =============================================================================

#[test]
fn test_close_trimmed_full_buffer_behaves_like_close() {
    let mut builder = Builder::with_capacity(4);
    builder.extend([1, 2, 3, 4]).expect("Failed to extend()");
    let ptr = builder.as_slice().expect("Failed to as_slice()").as_ptr();

    let buffer = builder.close_trimmed().expect("Failed to close_trimmed()");

    assert_eq!(buffer, [1, 2, 3, 4]);
    assert_eq!(buffer.capacity(), 4);
    assert_eq!(buffer.as_ptr(), ptr);
}

#[test]
fn test_close_trimmed_sparse_buffer_is_exact() {
    let mut builder = Builder::with_capacity(16);
    builder.extend([1, 2, 3]).expect("Failed to extend()");

    let buffer = builder.close_trimmed().expect("Failed to close_trimmed()");

    assert_eq!(buffer, [1, 2, 3]);
    assert_eq!(buffer.capacity(), 3);
    assert_eq!(builder.is_closed(), Ok(true));
}

#[test]
fn test_close_trimmed_empty() {
    let mut builder: Builder<u8> = Builder::with_capacity(16);

    let buffer = builder.close_trimmed().expect("Failed to close_trimmed()");

    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn test_close_trimmed_moves_without_dropping() {
    let drops = Rc::new(Cell::new(0));
    let mut builder = Builder::with_capacity(8);
    builder
        .extend(probes(&[1, 2, 3], &drops))
        .expect("Failed to extend()");

    let buffer = builder.close_trimmed().expect("Failed to close_trimmed()");

    assert_eq!(drops.get(), 0);
    drop(buffer);
    assert_eq!(drops.get(), 3);
}

// =============================================================================
// dispose()
// =============================================================================

#[test]
fn test_dispose_from_open() {
    let drops = Rc::new(Cell::new(0));
    let mut builder = Builder::from_seq(probes(&[1, 2], &drops));

    builder.dispose();

    assert_eq!(drops.get(), 2);
    assert_eq!(builder.is_closed(), Err(BuilderError::Disposed));
}

#[test]
fn test_dispose_is_idempotent() {
    let mut builder = Builder::from_seq([1, 2]);

    builder.dispose();
    builder.dispose();
    builder.dispose();

    assert_all_gated(&mut builder, BuilderError::Disposed);
}

#[test]
fn test_dispose_after_close_keeps_handed_off_buffer() {
    let drops = Rc::new(Cell::new(0));
    let mut builder = Builder::from_seq(probes(&[1, 2], &drops));

    let buffer = builder.close().expect("Failed to close()");
    builder.dispose();

    assert_eq!(drops.get(), 0);
    assert_eq!(buffer.len(), 2);
    assert_eq!(builder.is_closed(), Err(BuilderError::Disposed));
}

#[test]
fn test_disposed_never_reopens_or_closes() {
    let mut builder = Builder::from_seq([1]);
    builder.dispose();

    assert_eq!(builder.close(), Err(BuilderError::Disposed));
    assert_eq!(builder.close_trimmed(), Err(BuilderError::Disposed));
    // Still disposed, not closed, after the failed attempts.
    assert_eq!(builder.is_closed(), Err(BuilderError::Disposed));
}

#[test]
fn test_error_state_flavours() {
    assert!(BuilderError::Closed.is_invalid_state());
    assert!(BuilderError::Disposed.is_invalid_state());
    assert!(!BuilderError::NullInput.is_invalid_state());
    assert_ne!(
        BuilderError::Closed.to_string(),
        BuilderError::Disposed.to_string()
    );
}
