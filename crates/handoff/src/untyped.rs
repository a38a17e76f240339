// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Untyped list adapter for callers that only hold `dyn Any` values.
//!
//! [`UntypedList`] is object-safe and translates each call into the typed
//! [`Builder`] API plus a runtime type check. The state gate runs first, so a
//! closed or disposed builder reports `Closed`/`Disposed` regardless of the
//! value passed; an incompatible value then fails with
//! [`BuilderError::TypeMismatch`].
//!
//! # Example
//!
//! ```rust
//! use handoff::{Builder, BuilderError, UntypedList};
//!
//! let mut builder = Builder::<u32>::new();
//! let list: &mut dyn UntypedList = &mut builder;
//!
//! assert_eq!(list.add_any(Box::new(7u32)), Ok(0));
//! assert!(matches!(
//!     list.add_any(Box::new("seven")),
//!     Err(BuilderError::TypeMismatch { .. })
//! ));
//! assert_eq!(list.get_any(0).unwrap().downcast_ref::<u32>(), Some(&7));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, type_name};

use crate::builder::Builder;
use crate::error::BuilderError;

/// Object-safe, dynamically typed view of a [`Builder`].
pub trait UntypedList {
    /// Name of the element type, as reported in [`BuilderError::TypeMismatch`].
    fn element_type_name(&self) -> &'static str;

    /// Number of elements.
    fn len_any(&self) -> Result<usize, BuilderError>;

    /// Element at `index`.
    fn get_any(&self, index: usize) -> Result<&dyn Any, BuilderError>;

    /// Replaces the element at `index`, returning the previous one.
    fn set_any(&mut self, index: usize, value: Box<dyn Any>) -> Result<Box<dyn Any>, BuilderError>;

    /// Appends `value` and returns its index.
    fn add_any(&mut self, value: Box<dyn Any>) -> Result<usize, BuilderError>;

    /// Inserts `value` at `index`.
    fn insert_any(&mut self, index: usize, value: Box<dyn Any>) -> Result<(), BuilderError>;

    /// Appends clones of every element of `items`, which must be a `Vec<T>` or
    /// `Box<[T]>`. `None` fails with [`BuilderError::NullInput`].
    fn extend_any(&mut self, items: Option<&dyn Any>) -> Result<(), BuilderError>;

    /// Returns `true` if an element equal to `value` is present.
    fn contains_any(&self, value: &dyn Any) -> Result<bool, BuilderError>;

    /// Index of the first element equal to `value`.
    fn index_of_any(&self, value: &dyn Any) -> Result<Option<usize>, BuilderError>;

    /// Removes the first element equal to `value`. Returns whether one was found.
    fn remove_any(&mut self, value: &dyn Any) -> Result<bool, BuilderError>;

    /// Removes the element at `index`.
    fn remove_at_any(&mut self, index: usize) -> Result<(), BuilderError>;

    /// Drops every element.
    fn clear_any(&mut self) -> Result<(), BuilderError>;

    /// Clones every element into `dest` (a `Vec<T>` or `Box<[T]>`) starting at
    /// `dest_index`.
    fn copy_to_any(&self, dest: &mut dyn Any, dest_index: usize) -> Result<(), BuilderError>;

    /// Iterates the elements as `&dyn Any`.
    fn iter_any(&self) -> Result<Box<dyn Iterator<Item = &dyn Any> + '_>, BuilderError>;
}

fn mismatch<E>() -> BuilderError {
    BuilderError::TypeMismatch {
        expected: type_name::<E>(),
    }
}

fn downcast_value<T: Any>(value: Box<dyn Any>) -> Result<T, BuilderError> {
    value
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| mismatch::<T>())
}

fn downcast_ref<T: Any>(value: &dyn Any) -> Result<&T, BuilderError> {
    value.downcast_ref::<T>().ok_or_else(mismatch::<T>)
}

fn as_slice_of<T: Any>(items: &dyn Any) -> Result<&[T], BuilderError> {
    if let Some(items) = items.downcast_ref::<Vec<T>>() {
        return Ok(items);
    }

    items
        .downcast_ref::<Box<[T]>>()
        .map(|items| &**items)
        .ok_or_else(mismatch::<Vec<T>>)
}

fn as_mut_slice_of<T: Any>(items: &mut dyn Any) -> Result<&mut [T], BuilderError> {
    if items.is::<Vec<T>>() {
        return items
            .downcast_mut::<Vec<T>>()
            .map(Vec::as_mut_slice)
            .ok_or_else(mismatch::<Vec<T>>);
    }

    items
        .downcast_mut::<Box<[T]>>()
        .map(|items| &mut **items)
        .ok_or_else(mismatch::<Vec<T>>)
}

impl<T> UntypedList for Builder<T>
where
    T: Any + Clone + PartialEq,
{
    fn element_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn len_any(&self) -> Result<usize, BuilderError> {
        self.len()
    }

    fn get_any(&self, index: usize) -> Result<&dyn Any, BuilderError> {
        self.get(index).map(|item| item as &dyn Any)
    }

    fn set_any(&mut self, index: usize, value: Box<dyn Any>) -> Result<Box<dyn Any>, BuilderError> {
        self.len()?;
        let value = downcast_value::<T>(value)?;
        let old = self.set(index, value)?;

        Ok(Box::new(old))
    }

    fn add_any(&mut self, value: Box<dyn Any>) -> Result<usize, BuilderError> {
        let index = self.len()?;
        self.push(downcast_value::<T>(value)?)?;

        Ok(index)
    }

    fn insert_any(&mut self, index: usize, value: Box<dyn Any>) -> Result<(), BuilderError> {
        self.len()?;
        self.insert(index, downcast_value::<T>(value)?)
    }

    fn extend_any(&mut self, items: Option<&dyn Any>) -> Result<(), BuilderError> {
        self.len()?;
        let items = items.ok_or(BuilderError::NullInput)?;
        self.extend_from_slice(as_slice_of::<T>(items)?)
    }

    fn contains_any(&self, value: &dyn Any) -> Result<bool, BuilderError> {
        self.len()?;
        self.contains(downcast_ref::<T>(value)?)
    }

    fn index_of_any(&self, value: &dyn Any) -> Result<Option<usize>, BuilderError> {
        self.len()?;
        self.index_of(downcast_ref::<T>(value)?)
    }

    fn remove_any(&mut self, value: &dyn Any) -> Result<bool, BuilderError> {
        self.len()?;
        self.remove(downcast_ref::<T>(value)?)
    }

    fn remove_at_any(&mut self, index: usize) -> Result<(), BuilderError> {
        self.remove_at(index).map(drop)
    }

    fn clear_any(&mut self) -> Result<(), BuilderError> {
        self.clear()
    }

    fn copy_to_any(&self, dest: &mut dyn Any, dest_index: usize) -> Result<(), BuilderError> {
        self.len()?;
        self.copy_to(as_mut_slice_of::<T>(dest)?, dest_index)
    }

    fn iter_any(&self) -> Result<Box<dyn Iterator<Item = &dyn Any> + '_>, BuilderError> {
        Ok(Box::new(self.iter()?.map(|item| item as &dyn Any)))
    }
}
