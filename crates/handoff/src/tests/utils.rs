// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::rc::Rc;

/// Counts how many of its clones have been dropped.
#[derive(Debug, Clone)]
pub(crate) struct DropProbe {
    pub(crate) id: u32,
    drops: Rc<Cell<usize>>,
}

impl DropProbe {
    pub(crate) fn new(id: u32, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            id,
            drops: Rc::clone(drops),
        }
    }
}

impl PartialEq for DropProbe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

pub(crate) fn probes(ids: &[u32], drops: &Rc<Cell<usize>>) -> Vec<DropProbe> {
    ids.iter().map(|id| DropProbe::new(*id, drops)).collect()
}
