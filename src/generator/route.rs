/*
route.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazesplit.

Mazesplit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazesplit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazesplit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Route through a rectangle of the partition tree.

use serde::{Deserialize, Serialize};

/// Route object.
///
/// A route is an ordered list of perimeter entries of the rectangle that owns it.
/// All the entries of a route must be connected by a single drawn path inside the rectangle.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Route {
    entries: Vec<usize>,
}

impl Route {
    /// Create an empty [`Route`] object.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a [`Route`] object from a list of entries.
    pub fn from_entries(entries: &[usize]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// Add an entry at the end of the route.
    pub fn push(&mut self, entry: usize) {
        self.entries.push(entry);
    }

    /// Replace the last entry of the route.
    pub fn replace_last(&mut self, entry: usize) {
        if let Some(e) = self.entries.last_mut() {
            *e = entry;
        }
    }

    /// Get the number of entries in the route.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the route has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return a reference to the entries.
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Return the last entry of the route.
    pub fn last(&self) -> Option<usize> {
        self.entries.last().copied()
    }
}
