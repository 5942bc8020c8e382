/*
perimeter.rs

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

//! Perimeter numbering and re-indexing between a rectangle and its two halves.
//!
//! The boundary of a `width`×`height` rectangle is divided in unit positions, numbered
//! clockwise from the top-left corner:
//!
//! ```text
//!   top:     0               .. width - 1                  (increasing x)
//!   right:   width           .. width + height - 1         (increasing y)
//!   bottom:  width + height  .. 2 * width + height - 1     (decreasing x)
//!   left:    2 * width + height .. 2 * (width + height) - 1 (decreasing y)
//! ```
//!
//! Every rectangle of the partition tree uses that numbering for its own entries.
//! When a rectangle is split, the [`SplitFrame`] object converts the parent entries to entries
//! of the child rectangles, and computes the entries of the junctions created along the new
//! internal wall.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

// Tolerance used when converting coordinates back to entries.
const EPSILON: f64 = 1e-9;

/// Rectangle size, in cells.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub width: usize,
    pub height: usize,
}

/// Edges of a rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Edge {
    #[strum(serialize = "top")]
    Top,
    #[strum(serialize = "right")]
    Right,
    #[strum(serialize = "bottom")]
    Bottom,
    #[strum(serialize = "left")]
    Left,
}

impl Rect {
    /// Create a [`Rect`] object.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of entries on the boundary.
    pub fn perimeter(&self) -> usize {
        2 * (self.width + self.height)
    }

    /// Whether the rectangle is a single cell.
    pub fn is_unit(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Whether the entry is a valid perimeter index for this rectangle.
    pub fn contains_entry(&self, entry: usize) -> bool {
        entry < self.perimeter()
    }

    /// Return the edge of the given entry, and the position of the entry along that edge in the
    /// clockwise direction.
    pub fn edge_of(&self, entry: usize) -> Option<(Edge, usize)> {
        let w: usize = self.width;
        let h: usize = self.height;

        if entry < w {
            Some((Edge::Top, entry))
        } else if entry < w + h {
            Some((Edge::Right, entry - w))
        } else if entry < 2 * w + h {
            Some((Edge::Bottom, entry - w - h))
        } else if entry < 2 * (w + h) {
            Some((Edge::Left, entry - 2 * w - h))
        } else {
            None
        }
    }

    /// Return the coordinates of the middle of the unit boundary segment for the entry.
    ///
    /// The origin is the top-left corner of the rectangle, and the y axis goes down.
    pub fn entry_to_midpoint(&self, entry: usize) -> Option<(f64, f64)> {
        let w: f64 = self.width as f64;
        let h: f64 = self.height as f64;

        self.edge_of(entry).map(|(edge, pos)| {
            let pos: f64 = pos as f64 + 0.5;
            match edge {
                Edge::Top => (pos, 0.0),
                Edge::Right => (w, pos),
                Edge::Bottom => (w - pos, h),
                Edge::Left => (0.0, h - pos),
            }
        })
    }

    /// Return the entry for the given boundary coordinates.
    ///
    /// This is the reverse of [`Rect::entry_to_midpoint`].
    /// Return [`None`] if the point is not the middle of a unit boundary segment.
    pub fn midpoint_to_entry(&self, x: f64, y: f64) -> Option<usize> {
        let w: f64 = self.width as f64;
        let h: f64 = self.height as f64;

        // Position along the edge from a coordinate that should end with .5
        let unit = |v: f64, len: f64| -> Option<usize> {
            let i: f64 = (v - 0.5).round();
            if (i + 0.5 - v).abs() > EPSILON || i < 0.0 || i >= len {
                None
            } else {
                Some(i as usize)
            }
        };

        if y.abs() < EPSILON {
            unit(x, w)
        } else if (x - w).abs() < EPSILON {
            unit(y, h).map(|j| self.width + j)
        } else if (y - h).abs() < EPSILON {
            unit(w - x, w).map(|k| self.width + self.height + k)
        } else if x.abs() < EPSILON {
            unit(h - y, h).map(|l| 2 * self.width + self.height + l)
        } else {
            None
        }
    }
}

/// Return the midpoint coordinates of the entry for a `width`×`height` rectangle.
pub fn entry_to_midpoint(width: usize, height: usize, entry: usize) -> Option<(f64, f64)> {
    Rect::new(width, height).entry_to_midpoint(entry)
}

/// Orientation of the split line.
///
/// - A `Vertical` split cuts the width: child A is on the left, child B on the right.
/// - A `Horizontal` split cuts the height: child A is at the top, child B at the bottom.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Axis {
    #[strum(serialize = "vertical")]
    Vertical,
    #[strum(serialize = "horizontal")]
    Horizontal,
}

impl Axis {
    /// Select the split orientation for a rectangle. Square rectangles are split horizontally.
    pub fn for_rect(rect: Rect) -> Self {
        if rect.width > rect.height {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}

/// Child rectangle an entry belongs to, with the entry converted to the child numbering.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    A(usize),
    B(usize),
}

/// Geometry of a split: re-indexing of the parent entries, and junction entries.
///
/// The parent entries in the `[split_from, split_to)` range are the contiguous arc of the
/// boundary that belongs to child B.
/// The other entries belong to child A: the entries before `split_from` keep their index,
/// the entries from `split_to` are shifted by the A offset.
///
/// The junction positions `j` are numbered along the split line, starting from the end of the
/// line next to `split_from`: top to bottom for a vertical split, right to left for an
/// horizontal split.
/// With that numbering, the junction entry is `ja_offset + j` in child A and `jb_offset - j` in
/// child B, for both orientations.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct SplitFrame {
    /// Parent rectangle.
    pub rect: Rect,

    /// Split orientation, computed from the parent rectangle.
    pub axis: Axis,

    /// Size of child A along the split dimension.
    pub split_pos: usize,
}

impl SplitFrame {
    /// Create a [`SplitFrame`] object.
    ///
    /// `split_pos` must be strictly between 0 and the split dimension of the rectangle.
    pub fn new(rect: Rect, split_pos: usize) -> Self {
        Self {
            rect,
            axis: Axis::for_rect(rect),
            split_pos,
        }
    }

    /// Length of the rectangle along the split orientation: the width for a vertical split.
    pub fn split_dimension(&self) -> usize {
        match self.axis {
            Axis::Vertical => self.rect.width,
            Axis::Horizontal => self.rect.height,
        }
    }

    /// Length of the internal wall shared by the two children.
    pub fn joint_range(&self) -> usize {
        match self.axis {
            Axis::Vertical => self.rect.height,
            Axis::Horizontal => self.rect.width,
        }
    }

    /// First parent entry that belongs to child B.
    pub fn split_from(&self) -> usize {
        match self.axis {
            Axis::Vertical => self.split_pos,
            Axis::Horizontal => self.rect.width + self.split_pos,
        }
    }

    /// First parent entry after the child B arc.
    pub fn split_to(&self) -> usize {
        let w: usize = self.rect.width;
        let h: usize = self.rect.height;

        match self.axis {
            Axis::Vertical => 2 * w + h - self.split_pos,
            Axis::Horizontal => 2 * w + 2 * h - self.split_pos,
        }
    }

    /// Value subtracted from the parent entries at or after `split_to` to get child A entries.
    pub fn a_offset(&self) -> usize {
        2 * (self.split_dimension() - self.split_pos)
    }

    /// Value subtracted from the parent entries of the child B arc to get child B entries.
    pub fn b_offset(&self) -> usize {
        self.split_pos
    }

    /// Child A entry of the junction 0.
    pub fn ja_offset(&self) -> usize {
        match self.axis {
            Axis::Vertical => self.split_pos,
            Axis::Horizontal => self.rect.width + self.split_pos,
        }
    }

    /// Child B entry of the junction 0.
    pub fn jb_offset(&self) -> usize {
        let w: usize = self.rect.width;
        let h: usize = self.rect.height;

        match self.axis {
            Axis::Vertical => 2 * (w - self.split_pos) + 2 * h - 1,
            Axis::Horizontal => w - 1,
        }
    }

    /// Convert a parent entry to the child numbering.
    ///
    /// Return [`None`] if the entry is not on the parent boundary.
    pub fn classify(&self, entry: usize) -> Option<Side> {
        if !self.rect.contains_entry(entry) {
            return None;
        }
        if entry < self.split_from() {
            Some(Side::A(entry))
        } else if entry < self.split_to() {
            Some(Side::B(entry - self.b_offset()))
        } else {
            Some(Side::A(entry - self.a_offset()))
        }
    }

    /// Return the child A and child B entries of the junction at position `j` along the wall.
    pub fn junction(&self, j: usize) -> (usize, usize) {
        (self.ja_offset() + j, self.jb_offset() - j)
    }

    /// Return the child A and child B rectangles.
    pub fn child_rects(&self) -> (Rect, Rect) {
        let w: usize = self.rect.width;
        let h: usize = self.rect.height;
        let s: usize = self.split_pos;

        match self.axis {
            Axis::Vertical => (Rect::new(s, h), Rect::new(w - s, h)),
            Axis::Horizontal => (Rect::new(w, s), Rect::new(w, h - s)),
        }
    }

    /// Position of the top-left corner of child B, relative to the parent top-left corner.
    pub fn child_b_origin(&self) -> (usize, usize) {
        match self.axis {
            Axis::Vertical => (self.split_pos, 0),
            Axis::Horizontal => (0, self.split_pos),
        }
    }

    /// Maximum number of whole routes that child A and child B can receive.
    pub fn capacities(&self) -> (usize, usize) {
        let joint: usize = self.joint_range();
        (
            joint.min(self.split_pos),
            joint.min(self.split_dimension() - self.split_pos),
        )
    }

    /// Coordinates of the middle of the junction `j` on the wall, relative to the parent
    /// top-left corner.
    pub fn junction_midpoint(&self, j: usize) -> (f64, f64) {
        let s: f64 = self.split_pos as f64;

        match self.axis {
            Axis::Vertical => (s, j as f64 + 0.5),
            Axis::Horizontal => (self.rect.width as f64 - j as f64 - 0.5, s),
        }
    }
}
