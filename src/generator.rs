/*
generator.rs

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

//! Generate mazes by recursively splitting a rectangle.
//!
//! The maze is a tree of rectangles.
//! The root rectangle gets a route between two random entries of its boundary: the entrance
//! and the exit of the maze.
//! Each rectangle is then split in two by an internal wall, and its routes are distributed
//! between the two halves.
//! A route that crosses the wall is cut in two fragments that end on the same opening in the
//! wall (a junction), so the path from the entrance to the exit stays connected.
//!
//! * [`perimeter`] numbers the boundary positions of a rectangle and converts them between a
//!   rectangle and its two halves.
//! * [`route`] stores the boundary positions that a path must connect.
//! * [`split`] selects the split position, creates the junctions, and adds loops.
//! * [`node`] builds the tree from a seeded random generator with a [`node::MazeBuilder`]
//!   object.
//! * [`layout`] converts the leaves and the walls to maze coordinates for drawing.
//! * [`settings`] groups the tuning parameters.

pub mod layout;
pub mod node;
pub mod perimeter;
pub mod route;
pub mod settings;
pub mod split;
