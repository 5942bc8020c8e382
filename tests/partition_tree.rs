/*
partition_tree.rs

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

//! Build whole mazes and verify the properties of the partition trees.

use std::collections::HashMap;

use mazesplit::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use mazesplit::generator::layout::{LeafPath, leaf_paths, split_walls};
use mazesplit::generator::node::{MaxDepth, MazeBuilder, MazeError, PartitionNode};
use mazesplit::generator::perimeter::Rect;
use mazesplit::generator::route::Route;
use mazesplit::generator::settings::GeneratorSettings;

/// Minimal union-find over maze points.
struct Points {
    ids: HashMap<(i64, i64), usize>,
    parent: Vec<usize>,
}

impl Points {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            parent: Vec::new(),
        }
    }

    fn id(&mut self, (x, y): (f64, f64)) -> usize {
        let key: (i64, i64) = ((x * 2.0).round() as i64, (y * 2.0).round() as i64);
        let next: usize = self.parent.len();
        let id: usize = *self.ids.entry(key).or_insert(next);
        if id == next {
            self.parent.push(next);
        }
        id
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        self.parent[ra] = rb;
    }
}

/// Verify that the paths drawn in the leaves connect every root route.
fn check_connected(root: &PartitionNode) {
    let mut points: Points = Points::new();
    let paths: Vec<LeafPath> = leaf_paths(root).unwrap();
    for path in &paths {
        for (from, to) in path.segments() {
            let (a, b) = (points.id(from), points.id(to));
            points.union(a, b);
        }
    }

    let rect: Rect = root.rect();
    for route in &root.routes {
        let first: usize = points.id(rect.entry_to_midpoint(route.entries()[0]).unwrap());
        for e in &route.entries()[1..] {
            let other: usize = points.id(rect.entry_to_midpoint(*e).unwrap());
            assert_eq!(
                points.find(first),
                points.find(other),
                "entry {e} of route {route:?} is not reachable"
            );
        }
    }
}

/// Verify that the entries of every node are distinct and inside its perimeter.
fn check_entries(node: &PartitionNode) {
    let rect: Rect = node.rect();
    let mut all: Vec<usize> = node
        .routes
        .iter()
        .flat_map(|r| r.entries().iter().copied())
        .collect();
    let count: usize = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), count, "duplicated entries in {:?}", node.routes);
    assert!(all.iter().all(|e| rect.contains_entry(*e)));
    assert!(node.routes.iter().all(|r| r.len() >= 2));

    if let (Some((a, b)), Some(split)) = (node.children(), &node.split) {
        assert_eq!(
            a.entry_count() + b.entry_count(),
            node.entry_count() + 2 * split.crossroutes + 4 * split.loops_injected
        );
        assert_eq!(a.width * a.height + b.width * b.height, node.width * node.height);
        check_entries(a);
        check_entries(b);
    }
}

#[test]
fn loop_free_mazes_are_connected() {
    for seed in 0..40 {
        let mut builder: MazeBuilder = MazeBuilder::new(seed, GeneratorSettings::without_loops());
        let root: PartitionNode = builder.build(13, 9, MaxDepth::Unbounded, None).unwrap();

        assert_eq!(root.leaf_count(), 13 * 9);
        assert_eq!(builder.nodes, 2 * 13 * 9 - 1);
        check_entries(&root);
        check_connected(&root);
    }
}

#[test]
fn mazes_with_loops_are_connected() {
    for (w, h) in [(6, 6), (8, 8), (10, 10), (20, 30)] {
        let mut loops: usize = 0;
        for seed in 0..50 {
            let mut builder: MazeBuilder = MazeBuilder::new(seed, GeneratorSettings::default());
            let root: PartitionNode = builder.build(w, h, MaxDepth::Unbounded, None).unwrap();

            assert_eq!(root.leaf_count(), w * h);
            check_entries(&root);
            check_connected(&root);
            loops += root.loop_count();
        }
        assert!(loops > 0, "no loops in the {w}x{h} mazes");
    }
}

#[test]
fn default_mazes_always_build() {
    for seed in 0..30 {
        let mut builder: MazeBuilder = MazeBuilder::new(seed, GeneratorSettings::default());
        let root: PartitionNode = builder
            .build(DEFAULT_WIDTH, DEFAULT_HEIGHT, MaxDepth::Unbounded, None)
            .unwrap();

        assert_eq!(root.leaf_count(), DEFAULT_WIDTH * DEFAULT_HEIGHT);
        assert_eq!(builder.loops, root.loop_count());
        check_entries(&root);
        check_connected(&root);
    }
}

#[test]
fn shallow_mazes_always_build() {
    for seed in 0..30 {
        let mut builder: MazeBuilder = MazeBuilder::new(seed, GeneratorSettings::default());
        let root: PartitionNode = builder.build(20, 14, MaxDepth::Limited(1), None).unwrap();

        assert_eq!(root.depth(), 1);
        check_entries(&root);
        check_connected(&root);
    }
}

#[test]
fn limited_depth_leaves_keep_their_routes() {
    let mut builder: MazeBuilder = MazeBuilder::new(5, GeneratorSettings::without_loops());
    let root: PartitionNode = builder.build(16, 16, MaxDepth::Limited(3), None).unwrap();

    assert_eq!(root.depth(), 3);
    assert_eq!(root.leaf_count(), 8);
    check_entries(&root);
    check_connected(&root);
}

#[test]
fn given_routes_are_kept_connected() {
    // Entrance on the top edge, exit in the bottom-left corner
    let routes: Vec<Route> = vec![Route::from_entries(&[2, 20])];
    for seed in 0..20 {
        let mut builder: MazeBuilder = MazeBuilder::new(seed, GeneratorSettings::without_loops());
        let root: PartitionNode = builder
            .build(7, 7, MaxDepth::Unbounded, Some(routes.clone()))
            .unwrap();

        assert_eq!(root.routes, routes);
        check_entries(&root);
        check_connected(&root);
    }
}

#[test]
fn same_seed_same_maze() {
    let mut first: MazeBuilder = MazeBuilder::new(1234, GeneratorSettings::default());
    let mut second: MazeBuilder = MazeBuilder::new(1234, GeneratorSettings::default());

    let a: Result<PartitionNode, MazeError> = first.build(10, 10, MaxDepth::Limited(4), None);
    let b: Result<PartitionNode, MazeError> = second.build(10, 10, MaxDepth::Limited(4), None);
    assert_eq!(a, b);
}

#[test]
fn split_walls_stay_inside_the_maze() {
    let mut builder: MazeBuilder = MazeBuilder::new(77, GeneratorSettings::without_loops());
    let root: PartitionNode = builder.build(9, 12, MaxDepth::Unbounded, None).unwrap();

    for wall in split_walls(&root) {
        for (x, y) in [wall.from, wall.to] {
            assert!((0.0..=9.0).contains(&x) && (0.0..=12.0).contains(&y));
        }
        assert!(wall.length() > 0.0);
    }
}
