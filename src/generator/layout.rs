/*
layout.rs

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

//! Place the partition tree in maze coordinates for drawing.
//!
//! The nodes of the tree only know their size. This module computes the position of every
//! node in the root rectangle, and converts the routes of the leaves to lists of points.
//! The origin is the top-left corner of the maze, the y axis goes down, and a cell is one unit
//! wide.
//!
//! The drawing code uses three lists:
//!
//! * [`leaf_paths`]: the paths to draw inside each leaf.
//! * [`split_walls`]: the internal walls, with an opening at each junction.
//! * [`border_walls`]: the outer walls, with an opening at each entry of the root routes.

use std::collections::HashSet;

use super::node::PartitionNode;
use super::perimeter::{Axis, Rect};
use super::split::SplitError;

/// Node and the position of its top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub x: usize,
    pub y: usize,
    pub node: &'a PartitionNode,
}

/// Path through a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafPath {
    /// Position of the leaf top-left corner.
    pub origin: (usize, usize),

    /// Size of the leaf.
    pub rect: Rect,

    /// Route entries converted to maze coordinates, in the route order.
    pub points: Vec<(f64, f64)>,
}

impl LeafPath {
    /// Consecutive pairs of points.
    pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Straight wall between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl Wall {
    /// Length of the wall.
    pub fn length(&self) -> f64 {
        (self.to.0 - self.from.0).hypot(self.to.1 - self.from.1)
    }
}

/// Return all the nodes of the tree with their position, parents before children.
pub fn placements(root: &PartitionNode) -> Vec<Placement<'_>> {
    let mut list: Vec<Placement> = Vec::with_capacity(root.node_count());
    let mut stack: Vec<Placement> = vec![Placement {
        x: 0,
        y: 0,
        node: root,
    }];

    while let Some(p) = stack.pop() {
        if let (Some((a, b)), Some(frame)) = (p.node.children(), p.node.split_frame()) {
            let (bx, by) = frame.child_b_origin();
            // Push B first so that A is visited first
            stack.push(Placement {
                x: p.x + bx,
                y: p.y + by,
                node: b,
            });
            stack.push(Placement {
                x: p.x,
                y: p.y,
                node: a,
            });
        }
        list.push(p);
    }
    list
}

/// Return the paths to draw in the leaves.
///
/// # Errors
///
/// The function returns [`SplitError::RouteCorruption`] if a leaf route has an entry outside
/// the leaf boundary.
pub fn leaf_paths(root: &PartitionNode) -> Result<Vec<LeafPath>, SplitError> {
    let mut paths: Vec<LeafPath> = Vec::new();

    for p in placements(root).iter().filter(|p| p.node.is_leaf()) {
        let rect: Rect = p.node.rect();
        for route in &p.node.routes {
            let points: Vec<(f64, f64)> = route
                .entries()
                .iter()
                .map(|&entry| {
                    rect.entry_to_midpoint(entry)
                        .map(|(x, y)| (x + p.x as f64, y + p.y as f64))
                        .ok_or(SplitError::RouteCorruption {
                            entry,
                            perimeter: rect.perimeter(),
                        })
                })
                .collect::<Result<_, _>>()?;
            paths.push(LeafPath {
                origin: (p.x, p.y),
                rect,
                points,
            });
        }
    }
    Ok(paths)
}

/// Return the `[start, end)` ranges of the positions in `0..len` that are not open.
fn closed_runs(len: usize, is_open: impl Fn(usize) -> bool) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut start: Option<usize> = None;

    for i in 0..len {
        match (is_open(i), start) {
            (true, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => (),
        }
    }
    if let Some(s) = start {
        runs.push((s, len));
    }
    runs
}

/// Return the internal walls. Each junction leaves a one-unit opening in the wall.
pub fn split_walls(root: &PartitionNode) -> Vec<Wall> {
    let mut walls: Vec<Wall> = Vec::new();

    for p in placements(root) {
        let (Some(frame), Some(split)) = (p.node.split_frame(), &p.node.split) else {
            continue;
        };
        let open: HashSet<usize> = split.junctions.iter().copied().collect();
        let (ox, oy) = (p.x as f64, p.y as f64);
        let s: f64 = frame.split_pos as f64;

        match frame.axis {
            Axis::Vertical => {
                // Junctions are numbered from the top
                for (start, end) in closed_runs(frame.joint_range(), |t| open.contains(&t)) {
                    walls.push(Wall {
                        from: (ox + s, oy + start as f64),
                        to: (ox + s, oy + end as f64),
                    });
                }
            }
            Axis::Horizontal => {
                // Junctions are numbered from the right
                let w: usize = frame.rect.width;
                for (start, end) in closed_runs(w, |t| open.contains(&(w - 1 - t))) {
                    walls.push(Wall {
                        from: (ox + start as f64, oy + s),
                        to: (ox + end as f64, oy + s),
                    });
                }
            }
        }
    }
    walls
}

/// Return the outer walls. Each entry of the root routes leaves a one-unit opening.
pub fn border_walls(root: &PartitionNode) -> Vec<Wall> {
    let w: usize = root.width;
    let h: usize = root.height;
    let open: HashSet<usize> = root
        .routes
        .iter()
        .flat_map(|r| r.entries().iter().copied())
        .collect();
    let (wf, hf) = (w as f64, h as f64);
    let mut walls: Vec<Wall> = Vec::new();

    // Top, by increasing x
    for (a, b) in closed_runs(w, |x| open.contains(&x)) {
        walls.push(Wall {
            from: (a as f64, 0.0),
            to: (b as f64, 0.0),
        });
    }
    // Right, by increasing y
    for (a, b) in closed_runs(h, |y| open.contains(&(w + y))) {
        walls.push(Wall {
            from: (wf, a as f64),
            to: (wf, b as f64),
        });
    }
    // Bottom, by increasing x
    for (a, b) in closed_runs(w, |x| open.contains(&(w + h + (w - 1 - x)))) {
        walls.push(Wall {
            from: (a as f64, hf),
            to: (b as f64, hf),
        });
    }
    // Left, by increasing y
    for (a, b) in closed_runs(h, |y| open.contains(&(2 * w + h + (h - 1 - y)))) {
        walls.push(Wall {
            from: (0.0, a as f64),
            to: (0.0, b as f64),
        });
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::node::MaxDepth;
    use crate::generator::route::Route;
    use crate::generator::settings::GeneratorSettings;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build(w: usize, h: usize, depth: MaxDepth, seed: u64) -> PartitionNode {
        build_with(&GeneratorSettings::without_loops(), w, h, depth, seed)
    }

    fn build_with(
        settings: &GeneratorSettings,
        w: usize,
        h: usize,
        depth: MaxDepth,
        seed: u64,
    ) -> PartitionNode {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        PartitionNode::build(&mut rng, settings, w, h, depth, None).unwrap()
    }

    fn on_boundary(path: &LeafPath, point: (f64, f64)) -> bool {
        let x: f64 = point.0 - path.origin.0 as f64;
        let y: f64 = point.1 - path.origin.1 as f64;
        path.rect.midpoint_to_entry(x, y).is_some()
    }

    #[test]
    fn closed_runs_skip_openings() {
        assert_eq!(closed_runs(5, |i| i == 2), vec![(0, 2), (3, 5)]);
        assert_eq!(closed_runs(3, |_| false), vec![(0, 3)]);
        assert!(closed_runs(2, |_| true).is_empty());
        assert_eq!(closed_runs(4, |i| i == 0 || i == 3), vec![(1, 3)]);
    }

    #[test]
    fn unit_maze_path() {
        let mut rng: StdRng = StdRng::seed_from_u64(0);
        let root: PartitionNode = PartitionNode::build(
            &mut rng,
            &GeneratorSettings::default(),
            1,
            1,
            MaxDepth::Unbounded,
            Some(vec![Route::from_entries(&[0, 2])]),
        )
        .unwrap();

        let paths: Vec<LeafPath> = leaf_paths(&root).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].points, vec![(0.5, 0.0), (0.5, 1.0)]);
        assert_eq!(paths[0].segments().count(), 1);
        assert!(split_walls(&root).is_empty());

        // The top and bottom walls have an opening
        let border: f64 = border_walls(&root).iter().map(|w| w.length()).sum();
        assert!((border - 2.0).abs() < 1e-9);
    }

    #[test]
    fn placements_cover_the_maze() {
        let root: PartitionNode = build(9, 6, MaxDepth::Unbounded, 4);
        let leaves: Vec<Placement> = placements(&root)
            .into_iter()
            .filter(|p| p.node.is_leaf())
            .collect();

        assert_eq!(leaves.len(), 54);
        let cells: HashSet<(usize, usize)> = leaves.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(cells.len(), 54);
        assert!(cells.iter().all(|(x, y)| *x < 9 && *y < 6));
    }

    #[test]
    fn paths_meet_at_junctions() {
        let cases: [(GeneratorSettings, usize, usize); 2] = [
            (GeneratorSettings::without_loops(), 8, 5),
            (GeneratorSettings::default(), 12, 10),
        ];
        let runs = (0..10).flat_map(|seed| cases.iter().map(move |c| (seed, c)));
        for (seed, (settings, w, h)) in runs {
            let root: PartitionNode = build_with(settings, *w, *h, MaxDepth::Unbounded, seed);
            let paths: Vec<LeafPath> = leaf_paths(&root).unwrap();

            for path in &paths {
                assert!(path.points.len() >= 2);
                for point in &path.points {
                    assert!(on_boundary(path, *point));
                }
            }

            // Every path end that is not a maze entrance is shared with another path
            let entrances: Vec<(f64, f64)> = root.routes[0]
                .entries()
                .iter()
                .filter_map(|e| root.rect().entry_to_midpoint(*e))
                .collect();
            for (i, path) in paths.iter().enumerate() {
                for point in &path.points {
                    let shared: bool = paths.iter().enumerate().any(|(k, other)| {
                        k != i
                            && other.points.iter().any(|q| {
                                (q.0 - point.0).abs() < 1e-9 && (q.1 - point.1).abs() < 1e-9
                            })
                    });
                    let entrance: bool = entrances.iter().any(|q| {
                        (q.0 - point.0).abs() < 1e-9 && (q.1 - point.1).abs() < 1e-9
                    });
                    assert!(shared || entrance, "dangling point {point:?}");
                }
            }
        }
    }

    #[test]
    fn walls_leave_one_opening_per_junction() {
        let root: PartitionNode = build(10, 7, MaxDepth::Unbounded, 11);
        let mut expected: f64 = 0.0;

        for p in placements(&root) {
            if let (Some(frame), Some(split)) = (p.node.split_frame(), &p.node.split) {
                expected += (frame.joint_range() - split.junctions.len()) as f64;
            }
        }
        let length: f64 = split_walls(&root).iter().map(|w| w.length()).sum();
        assert!((length - expected).abs() < 1e-9);

        let border: f64 = border_walls(&root).iter().map(|w| w.length()).sum();
        assert!((border - 32.0).abs() < 1e-9);
    }

    #[test]
    fn walls_with_loops_leave_one_opening_per_junction() {
        for seed in 0..10 {
            let root: PartitionNode =
                build_with(&GeneratorSettings::default(), 12, 10, MaxDepth::Unbounded, seed);
            let mut expected: f64 = 0.0;

            for p in placements(&root) {
                if let (Some(frame), Some(split)) = (p.node.split_frame(), &p.node.split) {
                    expected += (frame.joint_range() - split.junctions.len()) as f64;
                }
            }
            let length: f64 = split_walls(&root).iter().map(|w| w.length()).sum();
            assert!((length - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn corrupted_leaf_route_is_reported() {
        let root: PartitionNode = PartitionNode {
            width: 1,
            height: 1,
            routes: vec![Route::from_entries(&[0, 7])],
            split: None,
            children: None,
        };
        assert_eq!(
            leaf_paths(&root),
            Err(SplitError::RouteCorruption {
                entry: 7,
                perimeter: 4
            })
        );
    }
}
