/*
split.rs

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

//! Split a rectangle in two while keeping its routes connected.
//!
//! The [`SplitPlanner`] object selects a split position, distributes the routes between the
//! two children, and creates a junction on the internal wall for each route that crosses the
//! split line.
//! The route fragments on each side of the wall end on the same junction, so that the route
//! stays connected through the children.
//!
//! When the wall has few junctions, the planner also adds loops: a route is detoured through
//! two extra junctions so that the maze gets redundant corridors.

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index;
use std::fmt;
use std::ops::Range;

use super::perimeter::{Rect, Side, SplitFrame};
use super::route::Route;
use super::settings::GeneratorSettings;

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitError {
    /// No split position can distribute the routes between the two children.
    SplitInfeasible {
        width: usize,
        height: usize,
        routes: usize,
        attempts: usize,
    },

    /// A route entry is not on the boundary of the rectangle.
    RouteCorruption { entry: usize, perimeter: usize },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SplitError::SplitInfeasible {
                width,
                height,
                routes,
                attempts,
            } => write!(
                f,
                "cannot split the {width}x{height} rectangle with {routes} routes after {attempts} attempts"
            ),
            SplitError::RouteCorruption { entry, perimeter } => write!(
                f,
                "route entry {entry} is outside the perimeter (0..{perimeter})"
            ),
        }
    }
}

impl std::error::Error for SplitError {}

/// Result of splitting a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    /// Split geometry.
    pub frame: SplitFrame,

    /// Sorted junction positions along the wall, including the loop junctions.
    pub junctions: Vec<usize>,

    /// Routes for child A, in the child A numbering.
    ///
    /// The whole routes come first, followed by the crossroute fragments in junction order,
    /// and then the loop routes.
    pub routes_a: Vec<Route>,

    /// Routes for child B, in the child B numbering. Same order as [`SplitPlan::routes_a`].
    pub routes_b: Vec<Route>,

    /// Number of routes that cross the wall.
    pub crossroutes: usize,

    /// Number of loops added along the wall.
    pub loops_injected: usize,

    /// Number of split positions tried.
    pub attempts: usize,
}

/// Route that crosses the wall, split in its two fragments.
#[derive(Debug)]
struct CrossRoute {
    a: Route,
    b: Route,

    // Sorting keys: clockwise distance from `split_from` of the nearest entry, and absolute
    // difference between that entry and `split_from`.
    distance: usize,
    proximity: usize,
}

/// Routes distributed for a split position.
#[derive(Debug)]
struct Classification {
    pure_a: Vec<Route>,
    pure_b: Vec<Route>,
    crossroutes: Vec<CrossRoute>,
}

impl Classification {
    /// Whether each side can receive its routes.
    fn is_feasible(&self, frame: &SplitFrame) -> bool {
        let (capacity_a, capacity_b) = frame.capacities();

        self.pure_a.len() <= capacity_a
            && self.pure_b.len() <= capacity_b
            && self.crossroutes.len() <= frame.joint_range()
    }
}

/// Return the split positions to try for a split dimension.
///
/// Child A gets at least a third of the rectangle.
pub fn split_candidates(split_dimension: usize) -> Range<usize> {
    split_dimension.div_ceil(3).max(1)..split_dimension
}

/// Split planner object.
pub struct SplitPlanner<'a> {
    settings: &'a GeneratorSettings,
}

impl<'a> SplitPlanner<'a> {
    /// Create the object.
    pub fn new(settings: &'a GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Split the rectangle and distribute the routes between the two children.
    ///
    /// The split positions are tried in random order until the routes fit in both children.
    ///
    /// # Errors
    ///
    /// The method returns [`SplitError::SplitInfeasible`] if no position is found after
    /// [`GeneratorSettings::max_split_attempts`] attempts, or after trying every position.
    /// It returns [`SplitError::RouteCorruption`] if a route entry is not on the rectangle
    /// boundary.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        rect: Rect,
        routes: &[Route],
    ) -> Result<SplitPlan, SplitError> {
        let split_dimension: usize = SplitFrame::new(rect, 0).split_dimension();
        let mut candidates: Vec<usize> = split_candidates(split_dimension).collect();
        candidates.shuffle(rng);

        let mut attempts: usize = 0;
        for split_pos in candidates
            .into_iter()
            .take(self.settings.max_split_attempts)
        {
            attempts += 1;
            let frame: SplitFrame = SplitFrame::new(rect, split_pos);
            let classification: Classification = Self::classify(&frame, routes)?;

            if !classification.is_feasible(&frame) {
                debug!(
                    "    {}x{} {} split at {split_pos} rejected: {} + {} whole routes, {} crossroutes, capacities {:?}",
                    rect.width,
                    rect.height,
                    frame.axis,
                    classification.pure_a.len(),
                    classification.pure_b.len(),
                    classification.crossroutes.len(),
                    frame.capacities()
                );
                continue;
            }
            return Ok(self.commit(rng, frame, classification, attempts));
        }

        debug!(
            "No split position for the {}x{} rectangle ({} routes)",
            rect.width,
            rect.height,
            routes.len()
        );
        Err(SplitError::SplitInfeasible {
            width: rect.width,
            height: rect.height,
            routes: routes.len(),
            attempts,
        })
    }

    /// Distribute the routes between the two sides of the split.
    fn classify(frame: &SplitFrame, routes: &[Route]) -> Result<Classification, SplitError> {
        let perimeter: usize = frame.rect.perimeter();
        let split_from: usize = frame.split_from();
        let mut classification: Classification = Classification {
            pure_a: Vec::new(),
            pure_b: Vec::new(),
            crossroutes: Vec::new(),
        };

        for route in routes {
            let mut a: Route = Route::new();
            let mut b: Route = Route::new();
            let mut distance: usize = usize::MAX;
            let mut proximity: usize = usize::MAX;

            for &entry in route.entries() {
                match frame.classify(entry) {
                    Some(Side::A(e)) => a.push(e),
                    Some(Side::B(e)) => b.push(e),
                    None => return Err(SplitError::RouteCorruption { entry, perimeter }),
                }
                // Entries before `split_from` are reached after a full turn
                let d: usize = if entry >= split_from {
                    entry - split_from
                } else {
                    entry + perimeter - split_from
                };
                distance = distance.min(d);
                proximity = proximity.min(entry.abs_diff(split_from));
            }

            if b.is_empty() {
                classification.pure_a.push(a);
            } else if a.is_empty() {
                classification.pure_b.push(b);
            } else {
                classification.crossroutes.push(CrossRoute {
                    a,
                    b,
                    distance,
                    proximity,
                });
            }
        }
        Ok(classification)
    }

    /// Create the junctions and the route fragments for the selected split position.
    fn commit<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        frame: SplitFrame,
        classification: Classification,
        attempts: usize,
    ) -> SplitPlan {
        let Classification {
            pure_a: mut routes_a,
            pure_b: mut routes_b,
            mut crossroutes,
        } = classification;

        // The first crossroutes along the boundary from `split_from` get the first junctions
        // along the wall, so that the fragments do not cross each other.
        crossroutes.sort_by_key(|c| (c.distance, c.proximity));

        let num_crossroutes: usize = crossroutes.len();
        let mut junctions: Vec<usize> =
            index::sample(rng, frame.joint_range(), num_crossroutes).into_vec();
        junctions.sort_unstable();

        let first_a: usize = routes_a.len();
        let first_b: usize = routes_b.len();
        for (&j, cross) in junctions.iter().zip(crossroutes) {
            let (ja, jb) = frame.junction(j);
            let CrossRoute { mut a, mut b, .. } = cross;
            a.push(ja);
            b.push(jb);
            routes_a.push(a);
            routes_b.push(b);
        }

        let loops_injected: usize = self.inject_loops(
            rng,
            &frame,
            &mut junctions,
            &mut routes_a,
            &mut routes_b,
            first_a,
            first_b,
        );

        if log_enabled!(Level::Debug) {
            debug!(
                "{}x{} {} split at {} (attempt {attempts})",
                frame.rect.width, frame.rect.height, frame.axis, frame.split_pos
            );
            debug!("    junctions = {junctions:?}  loops = {loops_injected}");
            debug!("     routes A = {routes_a:?}");
            debug!("     routes B = {routes_b:?}");
        }

        SplitPlan {
            frame,
            junctions,
            routes_a,
            routes_b,
            crossroutes: num_crossroutes,
            loops_injected,
            attempts,
        }
    }

    /// Add loops in the large gaps between junctions and return the number of added loops.
    ///
    /// For a junction `j` and two new positions `n1 < n2` before it, the fragment of one side
    /// is moved from `j` to `n1`. The other side gets a new route from `n1` to `n2`, and the
    /// same side gets a new route from `n2` to `j`. The crossroute then goes through the wall
    /// three times instead of once.
    #[allow(clippy::too_many_arguments)]
    fn inject_loops<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        frame: &SplitFrame,
        junctions: &mut Vec<usize>,
        routes_a: &mut Vec<Route>,
        routes_b: &mut Vec<Route>,
        first_a: usize,
        first_b: usize,
    ) -> usize {
        let rect: Rect = frame.rect;
        if rect.width < self.settings.loop_min_size
            || rect.height < self.settings.loop_min_size
            || self.settings.loop_probability <= 0.0
        {
            return 0;
        }

        let (capacity_a, capacity_b) = frame.capacities();
        let max_junctions: f64 = self.settings.loop_density * frame.joint_range() as f64;
        let mut new_junctions: Vec<usize> = Vec::new();
        let mut previous: Option<usize> = None;
        let mut loops: usize = 0;

        for (i, &j) in junctions.iter().enumerate() {
            // Free positions are in the [low, j) range. Before the first junction, the gap is
            // measured from a virtual junction at -2.
            let low: usize = previous.map_or(0, |p| p + 1);
            let gap: usize = previous.map_or(j + 2, |p| j - p);
            previous = Some(j);

            if (junctions.len() + new_junctions.len()) as f64 >= max_junctions {
                break;
            }
            if routes_a.len() >= capacity_a || routes_b.len() >= capacity_b {
                break;
            }
            if gap < self.settings.loop_min_gap || j - low < 2 {
                continue;
            }
            if rng.random::<f64>() >= self.settings.loop_probability {
                continue;
            }

            let offsets: Vec<usize> = index::sample(rng, j - low, 2).into_vec();
            let n1: usize = low + offsets[0].min(offsets[1]);
            let n2: usize = low + offsets[0].max(offsets[1]);
            let (a1, b1) = frame.junction(n1);
            let (a2, b2) = frame.junction(n2);
            let (aj, bj) = frame.junction(j);

            if rng.random_bool(0.5) {
                routes_a[first_a + i].replace_last(a1);
                routes_a.push(Route::from_entries(&[a2, aj]));
                routes_b.push(Route::from_entries(&[b1, b2]));
            } else {
                routes_b[first_b + i].replace_last(b1);
                routes_b.push(Route::from_entries(&[b2, bj]));
                routes_a.push(Route::from_entries(&[a1, a2]));
            }
            debug!("    loop before junction {j} through {n1} and {n2}");
            new_junctions.push(n1);
            new_junctions.push(n2);
            loops += 1;
        }

        junctions.extend(new_junctions);
        junctions.sort_unstable();
        loops
    }
}
