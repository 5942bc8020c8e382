/*
node.rs

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

//! Partition tree.
//!
//! A [`PartitionNode`] object is a rectangle that carries routes.
//! Unless the rectangle is a single cell or the depth budget is exhausted, the node is split in
//! two children by the [`SplitPlanner`] and the routes are distributed between them.
//! The routes of the leaves are the paths to draw.

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use super::perimeter::{Axis, Rect, SplitFrame};
use super::route::Route;
use super::settings::GeneratorSettings;
use super::split::{SplitError, SplitPlan, SplitPlanner};

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// The rectangle has a zero width or height.
    InvalidGeometry { width: usize, height: usize },

    /// The generator settings are not valid.
    InvalidSettings(String),

    /// A provided route is empty or has an entry outside the perimeter.
    InvalidRoute { route: usize, perimeter: usize },

    /// A rectangle cannot be split.
    Split(SplitError),

    /// The tree is deeper than the configured recursion ceiling.
    RecursionLimit(usize),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeError::InvalidGeometry { width, height } => {
                write!(f, "invalid maze size {width}x{height}")
            }
            MazeError::InvalidSettings(msg) => write!(f, "invalid settings: {msg}"),
            MazeError::InvalidRoute { route, perimeter } => write!(
                f,
                "route {route} is empty or has entries outside the perimeter (0..{perimeter})"
            ),
            MazeError::Split(e) => write!(f, "{e}"),
            MazeError::RecursionLimit(depth) => {
                write!(f, "the partition tree is deeper than {depth} levels")
            }
        }
    }
}

impl std::error::Error for MazeError {}

impl From<SplitError> for MazeError {
    fn from(e: SplitError) -> Self {
        MazeError::Split(e)
    }
}

/// Remaining recursion budget.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaxDepth {
    Unbounded,
    Limited(usize),
}

impl MaxDepth {
    /// Convert a signed depth. Negative values mean no limit.
    pub fn from_signed(depth: i64) -> Self {
        if depth < 0 {
            MaxDepth::Unbounded
        } else {
            MaxDepth::Limited(depth as usize)
        }
    }

    /// Whether the node must not get children.
    pub fn is_exhausted(self) -> bool {
        self == MaxDepth::Limited(0)
    }

    /// Budget for the children.
    pub fn child(self) -> Self {
        match self {
            MaxDepth::Unbounded => MaxDepth::Unbounded,
            MaxDepth::Limited(n) => MaxDepth::Limited(n.saturating_sub(1)),
        }
    }
}

/// Split of a node, as needed to draw the internal wall.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SplitInfo {
    pub axis: Axis,

    /// Size of child A along the split dimension.
    pub split_pos: usize,

    /// Sorted junction positions along the wall. See [`SplitFrame`] for the numbering.
    pub junctions: Vec<usize>,

    /// Number of routes that cross the wall.
    pub crossroutes: usize,

    /// Number of loops added along the wall.
    pub loops_injected: usize,

    /// Number of split positions tried.
    pub attempts: usize,

    /// Number of times the children were discarded and built again.
    pub rebuilds: usize,
}

impl From<&SplitPlan> for SplitInfo {
    fn from(plan: &SplitPlan) -> Self {
        Self {
            axis: plan.frame.axis,
            split_pos: plan.frame.split_pos,
            junctions: plan.junctions.clone(),
            crossroutes: plan.crossroutes,
            loops_injected: plan.loops_injected,
            attempts: plan.attempts,
            rebuilds: 0,
        }
    }
}

/// Node of the partition tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PartitionNode {
    pub width: usize,
    pub height: usize,

    /// Routes in the node numbering.
    /// For internal nodes, these are the routes before the split, kept for diagnostics.
    pub routes: Vec<Route>,

    /// Split of the node.
    /// Nodes that reached the depth limit still record the split they would have used.
    pub split: Option<SplitInfo>,

    /// Child A and child B.
    pub children: Option<Box<[PartitionNode; 2]>>,
}

impl PartitionNode {
    /// Build a partition tree.
    ///
    /// When `routes` is [`None`], the root gets one route between two random perimeter entries.
    ///
    /// # Errors
    ///
    /// The method returns an error if the size, the settings, or the routes are not valid, or
    /// if a rectangle of the tree cannot be split.
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        settings: &GeneratorSettings,
        width: usize,
        height: usize,
        max_depth: MaxDepth,
        routes: Option<Vec<Route>>,
    ) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidGeometry { width, height });
        }
        settings.validate().map_err(MazeError::InvalidSettings)?;

        let rect: Rect = Rect::new(width, height);
        let routes: Vec<Route> = match routes {
            Some(routes) => {
                if let Some(i) = routes.iter().position(|r| {
                    r.is_empty() || r.entries().iter().any(|e| !rect.contains_entry(*e))
                }) {
                    return Err(MazeError::InvalidRoute {
                        route: i,
                        perimeter: rect.perimeter(),
                    });
                }
                routes
            }
            None => vec![Self::random_route(rng, rect)],
        };
        debug!("Building {width}x{height} maze with routes {routes:?}");

        // Subtrees that cannot be completed with loops are rebuilt, and the last attempt uses
        // this loop-free copy of the settings
        let loop_free: GeneratorSettings = GeneratorSettings {
            loop_probability: 0.0,
            ..settings.clone()
        };
        let mut tree: TreeContext = TreeContext {
            planner: SplitPlanner::new(settings),
            loop_free_planner: SplitPlanner::new(&loop_free),
            ceiling: settings.max_recursion_depth,
            rebuilds_left: settings.max_rebuilds,
        };
        tree.build_node(rng, rect, max_depth, routes, 0, true)
    }

    /// Create a route between two distinct random entries.
    fn random_route<R: Rng + ?Sized>(rng: &mut R, rect: Rect) -> Route {
        let entries: Vec<usize> = index::sample(rng, rect.perimeter(), 2).into_vec();
        Route::from_entries(&entries)
    }

    /// Rectangle of the node.
    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Return child A and child B.
    pub fn children(&self) -> Option<(&PartitionNode, &PartitionNode)> {
        self.children.as_deref().map(|[a, b]| (a, b))
    }

    /// Split geometry of the node, if it has children.
    pub fn split_frame(&self) -> Option<SplitFrame> {
        match (&self.split, &self.children) {
            (Some(s), Some(_)) => Some(SplitFrame::new(self.rect(), s.split_pos)),
            _ => None,
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self.children() {
            Some((a, b)) => 1 + a.node_count() + b.node_count(),
            None => 1,
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some((a, b)) => a.leaf_count() + b.leaf_count(),
            None => 1,
        }
    }

    /// Number of levels below the node.
    pub fn depth(&self) -> usize {
        match self.children() {
            Some((a, b)) => 1 + a.depth().max(b.depth()),
            None => 0,
        }
    }

    /// Number of routes in the leaves of the tree.
    pub fn leaf_route_count(&self) -> usize {
        match self.children() {
            Some((a, b)) => a.leaf_route_count() + b.leaf_route_count(),
            None => self.routes.len(),
        }
    }

    /// Total number of route entries of the node.
    pub fn entry_count(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Number of split positions tried for building the tree.
    pub fn split_attempts(&self) -> usize {
        let own: usize = self.split.as_ref().map_or(0, |s| s.attempts);
        match self.children() {
            Some((a, b)) => own + a.split_attempts() + b.split_attempts(),
            None => own,
        }
    }

    /// Number of loops in the tree.
    pub fn loop_count(&self) -> usize {
        match (self.children(), &self.split) {
            (Some((a, b)), Some(split)) => split.loops_injected + a.loop_count() + b.loop_count(),
            _ => 0,
        }
    }

    /// Number of subtrees that were discarded and built again.
    pub fn rebuild_count(&self) -> usize {
        let own: usize = self.split.as_ref().map_or(0, |s| s.rebuilds);
        match self.children() {
            Some((a, b)) => own + a.rebuild_count() + b.rebuild_count(),
            None => own,
        }
    }
}

/// Number of attempts with loops for a node whose subtrees cannot be completed. The next
/// attempt builds the subtree without loops.
const MAX_NODE_REBUILDS: usize = 3;

/// State shared by the recursive calls that build a tree.
struct TreeContext<'a> {
    planner: SplitPlanner<'a>,
    loop_free_planner: SplitPlanner<'a>,
    ceiling: usize,

    /// Remaining number of subtrees that can be built again with loops.
    rebuilds_left: usize,
}

impl TreeContext<'_> {
    fn planner(&self, loops: bool) -> &SplitPlanner<'_> {
        if loops {
            &self.planner
        } else {
            &self.loop_free_planner
        }
    }

    /// Recursively build the node and its children.
    ///
    /// Loops can make a descendant impossible to split. In that case the children are built
    /// again from a new split, and finally without loops. A node with a single route always
    /// succeeds without loops, so a tree that starts from one route is always completed.
    fn build_node<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        rect: Rect,
        max_depth: MaxDepth,
        routes: Vec<Route>,
        level: usize,
        loops: bool,
    ) -> Result<PartitionNode, MazeError> {
        if level > self.ceiling {
            return Err(MazeError::RecursionLimit(self.ceiling));
        }

        let mut node: PartitionNode = PartitionNode {
            width: rect.width,
            height: rect.height,
            routes,
            split: None,
            children: None,
        };
        if rect.is_unit() {
            return Ok(node);
        }

        // Depth limit reached: the node keeps its routes for drawing, and the split is only
        // recorded.
        if max_depth.is_exhausted() {
            match self.planner(loops).plan(rng, rect, &node.routes) {
                Ok(plan) => node.split = Some(SplitInfo::from(&plan)),
                Err(e @ SplitError::SplitInfeasible { .. }) => {
                    debug!("Leaf {}x{} at level {level}: {e}", rect.width, rect.height);
                }
                Err(e) => return Err(e.into()),
            }
            return Ok(node);
        }

        let mut looping: bool = loops;
        let mut rebuilds: usize = 0;
        loop {
            let plan: SplitPlan = self.planner(looping).plan(rng, rect, &node.routes)?;
            let info: SplitInfo = SplitInfo::from(&plan);

            match self.build_children(rng, plan, max_depth.child(), level + 1, looping) {
                Ok(children) => {
                    node.split = Some(SplitInfo { rebuilds, ..info });
                    node.children = Some(Box::new(children));
                    return Ok(node);
                }
                Err(MazeError::Split(e @ SplitError::SplitInfeasible { .. })) if looping => {
                    rebuilds += 1;
                    if rebuilds >= MAX_NODE_REBUILDS || self.rebuilds_left == 0 {
                        looping = false;
                    } else {
                        self.rebuilds_left -= 1;
                    }
                    debug!(
                        "Rebuilding the {}x{} rectangle at level {level} (loops = {looping}): {e}",
                        rect.width, rect.height
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn build_children<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        plan: SplitPlan,
        max_depth: MaxDepth,
        level: usize,
        loops: bool,
    ) -> Result<[PartitionNode; 2], MazeError> {
        let (rect_a, rect_b) = plan.frame.child_rects();
        let SplitPlan {
            routes_a, routes_b, ..
        } = plan;

        let child_a: PartitionNode =
            self.build_node(rng, rect_a, max_depth, routes_a, level, loops)?;
        let child_b: PartitionNode =
            self.build_node(rng, rect_b, max_depth, routes_b, level, loops)?;
        Ok([child_a, child_b])
    }
}

/// Build mazes from a seeded random generator.
///
/// The generator is seeded once, when the object is created. Building several mazes with the
/// same object continues the same random sequence.
pub struct MazeBuilder {
    /// Seed of the random generator.
    pub seed: u64,

    /// Number of nodes in the last built tree.
    pub nodes: usize,

    /// Number of split positions tried for the last built tree.
    pub attempts: usize,

    /// Number of loops in the last built tree.
    pub loops: usize,

    /// Number of subtrees that were built again for the last tree.
    pub rebuilds: usize,

    /// Duration in seconds it took to build the last tree.
    pub duration: f32,

    settings: GeneratorSettings,
    rng: StdRng,
}

impl MazeBuilder {
    /// Create the object.
    pub fn new(seed: u64, settings: GeneratorSettings) -> Self {
        Self {
            seed,
            nodes: 0,
            attempts: 0,
            loops: 0,
            rebuilds: 0,
            duration: 0.0,
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build and return a partition tree.
    ///
    /// # Errors
    ///
    /// See [`PartitionNode::build`].
    pub fn build(
        &mut self,
        width: usize,
        height: usize,
        max_depth: MaxDepth,
        routes: Option<Vec<Route>>,
    ) -> Result<PartitionNode, MazeError> {
        let start: Instant = Instant::now();
        self.nodes = 0;
        self.attempts = 0;
        self.loops = 0;
        self.rebuilds = 0;

        let res: Result<PartitionNode, MazeError> = PartitionNode::build(
            &mut self.rng,
            &self.settings,
            width,
            height,
            max_depth,
            routes,
        );
        self.duration = start.elapsed().as_secs_f32();

        if let Ok(root) = &res {
            self.nodes = root.node_count();
            self.attempts = root.split_attempts();
            self.loops = root.loop_count();
            self.rebuilds = root.rebuild_count();
            if log_enabled!(Level::Debug) {
                debug!("Seed {}: {width}x{height} maze", self.seed);
                debug!("    nodes = {}  leaves = {}", self.nodes, root.leaf_count());
                debug!("    depth = {}  attempts = {}", root.depth(), self.attempts);
                debug!("    loops = {}  rebuilds = {}", self.loops, self.rebuilds);
                debug!("    duration = {}", self.duration);
            }
        }
        res
    }
}
