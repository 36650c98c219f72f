//! Grid geometry and pluggable path planning over caller-supplied passability.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

/// Discrete grid coordinate; `x` indexes columns, `y` indexes rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sum of the absolute coordinate differences.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Whether `other` is this point itself or one cardinal step away.
    #[must_use]
    pub const fn adjacent_to(self, other: Self) -> bool {
        self.manhattan_distance(other) <= 1
    }

    /// The four cardinal neighbors, in up, down, left, right order.
    #[must_use]
    pub const fn cardinal_neighbors(self) -> [Self; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
            Self::new(self.x + 1, self.y),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A path planner over an abstract grid.
///
/// Implementations never inspect world state directly; the caller supplies
/// `can_pass_through` for cell passability, `within_reach` deciding whether its
/// second argument is close enough to the goal passed first, and `neighbors`
/// enumerating candidate steps. The returned path lists the cells to enter in
/// order, excluding `start`, and is empty when `start` is already within reach
/// of `goal` or no progress can be made.
pub trait PathingStrategy {
    fn compute_path(
        &self,
        start: Point,
        goal: Point,
        can_pass_through: &dyn Fn(Point) -> bool,
        within_reach: &dyn Fn(Point, Point) -> bool,
        neighbors: &dyn Fn(Point) -> Vec<Point>,
    ) -> Vec<Point>;
}

/// Greedy planner that closes the horizontal gap first, then the vertical one.
///
/// Each step must strictly shrink the distance along its axis, so the walk
/// stops at the first obstacle it cannot sidestep and returns the partial path
/// built so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStepPathing;

impl PathingStrategy for SingleStepPathing {
    fn compute_path(
        &self,
        start: Point,
        goal: Point,
        can_pass_through: &dyn Fn(Point) -> bool,
        within_reach: &dyn Fn(Point, Point) -> bool,
        neighbors: &dyn Fn(Point) -> Vec<Point>,
    ) -> Vec<Point> {
        let mut path = Vec::new();
        let mut current = start;
        // Every accepted step closes one axis by a cell, so the start-to-goal
        // Manhattan distance bounds the walk.
        let budget = start.manhattan_distance(goal);
        for _ in 0..budget {
            if within_reach(goal, current) {
                break;
            }
            let candidates = neighbors(current);
            let horizontal = candidates
                .iter()
                .copied()
                .filter(|p| can_pass_through(*p))
                .filter(|p| (goal.x - p.x).abs() < (goal.x - current.x).abs())
                .min_by_key(|p| (goal.x - p.x).abs());
            let step = horizontal.or_else(|| {
                candidates
                    .iter()
                    .copied()
                    .filter(|p| can_pass_through(*p))
                    .filter(|p| (goal.y - p.y).abs() < (goal.y - current.y).abs())
                    .min_by_key(|p| (goal.y - p.y).abs())
            });
            match step {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }
        path
    }
}

/// Cost assumed for cells the search has not scored yet.
const UNKNOWN_SCORE: i32 = 1000;

/// A* search with unit step costs and a Manhattan-distance heuristic.
///
/// The frontier is a min-heap keyed by estimated total cost; entries with
/// equal estimates pop in the order they were pushed. Improved routes to an
/// open cell are re-pushed and the stale entries skipped when they surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathing;

impl PathingStrategy for AStarPathing {
    fn compute_path(
        &self,
        start: Point,
        goal: Point,
        can_pass_through: &dyn Fn(Point) -> bool,
        within_reach: &dyn Fn(Point, Point) -> bool,
        neighbors: &dyn Fn(Point) -> Vec<Point>,
    ) -> Vec<Point> {
        let mut frontier: BinaryHeap<Reverse<(i32, u64, Point)>> = BinaryHeap::new();
        let mut came_from: HashMap<Point, Point> = HashMap::new();
        let mut g_score: HashMap<Point, i32> = HashMap::new();
        let mut closed: HashSet<Point> = HashSet::new();
        let mut order: u64 = 0;

        g_score.insert(start, 0);
        frontier.push(Reverse((start.manhattan_distance(goal), order, start)));

        while let Some(Reverse((_, _, current))) = frontier.pop() {
            if closed.contains(&current) {
                continue;
            }
            if within_reach(goal, current) {
                return assemble_path(&came_from, start, current);
            }
            closed.insert(current);
            let current_g = g_score.get(&current).copied().unwrap_or(UNKNOWN_SCORE);
            for neighbor in neighbors(current) {
                if closed.contains(&neighbor) || !can_pass_through(neighbor) {
                    continue;
                }
                let tentative = current_g + 1;
                let known = g_score.get(&neighbor).copied().unwrap_or(UNKNOWN_SCORE);
                if tentative < known {
                    g_score.insert(neighbor, tentative);
                    came_from.insert(neighbor, current);
                    order += 1;
                    frontier.push(Reverse((
                        tentative + neighbor.manhattan_distance(goal),
                        order,
                        neighbor,
                    )));
                }
            }
        }
        Vec::new()
    }
}

/// Walk predecessor links back from `end`, returning the step sequence with
/// the starting cell dropped.
fn assemble_path(came_from: &HashMap<Point, Point>, start: Point, end: Point) -> Vec<Point> {
    let mut reversed = vec![end];
    let mut cursor = end;
    while cursor != start {
        let Some(&previous) = came_from.get(&cursor) else {
            return Vec::new();
        };
        reversed.push(previous);
        cursor = previous;
    }
    if reversed.len() <= 1 {
        return Vec::new();
    }
    reversed.pop();
    reversed.reverse();
    reversed
}
