// Grid A* shortest-path search.
//
// Classic A* over the `NavGrid` trait, written once and instantiated for both
// grid representations. The open set is a `BinaryHeap` (min-heap via reversed
// ordering, `total_cmp` on f32 scores); per-cell scores, parent links, and
// closed flags live in flat `Vec`s indexed by the grid's dense cell index —
// no hashing in the hot loop.
//
// Scratch state is a reusable `SearchBuffers` arena. Reuse is an explicit
// discipline: every search calls `reset` before touching the buffers, and the
// reuse path is covered by tests, not assumed.
//
// Step cost is Euclidean (cardinal = cell size, diagonal = sqrt(2) x cell
// size); the heuristic is straight-line distance between cell centers, which
// never overestimates, so the first goal expansion is optimal. On equal
// estimated total cost the open set prefers the entry discovered most
// recently (configurable via `TieBreak`) — this shapes equal-cost paths but
// does not affect optimality.
//
// See also: `grid.rs` for the trait being searched, `config.rs` for
// `TieBreak`, the movement crate for the callers.

use crate::config::TieBreak;
use crate::grid::NavGrid;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const NO_PARENT: u32 = u32::MAX;

/// The result of a successful search: grid cells from start to goal
/// (inclusive both ends) and the matching world-space waypoints (start
/// excluded — the mover is already standing there).
///
/// Every cell is walkable and in bounds; `total_cost` is the summed step
/// cost in world units. Start == goal yields one cell, no waypoints, and
/// zero cost ("already arrived").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Path<C, P> {
    pub cells: Vec<C>,
    pub waypoints: Vec<P>,
    pub total_cost: f32,
}

impl<C, P> Path<C, P> {
    /// Whether the path ends where it starts.
    pub fn is_arrived(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Entry in the A* open set.
struct OpenEntry {
    /// Estimated total cost through this cell (g + heuristic).
    f: f32,
    /// Tie-break key; on equal `f` the entry with the larger key pops first.
    order: u32,
    /// Dense cell index.
    index: u32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f.total_cmp(&other.f) == Ordering::Equal && self.order == other.order
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on f for a min-heap; the larger tie-break key wins ties.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// Reusable per-search scratch: g-scores, parent links, closed flags, and the
/// open heap, all sized to the grid's cell count.
///
/// One `SearchBuffers` serves any number of sequential searches over grids of
/// any size; `reset` re-establishes a clean arena before each one.
#[derive(Default)]
pub struct SearchBuffers {
    g: Vec<f32>,
    parent: Vec<u32>,
    closed: Vec<bool>,
    open: BinaryHeap<OpenEntry>,
    next_seq: u32,
}

impl SearchBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all per-call state and size the arena for `cells` cells.
    pub fn reset(&mut self, cells: usize) {
        self.g.clear();
        self.g.resize(cells, f32::INFINITY);
        self.parent.clear();
        self.parent.resize(cells, NO_PARENT);
        self.closed.clear();
        self.closed.resize(cells, false);
        self.open.clear();
        self.next_seq = 0;
    }

    fn push_open(&mut self, index: u32, f: f32, tie_break: TieBreak) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let order = match tie_break {
            TieBreak::PreferNewer => seq,
            TieBreak::PreferOlder => u32::MAX - seq,
        };
        self.open.push(OpenEntry { f, order, index });
    }
}

/// Find the shortest path from `start` to `goal`, allocating fresh scratch.
///
/// Returns `None` when no path exists, or when either endpoint is out of
/// bounds or not walkable — an unwalkable endpoint is never silently treated
/// as walkable; callers snap first or accept the failure.
pub fn find_path<G: NavGrid>(
    grid: &G,
    start: G::Cell,
    goal: G::Cell,
    tie_break: TieBreak,
) -> Option<Path<G::Cell, G::WorldPoint>> {
    let mut buffers = SearchBuffers::new();
    find_path_with(&mut buffers, grid, start, goal, tie_break)
}

/// Like `find_path`, but searching through a caller-owned scratch arena.
pub fn find_path_with<G: NavGrid>(
    buffers: &mut SearchBuffers,
    grid: &G,
    start: G::Cell,
    goal: G::Cell,
    tie_break: TieBreak,
) -> Option<Path<G::Cell, G::WorldPoint>> {
    let start_idx = grid.cell_index(start)? as u32;
    let goal_idx = grid.cell_index(goal)? as u32;
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }
    if start_idx == goal_idx {
        return Some(Path {
            cells: vec![start],
            waypoints: Vec::new(),
            total_cost: 0.0,
        });
    }

    buffers.reset(grid.cell_count());
    buffers.g[start_idx as usize] = 0.0;
    buffers.push_open(start_idx, grid.heuristic(start, goal), tie_break);

    while let Some(current) = buffers.open.pop() {
        let ci = current.index as usize;
        if current.index == goal_idx {
            return Some(reconstruct(buffers, grid, start_idx, goal_idx));
        }
        if buffers.closed[ci] {
            continue;
        }
        buffers.closed[ci] = true;

        let current_g = buffers.g[ci];
        let cell = grid.cell_at(ci);

        for (neighbor, step_cost) in grid.neighbors(cell) {
            let Some(ni) = grid.cell_index(neighbor) else {
                continue;
            };
            if buffers.closed[ni] {
                continue;
            }
            let tentative = current_g + step_cost;
            if tentative < buffers.g[ni] {
                buffers.g[ni] = tentative;
                buffers.parent[ni] = current.index;
                let f = tentative + grid.heuristic(neighbor, goal);
                buffers.push_open(ni as u32, f, tie_break);
            }
        }
    }

    None
}

/// Walk parent links goal -> start, reverse, and convert to world waypoints.
fn reconstruct<G: NavGrid>(
    buffers: &SearchBuffers,
    grid: &G,
    start_idx: u32,
    goal_idx: u32,
) -> Path<G::Cell, G::WorldPoint> {
    let mut indices = Vec::new();
    let mut current = goal_idx;
    loop {
        indices.push(current);
        if current == start_idx {
            break;
        }
        current = buffers.parent[current as usize];
    }
    indices.reverse();

    let cells: Vec<G::Cell> = indices.iter().map(|&i| grid.cell_at(i as usize)).collect();
    let waypoints = cells[1..].iter().map(|&c| grid.cell_to_world(c)).collect();

    Path {
        cells,
        waypoints,
        total_cost: buffers.g[goal_idx as usize],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Connectivity, NavConfig};
    use crate::geometry::{MapGeometry, Rect};
    use crate::grid::NavGrid;
    use crate::tile_grid::TileGrid;
    use crate::types::TileCoord;

    fn grid_with_walls(
        width: f32,
        height: f32,
        blockers: Vec<Rect>,
        connectivity: Connectivity,
    ) -> TileGrid {
        let config = NavConfig {
            connectivity,
            footprint_radius: 0.0,
            ..NavConfig::default()
        };
        TileGrid::build(
            &MapGeometry {
                width,
                height,
                blockers,
            },
            &config,
        )
        .unwrap()
    }

    /// The 10x10 reference map: a solid wall at x=5 with one gap at y=5.
    fn walled_map(connectivity: Connectivity) -> TileGrid {
        grid_with_walls(
            10.0,
            10.0,
            vec![
                Rect::new(5.0, 0.0, 6.0, 5.0),  // wall below the gap
                Rect::new(5.0, 6.0, 6.0, 10.0), // wall above the gap
            ],
            connectivity,
        )
    }

    /// Brute-force Dijkstra for optimality cross-checks on small grids.
    fn dijkstra_cost(grid: &TileGrid, start: TileCoord, goal: TileCoord) -> Option<f32> {
        let n = grid.cell_count();
        let mut dist = vec![f32::INFINITY; n];
        let start_idx = grid.cell_index(start)?;
        let goal_idx = grid.cell_index(goal)?;
        dist[start_idx] = 0.0;
        let mut visited = vec![false; n];
        loop {
            let mut best: Option<usize> = None;
            for i in 0..n {
                if !visited[i]
                    && dist[i].is_finite()
                    && best.is_none_or(|b| dist[i] < dist[b])
                {
                    best = Some(i);
                }
            }
            let Some(u) = best else { break };
            if u == goal_idx {
                return Some(dist[u]);
            }
            visited[u] = true;
            for (neighbor, cost) in grid.neighbors(grid.cell_at(u)) {
                let v = grid.cell_index(neighbor).unwrap();
                if dist[u] + cost < dist[v] {
                    dist[v] = dist[u] + cost;
                }
            }
        }
        None
    }

    #[test]
    fn start_equals_goal_is_arrived_not_failure() {
        let grid = walled_map(Connectivity::Eight);
        let cell = TileCoord::new(2, 2);
        let path = find_path(&grid, cell, cell, TieBreak::PreferNewer).unwrap();
        assert!(path.is_arrived());
        assert_eq!(path.cells, vec![cell]);
        assert_eq!(path.total_cost, 0.0);
    }

    #[test]
    fn unwalkable_endpoints_are_rejected() {
        let grid = walled_map(Connectivity::Eight);
        let wall = TileCoord::new(5, 2);
        assert!(!grid.is_walkable(wall));
        assert!(find_path(&grid, wall, TileCoord::new(9, 5), TieBreak::PreferNewer).is_none());
        assert!(find_path(&grid, TileCoord::new(0, 5), wall, TieBreak::PreferNewer).is_none());
        // Out of bounds is a rejection, not a panic.
        assert!(find_path(
            &grid,
            TileCoord::new(-3, 0),
            TileCoord::new(9, 5),
            TieBreak::PreferNewer
        )
        .is_none());
    }

    #[test]
    fn path_through_the_wall_gap_four_connected() {
        let grid = walled_map(Connectivity::Four);
        let path = find_path(
            &grid,
            TileCoord::new(0, 5),
            TileCoord::new(9, 5),
            TieBreak::PreferNewer,
        )
        .unwrap();
        // Straight through the gap at (5, 5): ten cells, nine unit steps.
        assert!(path.cells.contains(&TileCoord::new(5, 5)));
        assert_eq!(path.cells.len(), 10);
        assert_eq!(path.waypoints.len(), 9);
        assert!((path.total_cost - 9.0).abs() < 1e-5);
    }

    #[test]
    fn path_through_the_wall_gap_eight_connected() {
        let grid = walled_map(Connectivity::Eight);
        let path = find_path(
            &grid,
            TileCoord::new(0, 5),
            TileCoord::new(9, 5),
            TieBreak::PreferNewer,
        )
        .unwrap();
        assert!(path.cells.contains(&TileCoord::new(5, 5)));
        assert!((path.total_cost - 9.0).abs() < 1e-5);
    }

    #[test]
    fn detour_path_is_longer_than_straight_line() {
        // Start off the gap row: the path must dog-leg through (5, 5).
        let grid = walled_map(Connectivity::Eight);
        let path = find_path(
            &grid,
            TileCoord::new(0, 1),
            TileCoord::new(9, 1),
            TieBreak::PreferNewer,
        )
        .unwrap();
        assert!(path.cells.contains(&TileCoord::new(5, 5)));
        assert!(path.total_cost > 9.0);
    }

    #[test]
    fn every_path_cell_is_walkable_and_in_bounds() {
        let grid = walled_map(Connectivity::Eight);
        for goal_y in 0..10 {
            let goal = TileCoord::new(9, goal_y);
            let path =
                find_path(&grid, TileCoord::new(0, 0), goal, TieBreak::PreferNewer).unwrap();
            for cell in &path.cells {
                assert!(grid.is_walkable(*cell));
                assert!(cell.x >= 0 && cell.x < 10 && cell.y >= 0 && cell.y < 10);
            }
            // Consecutive cells are grid-adjacent (no teleports, no corner
            // cuts — `neighbors` already refuses those).
            for pair in path.cells.windows(2) {
                assert_eq!(pair[0].chebyshev_distance(pair[1]), 1);
            }
            assert_eq!(*path.cells.last().unwrap(), goal);
        }
    }

    #[test]
    fn enclosed_start_returns_none() {
        // Box in (2, 2) completely.
        let grid = grid_with_walls(
            10.0,
            10.0,
            vec![
                Rect::new(1.0, 1.0, 4.0, 2.0), // south wall
                Rect::new(1.0, 3.0, 4.0, 4.0), // north wall
                Rect::new(1.0, 2.0, 2.0, 3.0), // west wall
                Rect::new(3.0, 2.0, 4.0, 3.0), // east wall
            ],
            Connectivity::Eight,
        );
        let start = TileCoord::new(2, 2);
        assert!(grid.is_walkable(start));
        assert!(grid.neighbors(start).is_empty());
        let result = find_path(&grid, start, TileCoord::new(8, 8), TieBreak::PreferNewer);
        assert!(result.is_none(), "sealed start must be NotFound, not a path");
    }

    #[test]
    fn matches_brute_force_on_small_grids() {
        let grid = walled_map(Connectivity::Eight);
        for (start, goal) in [
            (TileCoord::new(0, 0), TileCoord::new(9, 9)),
            (TileCoord::new(0, 9), TileCoord::new(9, 0)),
            (TileCoord::new(3, 1), TileCoord::new(7, 8)),
            (TileCoord::new(4, 5), TileCoord::new(6, 5)),
        ] {
            let expected = dijkstra_cost(&grid, start, goal).unwrap();
            let path = find_path(&grid, start, goal, TieBreak::PreferNewer).unwrap();
            assert!(
                (path.total_cost - expected).abs() < 1e-4,
                "{start} -> {goal}: a* {} vs dijkstra {expected}",
                path.total_cost
            );
        }
    }

    #[test]
    fn consecutive_waypoints_have_clear_segments() {
        use crate::los::has_line_of_sight;
        let grid = walled_map(Connectivity::Eight);
        let start = TileCoord::new(0, 1);
        let path = find_path(&grid, start, TileCoord::new(9, 8), TieBreak::PreferNewer).unwrap();
        let mut previous = grid.cell_to_world(start);
        for waypoint in &path.waypoints {
            assert!(
                has_line_of_sight(&grid, previous, *waypoint, 0.25),
                "segment {previous} -> {waypoint} crosses a blocked cell"
            );
            previous = *waypoint;
        }
    }

    #[test]
    fn tie_break_changes_shape_not_cost() {
        let grid = grid_with_walls(12.0, 12.0, Vec::new(), Connectivity::Four);
        let start = TileCoord::new(0, 0);
        let goal = TileCoord::new(5, 5);
        let newer = find_path(&grid, start, goal, TieBreak::PreferNewer).unwrap();
        let older = find_path(&grid, start, goal, TieBreak::PreferOlder).unwrap();
        assert!((newer.total_cost - older.total_cost).abs() < 1e-5);
    }

    #[test]
    fn buffers_reuse_matches_fresh_buffers() {
        let grid = walled_map(Connectivity::Eight);
        let mut shared = SearchBuffers::new();
        let queries = [
            (TileCoord::new(0, 0), TileCoord::new(9, 9)),
            (TileCoord::new(9, 0), TileCoord::new(0, 9)),
            (TileCoord::new(0, 5), TileCoord::new(9, 5)),
            (TileCoord::new(2, 2), TileCoord::new(2, 2)),
        ];
        for (start, goal) in queries {
            let reused =
                find_path_with(&mut shared, &grid, start, goal, TieBreak::PreferNewer).unwrap();
            let fresh = find_path(&grid, start, goal, TieBreak::PreferNewer).unwrap();
            assert_eq!(reused.cells, fresh.cells, "{start} -> {goal}");
            assert!((reused.total_cost - fresh.total_cost).abs() < 1e-6);
        }
    }

    #[test]
    fn buffers_shrink_and_grow_between_grids() {
        let big = grid_with_walls(20.0, 20.0, Vec::new(), Connectivity::Four);
        let small = grid_with_walls(4.0, 4.0, Vec::new(), Connectivity::Four);
        let mut buffers = SearchBuffers::new();
        let p1 = find_path_with(
            &mut buffers,
            &big,
            TileCoord::new(0, 0),
            TileCoord::new(19, 19),
            TieBreak::PreferNewer,
        )
        .unwrap();
        assert_eq!(p1.cells.len(), 39);
        let p2 = find_path_with(
            &mut buffers,
            &small,
            TileCoord::new(0, 0),
            TileCoord::new(3, 3),
            TieBreak::PreferNewer,
        )
        .unwrap();
        assert_eq!(p2.cells.len(), 7);
        assert!(p2.cells.iter().all(|c| c.x < 4 && c.y < 4));
    }

    #[test]
    fn waypoints_are_cell_centers() {
        let grid = walled_map(Connectivity::Four);
        let path = find_path(
            &grid,
            TileCoord::new(0, 5),
            TileCoord::new(2, 5),
            TieBreak::PreferNewer,
        )
        .unwrap();
        assert_eq!(path.waypoints.len(), 2);
        assert_eq!(path.waypoints[0].x, 1.5);
        assert_eq!(path.waypoints[0].y, 5.5);
        assert_eq!(path.waypoints[1].x, 2.5);
    }

    #[test]
    fn path_serializes_for_state_transfer() {
        let grid = walled_map(Connectivity::Four);
        let path = find_path(
            &grid,
            TileCoord::new(0, 5),
            TileCoord::new(3, 5),
            TieBreak::PreferNewer,
        )
        .unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let restored: Path<TileCoord, crate::types::Point2> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(restored.cells, path.cells);
        assert_eq!(restored.waypoints.len(), path.waypoints.len());
    }
}
